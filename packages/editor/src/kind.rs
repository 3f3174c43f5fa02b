//! # Node Kinds
//!
//! The closed set of element types a page can contain, plus the two facts
//! about each kind the rest of the editor relies on:
//!
//! - **Layout**: whether the kind is a leaf, a stack container (ordinary
//!   `children`), or a slot container (`columns`, children nested per slot)
//! - **Content shape**: whether `content` holds nothing, a plain string
//!   (HTML fragment, URL or label), or a structured JSON payload

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Element type of a content node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Section,
    Box,
    Card,
    RightImageSection,
    Columns,
    Hero,
    Gallery,
    Footer,
    Navbar,
    Blocks,
    Steps,
    StepBlock,
    StepConnector,
    Heading,
    Paragraph,
    Image,
    Video,
    Button,
    TextField,
    OrderedList,
    UnorderedList,
}

/// How a kind nests other nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Leaf,
    Stack,
    Slots,
}

/// What a kind stores in its `content` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    None,
    Text,
    Data,
}

impl NodeKind {
    pub const ALL: [NodeKind; 21] = [
        NodeKind::Section,
        NodeKind::Box,
        NodeKind::Card,
        NodeKind::RightImageSection,
        NodeKind::Columns,
        NodeKind::Hero,
        NodeKind::Gallery,
        NodeKind::Footer,
        NodeKind::Navbar,
        NodeKind::Blocks,
        NodeKind::Steps,
        NodeKind::StepBlock,
        NodeKind::StepConnector,
        NodeKind::Heading,
        NodeKind::Paragraph,
        NodeKind::Image,
        NodeKind::Video,
        NodeKind::Button,
        NodeKind::TextField,
        NodeKind::OrderedList,
        NodeKind::UnorderedList,
    ];

    /// Wire name (the `type` field)
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Section => "section",
            NodeKind::Box => "box",
            NodeKind::Card => "card",
            NodeKind::RightImageSection => "right-image-section",
            NodeKind::Columns => "columns",
            NodeKind::Hero => "hero",
            NodeKind::Gallery => "gallery",
            NodeKind::Footer => "footer",
            NodeKind::Navbar => "navbar",
            NodeKind::Blocks => "blocks",
            NodeKind::Steps => "steps",
            NodeKind::StepBlock => "step-block",
            NodeKind::StepConnector => "step-connector",
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Image => "image",
            NodeKind::Video => "video",
            NodeKind::Button => "button",
            NodeKind::TextField => "text-field",
            NodeKind::OrderedList => "ordered-list",
            NodeKind::UnorderedList => "unordered-list",
        }
    }

    pub fn layout(&self) -> LayoutKind {
        match self {
            NodeKind::Columns => LayoutKind::Slots,
            NodeKind::Section
            | NodeKind::Box
            | NodeKind::Card
            | NodeKind::Hero
            | NodeKind::Navbar
            | NodeKind::Footer
            | NodeKind::RightImageSection
            | NodeKind::Blocks
            | NodeKind::StepBlock => LayoutKind::Stack,
            // `steps` only exists as a template; if one is ever persisted it
            // is treated as a plain stack
            NodeKind::Steps => LayoutKind::Stack,
            _ => LayoutKind::Leaf,
        }
    }

    pub fn content_shape(&self) -> ContentShape {
        match self {
            NodeKind::Hero
            | NodeKind::Navbar
            | NodeKind::Footer
            | NodeKind::Gallery
            | NodeKind::RightImageSection => ContentShape::Data,
            NodeKind::Heading
            | NodeKind::Paragraph
            | NodeKind::Image
            | NodeKind::Video
            | NodeKind::Button
            | NodeKind::TextField
            | NodeKind::OrderedList
            | NodeKind::UnorderedList
            | NodeKind::StepConnector => ContentShape::Text,
            _ => ContentShape::None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.layout() != LayoutKind::Leaf
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown node kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for kind in NodeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(kind.as_str().parse::<NodeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_layouts() {
        assert_eq!(NodeKind::Columns.layout(), LayoutKind::Slots);
        assert_eq!(NodeKind::Section.layout(), LayoutKind::Stack);
        assert_eq!(NodeKind::Hero.layout(), LayoutKind::Stack);
        assert_eq!(NodeKind::Heading.layout(), LayoutKind::Leaf);
        assert!(!NodeKind::Button.is_container());
    }

    #[test]
    fn test_unknown_kind() {
        let err = "marquee".parse::<NodeKind>().unwrap_err();
        assert_eq!(err, UnknownKind("marquee".to_string()));
    }
}
