//! # Content Nodes
//!
//! One element of the page tree. Nesting is a tagged union on the node:
//! stack containers own an ordinary child list, slot containers (`columns`)
//! own a list of slots that each hold their own children, and leaves own
//! nothing.
//!
//! ## Wire shape
//!
//! ```text
//! { id, type, name?, content?, styles, attributes?, children? }
//! ```
//!
//! On the wire a `columns` node carries its slots inside `content` as a JSON
//! string (`{"columns": [{"id", "children"}]}`) and structured payloads
//! (hero, navbar, ...) are JSON strings too. Both are decoded into typed
//! fields here so nothing downstream parses strings.

use crate::kind::{ContentShape, LayoutKind, NodeKind};
use crate::style::Styles;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node and slot identifier, unique within a document
pub type NodeId = String;

/// Kind-specific payload of a node
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    Empty,

    /// HTML fragment, URL or label
    Text(String),

    /// Structured payload (hero copy, navbar links, gallery images, ...)
    Data(Value),
}

impl Content {
    pub fn text(value: impl Into<String>) -> Self {
        Content::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Content::Data(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }

    /// Decode a wire-level content string for `kind`.
    ///
    /// Structured kinds whose string is not a JSON object keep the raw string.
    pub fn decode(kind: NodeKind, raw: &str) -> Self {
        match kind.content_shape() {
            ContentShape::Data => match serde_json::from_str::<Value>(raw) {
                Ok(value @ Value::Object(_)) => Content::Data(value),
                _ => Content::Text(raw.to_string()),
            },
            ContentShape::Text | ContentShape::None => Content::Text(raw.to_string()),
        }
    }

    /// Wire-level string, if any
    pub fn encode(&self) -> Option<String> {
        match self {
            Content::Empty => None,
            Content::Text(s) => Some(s.clone()),
            Content::Data(value) => Some(serde_json::to_string_pretty(value).unwrap_or_default()),
        }
    }
}

/// One column of a slot container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: NodeId,

    #[serde(default)]
    pub children: Vec<ContentNode>,
}

impl Slot {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }
}

/// Decoded form of a `columns` node's content string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsPayload {
    pub columns: Vec<Slot>,
}

impl ColumnsPayload {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// How a node nests other nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    Leaf,
    Stack(Vec<ContentNode>),
    Slots(Vec<Slot>),
}

impl Layout {
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind.layout() {
            LayoutKind::Leaf => Layout::Leaf,
            LayoutKind::Stack => Layout::Stack(Vec::new()),
            LayoutKind::Slots => Layout::Slots(Vec::new()),
        }
    }
}

/// Custom DOM attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeName {
    Id,
    Class,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.class_name.is_none()
    }

    /// Set an attribute; an empty value clears it. Returns whether it changed.
    pub fn set(&mut self, name: AttributeName, value: &str) -> bool {
        let value = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        let slot = match name {
            AttributeName::Id => &mut self.id,
            AttributeName::Class => &mut self.class_name,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }
}

/// A node in the page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireNode", into = "WireNode")]
pub struct ContentNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: Option<String>,
    pub content: Content,
    pub styles: Styles,
    pub attributes: Attributes,
    pub layout: Layout,
}

impl ContentNode {
    /// Bare node of `kind` with the layout that kind implies
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: None,
            content: Content::Empty,
            styles: Styles::default(),
            attributes: Attributes::default(),
            layout: Layout::for_kind(kind),
        }
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_children(mut self, children: Vec<ContentNode>) -> Self {
        self.layout = Layout::Stack(children);
        self
    }

    pub fn with_slots(mut self, slots: Vec<Slot>) -> Self {
        self.layout = Layout::Slots(slots);
        self
    }

    /// Ordinary children (empty for leaves and slot containers)
    pub fn children(&self) -> &[ContentNode] {
        match &self.layout {
            Layout::Stack(children) => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<ContentNode>> {
        match &mut self.layout {
            Layout::Stack(children) => Some(children),
            _ => None,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        match &self.layout {
            Layout::Slots(slots) => slots,
            _ => &[],
        }
    }

    pub fn slots_mut(&mut self) -> Option<&mut Vec<Slot>> {
        match &mut self.layout {
            Layout::Slots(slots) => Some(slots),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + match &self.layout {
            Layout::Leaf => 0,
            Layout::Stack(children) => children.iter().map(ContentNode::subtree_len).sum(),
            Layout::Slots(slots) => slots
                .iter()
                .flat_map(|slot| slot.children.iter())
                .map(ContentNode::subtree_len)
                .sum(),
        }
    }
}

/// Persisted record shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireNode {
    id: NodeId,

    #[serde(rename = "type")]
    kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Value>,

    #[serde(default)]
    styles: Styles,

    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<ContentNode>>,
}

impl From<WireNode> for ContentNode {
    fn from(wire: WireNode) -> Self {
        let WireNode {
            id,
            kind,
            name,
            content,
            styles,
            attributes,
            children,
        } = wire;

        if kind == NodeKind::Columns {
            let (slots, content) = decode_columns(&id, content);
            if children.as_ref().is_some_and(|c| !c.is_empty()) {
                tracing::warn!(node_id = %id, "columns node carries ordinary children; ignoring them");
            }
            return ContentNode {
                id,
                kind,
                name,
                content,
                styles,
                attributes,
                layout: Layout::Slots(slots),
            };
        }

        let content = match content {
            None => Content::Empty,
            Some(Value::String(raw)) => Content::decode(kind, &raw),
            Some(value @ Value::Object(_)) if kind.content_shape() == ContentShape::Data => {
                Content::Data(value)
            }
            Some(other) => Content::Text(other.to_string()),
        };

        let children = children.unwrap_or_default();
        let layout = if kind.layout() != LayoutKind::Leaf || !children.is_empty() {
            Layout::Stack(children)
        } else {
            Layout::Leaf
        };

        ContentNode {
            id,
            kind,
            name,
            content,
            styles,
            attributes,
            layout,
        }
    }
}

impl From<ContentNode> for WireNode {
    fn from(node: ContentNode) -> Self {
        let (content, children) = match node.layout {
            Layout::Slots(columns) => {
                // An undecoded payload is written back as-is until slots are edited in
                let raw = match node.content.encode() {
                    Some(raw) if columns.is_empty() => raw,
                    _ => serde_json::to_string_pretty(&ColumnsPayload { columns }).unwrap_or_default(),
                };
                (Some(Value::String(raw)), None)
            }
            Layout::Stack(children) => (node.content.encode().map(Value::String), Some(children)),
            Layout::Leaf => (node.content.encode().map(Value::String), None),
        };

        WireNode {
            id: node.id,
            kind: node.kind,
            name: node.name,
            content,
            styles: node.styles,
            attributes: node.attributes,
            children,
        }
    }
}

/// Slots of a `columns` node. A payload that does not decode yields no slots
/// and is kept as the node's content so it survives the next save.
fn decode_columns(node_id: &str, content: Option<Value>) -> (Vec<Slot>, Content) {
    let (parsed, kept) = match content {
        None | Some(Value::Null) => return (Vec::new(), Content::Empty),
        Some(Value::String(raw)) => (ColumnsPayload::parse(&raw), Content::Text(raw)),
        Some(value) => (serde_json::from_value(value.clone()), Content::Data(value)),
    };

    match parsed {
        Ok(payload) => (payload.columns, Content::Empty),
        Err(e) => {
            tracing::warn!(node_id, error = %e, "columns content did not parse; keeping it undecoded");
            (Vec::new(), kept)
        }
    }
}
