//! # Page Document
//!
//! The persisted unit of a site page: the root node list plus document-wide
//! page styles.
//!
//! ## Wire shape
//!
//! ```text
//! { "content": [ContentNode, ...], "pageStyles": { ... } }
//! ```
//!
//! A bare node array is also accepted when loading; page styles then fall
//! back to the defaults.

use crate::node::ContentNode;
use crate::EditorError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

const DEFAULT_FONT_FAMILY: &str = "'Inter', sans-serif";
const DEFAULT_BACKGROUND: &str = "#f0f2f5";
const DEFAULT_COLOR: &str = "#111827";

/// Document-wide styles and design tokens.
///
/// Mostly CSS property → value, plus an optional `customCss` stylesheet and
/// `colors` / `fonts` token objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageStyles(Map<String, Value>);

impl Default for PageStyles {
    fn default() -> Self {
        let mut map = Map::new();
        map.insert("fontFamily".into(), DEFAULT_FONT_FAMILY.into());
        map.insert("backgroundColor".into(), DEFAULT_BACKGROUND.into());
        map.insert("color".into(), DEFAULT_COLOR.into());
        Self(map)
    }
}

impl PageStyles {
    /// Page styles with no properties at all
    pub fn empty() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Shallow merge: incoming keys override, the rest are kept
    pub fn merge(&mut self, partial: Map<String, Value>) {
        self.0.extend(partial);
    }

    pub fn custom_css(&self) -> Option<&str> {
        self.get_str("customCss")
    }

    pub fn colors(&self) -> Option<&Map<String, Value>> {
        self.0.get("colors").and_then(Value::as_object)
    }

    pub fn fonts(&self) -> Option<&Map<String, Value>> {
        self.0.get("fonts").and_then(Value::as_object)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for PageStyles {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Root of a page: ordered top-level nodes plus page styles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DocumentShape")]
pub struct PageDocument {
    pub content: Vec<ContentNode>,
    pub page_styles: PageStyles,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentShape {
    Full {
        content: Vec<Value>,
        #[serde(default, rename = "pageStyles")]
        page_styles: Option<PageStyles>,
    },
    Bare(Vec<Value>),
}

impl TryFrom<DocumentShape> for PageDocument {
    type Error = String;

    fn try_from(shape: DocumentShape) -> Result<Self, Self::Error> {
        let (content, page_styles) = match shape {
            DocumentShape::Full {
                content,
                page_styles,
            } => (content, page_styles.unwrap_or_default()),
            DocumentShape::Bare(content) => (content, PageStyles::default()),
        };
        Ok(PageDocument::new(decode_nodes(content)?, page_styles))
    }
}

/// Decode a top-level node list one node at a time, so a failure names the
/// node at fault instead of the whole list.
pub fn decode_nodes(values: Vec<Value>) -> Result<Vec<ContentNode>, String> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let kind = value.get("type").and_then(Value::as_str).unwrap_or("?").to_string();
            let id = value.get("id").and_then(Value::as_str).unwrap_or("?").to_string();
            serde_json::from_value(value)
                .map_err(|e| format!("node {} (type \"{}\", id \"{}\") did not decode: {}", index, kind, id, e))
        })
        .collect()
}

/// `deserialize_with` helper for node lists, see [`decode_nodes`]
pub fn deserialize_nodes<'de, D>(deserializer: D) -> Result<Vec<ContentNode>, D::Error>
where
    D: Deserializer<'de>,
{
    decode_nodes(Vec::<Value>::deserialize(deserializer)?).map_err(D::Error::custom)
}

/// `deserialize_with` helper for optional node lists
pub fn deserialize_optional_nodes<'de, D>(deserializer: D) -> Result<Option<Vec<ContentNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Value>>::deserialize(deserializer)?
        .map(decode_nodes)
        .transpose()
        .map_err(D::Error::custom)
}

impl PageDocument {
    pub fn new(content: Vec<ContentNode>, page_styles: PageStyles) -> Self {
        Self {
            content,
            page_styles,
        }
    }

    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Write the document to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        crate::locator::count(&self.content)
    }
}
