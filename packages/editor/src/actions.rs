//! # Editor Actions
//!
//! The closed set of edits the reducer understands. Actions serialize as
//! `{"type": "ADD_ELEMENT", "payload": {...}}` so scripted edits and logs can
//! be stored as JSON.

use crate::document::PageStyles;
use crate::node::{AttributeName, ContentNode, NodeId};
use crate::style::{Breakpoint, InteractionState, StyleProps};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditorAction {
    /// Replace the document wholesale (session hydration)
    #[serde(rename_all = "camelCase")]
    SetInitialState {
        content: Vec<ContentNode>,
        #[serde(default)]
        page_styles: PageStyles,
    },

    /// Insert sibling nodes at `index` under `parent_id`
    #[serde(rename_all = "camelCase")]
    AddElement {
        #[serde(alias = "element")]
        elements: Vec<ContentNode>,
        parent_id: NodeId,
        index: usize,
    },

    /// Detach a subtree and reinsert it elsewhere
    #[serde(rename_all = "camelCase")]
    MoveElement {
        dragged_id: NodeId,
        target_parent_id: NodeId,
        target_index: usize,
    },

    /// Shallow-merge style properties into one breakpoint/state
    #[serde(rename_all = "camelCase")]
    UpdateStyles {
        element_id: NodeId,
        styles: StyleProps,
        #[serde(default)]
        breakpoint: Breakpoint,
        #[serde(default)]
        state: InteractionState,
    },

    /// Replace a node's content with a wire-level string
    #[serde(rename_all = "camelCase")]
    UpdateContent { element_id: NodeId, content: String },

    #[serde(rename_all = "camelCase")]
    UpdateAttribute {
        element_id: NodeId,
        attribute: AttributeName,
        value: String,
    },

    #[serde(rename_all = "camelCase")]
    DeleteElement { element_id: NodeId },

    #[serde(rename_all = "camelCase")]
    DuplicateElement { element_id: NodeId },

    #[serde(rename_all = "camelCase")]
    SetSelection { element_id: Option<NodeId> },

    /// Shallow-merge into page styles
    SetPageStyles { styles: Map<String, Value> },

    PushHistory,
    Undo,
    Redo,

    /// Load a saved version and record it as a new snapshot
    #[serde(rename_all = "camelCase")]
    RevertToVersion {
        content: Vec<ContentNode>,
        #[serde(default)]
        page_styles: PageStyles,
    },
}

impl EditorAction {
    /// Wire name of the action
    pub fn name(&self) -> &'static str {
        match self {
            EditorAction::SetInitialState { .. } => "SET_INITIAL_STATE",
            EditorAction::AddElement { .. } => "ADD_ELEMENT",
            EditorAction::MoveElement { .. } => "MOVE_ELEMENT",
            EditorAction::UpdateStyles { .. } => "UPDATE_STYLES",
            EditorAction::UpdateContent { .. } => "UPDATE_CONTENT",
            EditorAction::UpdateAttribute { .. } => "UPDATE_ATTRIBUTE",
            EditorAction::DeleteElement { .. } => "DELETE_ELEMENT",
            EditorAction::DuplicateElement { .. } => "DUPLICATE_ELEMENT",
            EditorAction::SetSelection { .. } => "SET_SELECTION",
            EditorAction::SetPageStyles { .. } => "SET_PAGE_STYLES",
            EditorAction::PushHistory => "PUSH_HISTORY",
            EditorAction::Undo => "UNDO",
            EditorAction::Redo => "REDO",
            EditorAction::RevertToVersion { .. } => "REVERT_TO_VERSION",
        }
    }

    pub fn add(elements: Vec<ContentNode>, parent_id: impl Into<NodeId>, index: usize) -> Self {
        EditorAction::AddElement {
            elements,
            parent_id: parent_id.into(),
            index,
        }
    }

    pub fn update_content(element_id: impl Into<NodeId>, content: impl Into<String>) -> Self {
        EditorAction::UpdateContent {
            element_id: element_id.into(),
            content: content.into(),
        }
    }

    pub fn delete(element_id: impl Into<NodeId>) -> Self {
        EditorAction::DeleteElement {
            element_id: element_id.into(),
        }
    }

    pub fn duplicate(element_id: impl Into<NodeId>) -> Self {
        EditorAction::DuplicateElement {
            element_id: element_id.into(),
        }
    }

    pub fn select(element_id: Option<&str>) -> Self {
        EditorAction::SetSelection {
            element_id: element_id.map(str::to_string),
        }
    }
}
