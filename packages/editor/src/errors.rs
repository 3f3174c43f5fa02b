//! Error types for the editor

use crate::node::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why an edit action was applied as a no-op
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Parent not found: {0}")]
    ParentNotFound(NodeId),

    #[error("Node cannot hold children: {0}")]
    NotAContainer(NodeId),

    #[error("Would create cycle: {0} is inside the moved subtree")]
    CycleDetected(NodeId),

    #[error("Duplicate id: {0}")]
    DuplicateId(NodeId),

    #[error("Invalid content for {node_id}: {reason}")]
    InvalidContent { node_id: NodeId, reason: String },
}
