//! # Pagecraft Editor
//!
//! Core page-document editing engine for Pagecraft.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ action: SET_INITIAL_STATE, ADD_ELEMENT, ... │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ reducer: EditorState::dispatch              │
//! │  - Locate targets by id (locator)           │
//! │  - Apply the edit, or nothing at all        │
//! │  - Snapshot content into history            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document: PageDocument → JSON draft         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Ids are identity**: every node and column slot id is unique per document
//! 2. **Typed nesting**: stack children and column slots are separate variants
//! 3. **Silent no-ops**: stale ids never raise, they just don't apply
//! 4. **Linear history**: a new edit after undo drops the redo branch
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{EditorAction, EditorState, NodeKind, ROOT_ID};
//!
//! let mut state = EditorState::new();
//! state.dispatch(EditorAction::SetInitialState { content: vec![], page_styles: Default::default() });
//! state.dispatch(EditorAction::PushHistory);
//!
//! let heading = state.create_node(NodeKind::Heading).into_vec();
//! let id = heading[0].id.clone();
//! state.dispatch(EditorAction::add(heading, ROOT_ID, 0));
//! state.dispatch(EditorAction::update_content(&id, "<h1>Hi</h1>"));
//! state.dispatch(EditorAction::Undo);
//! ```

mod actions;
mod document;
mod errors;
mod history;
mod id_generator;
mod kind;
pub mod locator;
mod node;
mod reducer;
mod style;
mod template;

pub use actions::EditorAction;
pub use document::{decode_nodes, deserialize_nodes, deserialize_optional_nodes, PageDocument, PageStyles};
pub use errors::{EditError, EditorError};
pub use history::{History, HistoryEntry};
pub use id_generator::{session_seed, IdGenerator};
pub use kind::{ContentShape, LayoutKind, NodeKind, UnknownKind};
pub use locator::{Location, Parent, LEGACY_ROOT_ID, ROOT_ID};
pub use node::{AttributeName, Attributes, ColumnsPayload, Content, ContentNode, Layout, NodeId, Slot};
pub use reducer::{reduce, EditorState};
pub use style::{Breakpoint, InteractionState, StateStyles, StyleProps, Styles};
pub use template::{create_node, Created};
