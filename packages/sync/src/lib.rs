//! # Pagecraft Sync
//!
//! Client synchronization for the page editor: loads a site's draft into an
//! [`EditorState`](pagecraft_editor::EditorState), autosaves it behind a
//! debounce, and records, lists and restores saved versions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_sync::{EditorSession, HttpSiteStore, SessionOptions, StaticToken};
//!
//! let store = Arc::new(HttpSiteStore::new("http://localhost:3000/api", Arc::new(StaticToken::new(token)))?);
//! let mut session = EditorSession::open(store, "site-id", SessionOptions::default()).await?;
//!
//! session.dispatch(EditorAction::delete("heading-1"))?;
//! session.save_version().await?;
//! session.close().await?;
//! ```

mod autosave;
mod error;
mod http;
mod memory;
mod session;
mod store;

pub use autosave::{Autosaver, SaveStatus};
pub use error::SyncError;
pub use http::{CredentialProvider, HttpSiteStore, StaticToken};
pub use memory::InMemorySiteStore;
pub use session::{EditorSession, SessionOptions};
pub use store::{ServerTimestamp, SiteRecord, SiteStore, VersionRecord};
