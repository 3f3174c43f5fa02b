//! # Editing Session
//!
//! Ties an [`EditorState`] to a remote site: hydrates it from the stored
//! draft, autosaves it after every change, and exposes version and publish
//! operations.
//!
//! ## Lifecycle
//!
//! ```text
//! open → SetInitialState + PushHistory → dispatch* (autosave) → close (flush)
//! ```
//!
//! Local edits never wait on the network. A failed save only changes the
//! save status; the next edit or an explicit save retries.

use crate::autosave::{Autosaver, SaveStatus};
use crate::store::{SiteStore, VersionRecord};
use crate::SyncError;
use pagecraft_editor::{EditError, EditorAction, EditorState, PageDocument};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Quiet period after the last change before the draft is saved
    pub autosave_debounce: Duration,

    /// Maximum history snapshots (0 = unlimited)
    pub history_limit: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            autosave_debounce: Duration::from_secs(2),
            history_limit: 0,
        }
    }
}

pub struct EditorSession {
    site_id: String,
    title: String,
    store: Arc<dyn SiteStore>,
    state: EditorState,
    autosaver: Option<Autosaver>,

    /// Document version last handed to the autosaver
    synced_version: u64,
}

impl EditorSession {
    /// Fetch the site's draft and start editing it
    pub async fn open(
        store: Arc<dyn SiteStore>,
        site_id: impl Into<String>,
        options: SessionOptions,
    ) -> Result<Self, SyncError> {
        let site_id = site_id.into();
        let site = store.fetch_site(&site_id).await?;
        let draft = site.working_draft();

        let mut state = EditorState::with_history_limit(options.history_limit);
        state.dispatch(EditorAction::SetInitialState {
            content: draft.content,
            page_styles: draft.page_styles,
        });
        state.dispatch(EditorAction::PushHistory);

        let autosaver = Autosaver::spawn(store.clone(), site_id.clone(), options.autosave_debounce);
        tracing::info!(
            site_id = %site_id,
            nodes = state.document().node_count(),
            "editing session opened"
        );

        Ok(Self {
            title: site.title,
            synced_version: state.version(),
            site_id,
            store,
            state,
            autosaver: Some(autosaver),
        })
    }

    /// Apply an edit locally and schedule an autosave if the document changed
    pub fn dispatch(&mut self, action: EditorAction) -> Result<(), SyncError> {
        self.ensure_open()?;
        self.state.dispatch(action);
        self.schedule_if_changed()
    }

    /// Like [`dispatch`](Self::dispatch) but reports why an edit did not apply
    pub fn try_dispatch(&mut self, action: EditorAction) -> Result<Result<(), EditError>, SyncError> {
        self.ensure_open()?;
        let outcome = self.state.try_dispatch(action);
        self.schedule_if_changed()?;
        Ok(outcome)
    }

    fn schedule_if_changed(&mut self) -> Result<(), SyncError> {
        if self.state.version() == self.synced_version {
            return Ok(());
        }
        self.synced_version = self.state.version();
        self.autosaver()?.schedule(self.state.document().clone())
    }

    /// Save the current draft without waiting for the debounce
    pub async fn save_now(&mut self) -> Result<(), SyncError> {
        self.synced_version = self.state.version();
        let draft = self.state.document().clone();
        self.autosaver()?.flush(draft).await
    }

    /// Record the current document as a new immutable version
    pub async fn save_version(&self) -> Result<String, SyncError> {
        self.ensure_open()?;
        let id = self.store.save_version(&self.site_id, self.state.document()).await?;
        tracing::info!(site_id = %self.site_id, version_id = %id, "version saved");
        Ok(id)
    }

    /// Saved versions, newest first
    pub async fn versions(&self) -> Result<Vec<VersionRecord>, SyncError> {
        self.store.list_versions(&self.site_id).await
    }

    /// Load a saved version into the editor as a new undoable step
    pub async fn revert_to_version(&mut self, version_id: &str) -> Result<(), SyncError> {
        self.ensure_open()?;
        let version = self
            .versions()
            .await?
            .into_iter()
            .find(|version| version.id == version_id)
            .ok_or_else(|| SyncError::VersionNotFound(version_id.to_string()))?;

        let document = version.to_document();
        self.dispatch(EditorAction::RevertToVersion {
            content: document.content,
            page_styles: document.page_styles,
        })?;
        tracing::info!(site_id = %self.site_id, version_id, "reverted to version");
        Ok(())
    }

    /// Save the draft, then make it the live site
    pub async fn publish(&mut self) -> Result<(), SyncError> {
        self.save_now().await?;
        self.store.publish(&self.site_id, self.state.document()).await?;
        tracing::info!(site_id = %self.site_id, "site published");
        Ok(())
    }

    /// Flush unsaved changes and stop autosaving
    pub async fn close(mut self) -> Result<(), SyncError> {
        let result = match self.status() {
            SaveStatus::Saved => Ok(()),
            _ => self.save_now().await,
        };
        self.autosaver = None;
        tracing::info!(site_id = %self.site_id, "editing session closed");
        result
    }

    pub fn status(&self) -> SaveStatus {
        self.autosaver
            .as_ref()
            .map_or(SaveStatus::Saved, Autosaver::status)
    }

    pub fn subscribe_status(&self) -> Result<watch::Receiver<SaveStatus>, SyncError> {
        Ok(self.autosaver()?.subscribe())
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn document(&self) -> &PageDocument {
        self.state.document()
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn autosaver(&self) -> Result<&Autosaver, SyncError> {
        self.autosaver.as_ref().ok_or(SyncError::SessionClosed)
    }

    fn ensure_open(&self) -> Result<(), SyncError> {
        self.autosaver().map(|_| ())
    }
}
