//! # Autosave
//!
//! Debounced write-behind of the working draft. A single background task
//! owns the timer and performs every save, so saves never overlap and a later
//! draft always lands after an earlier one.
//!
//! ```text
//! schedule(draft) ──► Unsaved ──(debounce elapses)──► Saving ──► Saved | Error
//!        ▲                                               │
//!        └──── edits during a save re-arm the timer ◄────┘
//! ```

use crate::store::SiteStore;
use crate::SyncError;
use pagecraft_editor::PageDocument;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Save state shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Unsaved,
    Saving,
    Error(String),
}

impl SaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveStatus::Saved => "saved",
            SaveStatus::Unsaved => "unsaved",
            SaveStatus::Saving => "saving",
            SaveStatus::Error(_) => "error",
        }
    }
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::Error(message) => write!(f, "error: {}", message),
            other => f.write_str(other.as_str()),
        }
    }
}

enum Command {
    Schedule {
        draft: PageDocument,
        generation: u64,
    },
    Flush {
        draft: PageDocument,
        generation: u64,
        reply: oneshot::Sender<Result<(), SyncError>>,
    },
}

/// Handle to the background save task. Dropping it cancels any pending save.
pub struct Autosaver {
    commands: mpsc::UnboundedSender<Command>,
    status: Arc<watch::Sender<SaveStatus>>,

    /// Generation of the newest draft handed to the task
    latest: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl Autosaver {
    /// Start the save task for one site. Must be called inside a tokio runtime.
    pub fn spawn(store: Arc<dyn SiteStore>, site_id: impl Into<String>, debounce: Duration) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let (status, _) = watch::channel(SaveStatus::Saved);
        let status = Arc::new(status);
        let latest = Arc::new(AtomicU64::new(0));

        let worker = Worker {
            store,
            site_id: site_id.into(),
            debounce,
            status: status.clone(),
            latest: latest.clone(),
        };
        let task = tokio::spawn(worker.run(receiver));

        Self {
            commands,
            status,
            latest,
            task,
        }
    }

    /// Save `draft` once no newer draft arrives for the debounce period
    pub fn schedule(&self, draft: PageDocument) -> Result<(), SyncError> {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.commands
            .send(Command::Schedule { draft, generation })
            .map_err(|_| SyncError::SessionClosed)?;
        self.status.send_replace(SaveStatus::Unsaved);
        Ok(())
    }

    /// Save `draft` now, superseding anything pending
    pub async fn flush(&self, draft: PageDocument) -> Result<(), SyncError> {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Flush {
                draft,
                generation,
                reply,
            })
            .map_err(|_| SyncError::SessionClosed)?;
        response.await.map_err(|_| SyncError::SessionClosed)?
    }

    pub fn status(&self) -> SaveStatus {
        self.status.borrow().clone()
    }

    /// Receiver that sees every status change
    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.status.subscribe()
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Worker {
    store: Arc<dyn SiteStore>,
    site_id: String,
    debounce: Duration,
    status: Arc<watch::Sender<SaveStatus>>,
    latest: Arc<AtomicU64>,
}

impl Worker {
    async fn run(self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let mut pending: Option<(PageDocument, u64)> = None;
        let timer = tokio::time::sleep(self.debounce);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Schedule { draft, generation }) => {
                        pending = Some((draft, generation));
                        timer.as_mut().reset(Instant::now() + self.debounce);
                    }
                    Some(Command::Flush { draft, generation, reply }) => {
                        pending = None;
                        let result = self.save(&draft, generation).await;
                        let _ = reply.send(result);
                    }
                    None => break,
                },
                () = &mut timer, if pending.is_some() => {
                    if let Some((draft, generation)) = pending.take() {
                        let _ = self.save(&draft, generation).await;
                    }
                }
            }
        }

        tracing::debug!(site_id = %self.site_id, "autosave task stopped");
    }

    async fn save(&self, draft: &PageDocument, generation: u64) -> Result<(), SyncError> {
        self.status.send_replace(SaveStatus::Saving);

        match self.store.save_draft(&self.site_id, draft).await {
            Ok(()) => {
                let newer = self.latest.load(Ordering::SeqCst) > generation;
                let next = if newer { SaveStatus::Unsaved } else { SaveStatus::Saved };
                self.status.send_replace(next);
                tracing::info!(site_id = %self.site_id, nodes = draft.node_count(), "draft saved");
                Ok(())
            }
            Err(e) => {
                tracing::error!(site_id = %self.site_id, error = %e, "draft save failed");
                self.status.send_replace(SaveStatus::Error(e.to_string()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySiteStore;
    use pagecraft_editor::{ContentNode, NodeKind, PageStyles};

    fn doc(id: &str) -> PageDocument {
        PageDocument::new(vec![ContentNode::new(id, NodeKind::Paragraph)], PageStyles::default())
    }

    fn setup() -> (Arc<InMemorySiteStore>, Autosaver) {
        let store = Arc::new(InMemorySiteStore::new());
        store.insert_site("s1", "Blog", doc("start"));
        let autosaver = Autosaver::spawn(store.clone(), "s1", Duration::from_secs(2));
        (store, autosaver)
    }

    #[tokio::test(start_paused = true)]
    async fn test_saves_after_debounce() {
        let (store, autosaver) = setup();
        autosaver.schedule(doc("a")).unwrap();

        tokio::time::sleep(Duration::from_millis(1900)).await;
        assert_eq!(store.draft_saves(), 0);
        assert_eq!(autosaver.status(), SaveStatus::Unsaved);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(store.draft_saves(), 1);
        assert_eq!(autosaver.status(), SaveStatus::Saved);
        assert_eq!(store.draft("s1").unwrap().content[0].id, "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_draft_restarts_timer() {
        let (store, autosaver) = setup();
        autosaver.schedule(doc("a")).unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        autosaver.schedule(doc("b")).unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(store.draft_saves(), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(store.draft_saves(), 1);
        assert_eq!(store.draft("s1").unwrap().content[0].id, "b");
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_saves_immediately() {
        let (store, autosaver) = setup();
        autosaver.schedule(doc("a")).unwrap();
        autosaver.flush(doc("b")).await.unwrap();

        assert_eq!(store.draft_saves(), 1);
        assert_eq!(autosaver.status(), SaveStatus::Saved);

        // The superseded pending draft is not saved later
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(store.draft_saves(), 1);
        assert_eq!(store.draft("s1").unwrap().content[0].id, "b");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_sets_error_status() {
        let (store, autosaver) = setup();
        store.set_failing(true);

        let result = autosaver.flush(doc("a")).await;
        assert!(result.is_err());
        assert_eq!(autosaver.status().as_str(), "error");

        store.set_failing(false);
        autosaver.schedule(doc("b")).unwrap();
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(autosaver.status(), SaveStatus::Saved);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_during_save_stays_unsaved() {
        let (store, autosaver) = setup();
        store.set_latency(Duration::from_secs(1));

        autosaver.schedule(doc("a")).unwrap();
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(autosaver.status(), SaveStatus::Saving);

        autosaver.schedule(doc("b")).unwrap();
        tokio::time::sleep(Duration::from_millis(1400)).await;
        assert_eq!(store.draft_saves(), 1);
        assert_eq!(autosaver.status(), SaveStatus::Unsaved);

        tokio::time::sleep(Duration::from_millis(2600)).await;
        assert_eq!(store.draft_saves(), 2);
        assert_eq!(autosaver.status(), SaveStatus::Saved);
        assert_eq!(store.draft("s1").unwrap().content[0].id, "b");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SaveStatus::Saving.to_string(), "saving");
        assert_eq!(SaveStatus::Error("boom".into()).to_string(), "error: boom");
    }
}
