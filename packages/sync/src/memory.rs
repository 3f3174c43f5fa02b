//! In-process [`SiteStore`] for tests and offline use.
//!
//! Behaves like the remote store: the server assigns version ids and
//! timestamps, versions list newest first. Failures and latency can be
//! injected, and draft saves are counted.

use crate::store::{ServerTimestamp, SiteRecord, SiteStore, VersionRecord};
use crate::SyncError;
use async_trait::async_trait;
use pagecraft_editor::PageDocument;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct Inner {
    sites: HashMap<String, SiteRecord>,

    /// Oldest first
    versions: HashMap<String, Vec<VersionRecord>>,

    next_version: u64,
    draft_saves: usize,
    failing: bool,
    latency: Duration,
}

#[derive(Debug, Default)]
pub struct InMemorySiteStore {
    inner: Mutex<Inner>,
}

impl InMemorySiteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a site whose draft is `draft`
    pub fn insert_site(&self, site_id: &str, title: &str, draft: PageDocument) {
        let mut site = SiteRecord::new(site_id, title);
        site.draft_content = Some(draft.content);
        site.draft_page_styles = Some(draft.page_styles);
        site.status = Some("draft".to_string());
        self.lock().sites.insert(site_id.to_string(), site);
    }

    pub fn site(&self, site_id: &str) -> Option<SiteRecord> {
        self.lock().sites.get(site_id).cloned()
    }

    /// Current draft slot of a site
    pub fn draft(&self, site_id: &str) -> Option<PageDocument> {
        self.site(site_id).map(|site| site.working_draft())
    }

    /// Number of successful draft saves so far
    pub fn draft_saves(&self) -> usize {
        self.lock().draft_saves
    }

    /// Make every call fail with a 503 until turned off
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Delay every call by `latency`
    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = latency;
    }

    async fn simulate_network(&self) -> Result<(), SyncError> {
        let (latency, failing) = {
            let inner = self.lock();
            (inner.latency, inner.failing)
        };
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if failing {
            return Err(SyncError::Status {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SiteStore for InMemorySiteStore {
    async fn fetch_site(&self, site_id: &str) -> Result<SiteRecord, SyncError> {
        self.simulate_network().await?;
        self.site(site_id)
            .ok_or_else(|| SyncError::SiteNotFound(site_id.to_string()))
    }

    async fn save_draft(&self, site_id: &str, draft: &PageDocument) -> Result<(), SyncError> {
        self.simulate_network().await?;
        let mut inner = self.lock();
        let site = inner
            .sites
            .get_mut(site_id)
            .ok_or_else(|| SyncError::SiteNotFound(site_id.to_string()))?;

        site.draft_content = Some(draft.content.clone());
        site.draft_page_styles = Some(draft.page_styles.clone());
        inner.draft_saves += 1;
        Ok(())
    }

    async fn list_versions(&self, site_id: &str) -> Result<Vec<VersionRecord>, SyncError> {
        self.simulate_network().await?;
        let inner = self.lock();
        if !inner.sites.contains_key(site_id) {
            return Err(SyncError::SiteNotFound(site_id.to_string()));
        }

        let mut versions = inner.versions.get(site_id).cloned().unwrap_or_default();
        versions.reverse();
        Ok(versions)
    }

    async fn save_version(&self, site_id: &str, draft: &PageDocument) -> Result<String, SyncError> {
        self.simulate_network().await?;
        let mut inner = self.lock();
        if !inner.sites.contains_key(site_id) {
            return Err(SyncError::SiteNotFound(site_id.to_string()));
        }

        inner.next_version += 1;
        let id = format!("version-{}", inner.next_version);
        let record = VersionRecord {
            id: id.clone(),
            content: draft.content.clone(),
            page_styles: Some(draft.page_styles.clone()),
            saved_at: Some(ServerTimestamp::now()),
        };
        inner.versions.entry(site_id.to_string()).or_default().push(record);
        Ok(id)
    }

    async fn publish(&self, site_id: &str, draft: &PageDocument) -> Result<(), SyncError> {
        self.simulate_network().await?;
        let mut inner = self.lock();
        let site = inner
            .sites
            .get_mut(site_id)
            .ok_or_else(|| SyncError::SiteNotFound(site_id.to_string()))?;

        site.draft_content = Some(draft.content.clone());
        site.content = Some(draft.content.clone());
        site.page_styles = site.draft_page_styles.clone();
        site.status = Some("published".to_string());
        Ok(())
    }
}
