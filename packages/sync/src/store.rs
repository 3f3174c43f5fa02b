//! # Site Store
//!
//! Contract for the remote document store: one draft slot per site plus an
//! append-only list of saved versions.

use crate::SyncError;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pagecraft_editor::{ContentNode, PageDocument, PageStyles};
use serde::{Deserialize, Serialize};

/// Timestamp as written by the backend (`{_seconds, _nanoseconds}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServerTimestamp {
    #[serde(rename = "_seconds")]
    pub seconds: i64,

    #[serde(rename = "_nanoseconds", default)]
    pub nanoseconds: u32,
}

impl ServerTimestamp {
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.seconds, self.nanoseconds).single()
    }
}

impl From<DateTime<Utc>> for ServerTimestamp {
    fn from(time: DateTime<Utc>) -> Self {
        Self {
            seconds: time.timestamp(),
            nanoseconds: time.timestamp_subsec_nanos(),
        }
    }
}

/// A site as returned by `GET /sites/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(
        default,
        deserialize_with = "pagecraft_editor::deserialize_optional_nodes",
        skip_serializing_if = "Option::is_none"
    )]
    pub draft_content: Option<Vec<ContentNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_page_styles: Option<PageStyles>,

    /// Published content
    #[serde(
        default,
        deserialize_with = "pagecraft_editor::deserialize_optional_nodes",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Vec<ContentNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_styles: Option<PageStyles>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SiteRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            draft_content: None,
            draft_page_styles: None,
            content: None,
            page_styles: None,
            status: None,
        }
    }

    /// Document to edit: the draft, else the published content, else empty
    pub fn working_draft(&self) -> PageDocument {
        let content = self
            .draft_content
            .clone()
            .or_else(|| self.content.clone())
            .unwrap_or_default();
        let page_styles = self
            .draft_page_styles
            .clone()
            .or_else(|| self.page_styles.clone())
            .unwrap_or_default();
        PageDocument::new(content, page_styles)
    }
}

/// One saved version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub id: String,

    #[serde(default, deserialize_with = "pagecraft_editor::deserialize_nodes")]
    pub content: Vec<ContentNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_styles: Option<PageStyles>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<ServerTimestamp>,
}

impl VersionRecord {
    pub fn to_document(&self) -> PageDocument {
        PageDocument::new(self.content.clone(), self.page_styles.clone().unwrap_or_default())
    }
}

/// Remote draft and version storage for sites
#[async_trait]
pub trait SiteStore: Send + Sync {
    async fn fetch_site(&self, site_id: &str) -> Result<SiteRecord, SyncError>;

    /// Overwrite the site's draft slot
    async fn save_draft(&self, site_id: &str, draft: &PageDocument) -> Result<(), SyncError>;

    /// Saved versions, newest first
    async fn list_versions(&self, site_id: &str) -> Result<Vec<VersionRecord>, SyncError>;

    /// Record an immutable version; returns its id
    async fn save_version(&self, site_id: &str, draft: &PageDocument) -> Result<String, SyncError>;

    /// Promote `draft` to the live site
    async fn publish(&self, site_id: &str, draft: &PageDocument) -> Result<(), SyncError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_working_draft_prefers_draft() {
        let site: SiteRecord = serde_json::from_value(json!({
            "id": "s1",
            "title": "Blog",
            "draftContent": [ { "id": "d", "type": "paragraph", "styles": {} } ],
            "content": [ { "id": "p", "type": "paragraph", "styles": {} } ],
            "pageStyles": { "color": "#000" }
        }))
        .unwrap();

        let draft = site.working_draft();
        assert_eq!(draft.content[0].id, "d");
        assert_eq!(draft.page_styles.get_str("color"), Some("#000"));
    }

    #[test]
    fn test_working_draft_falls_back_to_empty() {
        let site: SiteRecord = serde_json::from_value(json!({ "id": "s1" })).unwrap();
        let draft = site.working_draft();

        assert!(draft.content.is_empty());
        assert_eq!(draft.page_styles, PageStyles::default());
    }

    #[test]
    fn test_undecodable_draft_node_is_named() {
        let result = serde_json::from_value::<SiteRecord>(json!({
            "id": "s1",
            "draftContent": [
                { "id": "p", "type": "paragraph", "styles": {} },
                { "id": "ticker", "type": "marquee", "styles": {} }
            ]
        }));

        let message = result.unwrap_err().to_string();
        assert!(message.contains("marquee"), "{}", message);
        assert!(message.contains("ticker"), "{}", message);
    }

    #[test]
    fn test_version_record_wire_shape() {
        let version: VersionRecord = serde_json::from_value(json!({
            "id": "v1",
            "content": [],
            "pageStyles": {},
            "savedAt": { "_seconds": 1700000000, "_nanoseconds": 5 }
        }))
        .unwrap();

        let saved_at = version.saved_at.unwrap();
        assert_eq!(saved_at.seconds, 1_700_000_000);
        assert_eq!(saved_at.to_datetime().unwrap().timestamp(), 1_700_000_000);
    }
}
