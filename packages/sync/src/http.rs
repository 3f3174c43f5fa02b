//! HTTP implementation of [`SiteStore`] against the site builder's JSON API.

use crate::store::{SiteRecord, SiteStore, VersionRecord};
use crate::SyncError;
use async_trait::async_trait;
use pagecraft_editor::{ContentNode, PageDocument};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of the bearer credential sent with every request
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed credential, e.g. from a CLI flag
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone().filter(|token| !token.is_empty())
    }
}

pub struct HttpSiteStore {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

#[derive(Deserialize)]
struct VersionList {
    #[serde(default)]
    history: Vec<VersionRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedVersion {
    history_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishRequest<'a> {
    draft_content: &'a [ContentNode],
    publish: bool,
}

impl HttpSiteStore {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Result<Self, SyncError> {
        Self::with_timeout(base_url, credentials, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Duration,
    ) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the credential, send, and map failures by status
    async fn execute(&self, request: RequestBuilder, site_id: &str) -> Result<reqwest::Response, SyncError> {
        let token = self.credentials.bearer_token().ok_or(SyncError::Unauthenticated)?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify(status, &body, site_id))
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder, site_id: &str) -> Result<T, SyncError> {
        let response = self.execute(request, site_id).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl SiteStore for HttpSiteStore {
    async fn fetch_site(&self, site_id: &str) -> Result<SiteRecord, SyncError> {
        let request = self.client.get(self.url(&format!("sites/{}", site_id)));
        self.execute_json(request, site_id).await
    }

    async fn save_draft(&self, site_id: &str, draft: &PageDocument) -> Result<(), SyncError> {
        let request = self.client.put(self.url(&format!("sites/{}", site_id))).json(draft);
        self.execute(request, site_id).await?;
        tracing::debug!(site_id, "draft uploaded");
        Ok(())
    }

    async fn list_versions(&self, site_id: &str) -> Result<Vec<VersionRecord>, SyncError> {
        let request = self.client.get(self.url(&format!("sites/{}/history", site_id)));
        let list: VersionList = self.execute_json(request, site_id).await?;
        Ok(list.history)
    }

    async fn save_version(&self, site_id: &str, draft: &PageDocument) -> Result<String, SyncError> {
        let request = self
            .client
            .post(self.url(&format!("sites/{}/history", site_id)))
            .json(draft);
        let saved: SavedVersion = self.execute_json(request, site_id).await?;
        Ok(saved.history_id)
    }

    async fn publish(&self, site_id: &str, draft: &PageDocument) -> Result<(), SyncError> {
        let body = PublishRequest {
            draft_content: &draft.content,
            publish: true,
        };
        let request = self.client.patch(self.url(&format!("editor/{}", site_id))).json(&body);
        self.execute(request, site_id).await?;
        Ok(())
    }
}

/// Map a failed response to a typed error
fn classify(status: StatusCode, body: &str, site_id: &str) -> SyncError {
    match status {
        StatusCode::UNAUTHORIZED => SyncError::Unauthenticated,
        StatusCode::FORBIDDEN => SyncError::Forbidden(error_message(body)),
        StatusCode::NOT_FOUND => SyncError::SiteNotFound(site_id.to_string()),
        _ => SyncError::Status {
            status: status.as_u16(),
            message: error_message(body),
        },
    }
}

/// `{"error": ...}` or `{"message": ...}` from the body, else the raw text
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(message) = map.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let store = HttpSiteStore::new("http://localhost:3000/api/", Arc::new(StaticToken::none())).unwrap();
        assert_eq!(store.url("sites/abc"), "http://localhost:3000/api/sites/abc");
        assert_eq!(store.url("/editor/abc"), "http://localhost:3000/api/editor/abc");
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            classify(StatusCode::UNAUTHORIZED, "", "s"),
            SyncError::Unauthenticated
        ));
        assert!(matches!(
            classify(StatusCode::FORBIDDEN, r#"{"error": "Forbidden"}"#, "s"),
            SyncError::Forbidden(ref m) if m == "Forbidden"
        ));
        assert!(matches!(
            classify(StatusCode::NOT_FOUND, "", "s1"),
            SyncError::SiteNotFound(ref id) if id == "s1"
        ));
        assert!(matches!(
            classify(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message": "Internal Server Error"}"#, "s"),
            SyncError::Status { status: 500, ref message } if message == "Internal Server Error"
        ));
    }

    #[test]
    fn test_error_message_falls_back_to_text() {
        assert_eq!(error_message("  gateway timeout \n"), "gateway timeout");
        assert_eq!(error_message(r#"{"other": 1}"#), r#"{"other": 1}"#);
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        assert_eq!(StaticToken::new("").bearer_token(), None);
        assert_eq!(StaticToken::new("abc").bearer_token().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_request() {
        let store = HttpSiteStore::new("http://127.0.0.1:9", Arc::new(StaticToken::none())).unwrap();
        let result = store.fetch_site("abc").await;
        assert!(matches!(result, Err(SyncError::Unauthenticated)));
    }
}
