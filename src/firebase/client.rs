//! Realtime Database REST client.
//!
//! # Responsibilities
//! - Build `{db_url}/{path}.json` URLs
//! - Attach the service account access token
//! - Map non-success statuses and bad bodies to `FirebaseError`

use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::Value;
use url::Url;

use crate::config::FirebaseConfig;
use crate::firebase::auth::TokenProvider;
use crate::firebase::types::{FirebaseError, FirebaseResult, ServiceAccount};
use crate::history::{DbPath, SubtreeSource};
use crate::observability::metrics;

/// Read-only Realtime Database client.
pub struct RealtimeDb {
    base_url: String,
    auth: Option<TokenProvider>,
    http: reqwest::Client,
    timeout: Duration,
}

impl RealtimeDb {
    /// Create a client for `db_url`.
    ///
    /// Without `auth` requests are sent anonymously, which only works against
    /// publicly readable databases or the local emulator.
    pub fn new(
        db_url: &str,
        auth: Option<TokenProvider>,
        http: reqwest::Client,
        timeout: Duration,
    ) -> FirebaseResult<Self> {
        let parsed: Url = db_url
            .trim()
            .parse()
            .map_err(|e| FirebaseError::Config(format!("Invalid database URL '{}': {}", db_url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FirebaseError::Config(format!(
                "Database URL must be http(s), got '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            auth,
            http,
            timeout,
        })
    }

    /// Build an authenticated client from configuration. Both the database URL
    /// and the service account are required.
    pub fn from_config(config: &FirebaseConfig) -> FirebaseResult<Self> {
        let db_url = config
            .db_url
            .as_deref()
            .ok_or_else(|| FirebaseError::Config("FIREBASE_DB_URL is not set".to_string()))?;

        let raw_account = config.service_account_json.as_deref().ok_or_else(|| {
            FirebaseError::Config("GOOGLE_SERVICE_ACCOUNT_JSON is not set".to_string())
        })?;

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FirebaseError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let account = ServiceAccount::from_json(raw_account)?;
        let auth = TokenProvider::new(account, http.clone())?;

        let client = Self::new(db_url, Some(auth), http, timeout)?;
        tracing::info!(
            db_url = %client.base_url,
            client_email = client.auth.as_ref().map(|a| a.client_email()).unwrap_or("none"),
            "Realtime Database client initialized"
        );
        Ok(client)
    }

    /// REST URL of the node at `path`.
    pub fn node_url(&self, path: &DbPath) -> String {
        format!("{}/{}.json", self.base_url, path)
    }

    /// Fetch the full value stored at `path`. A missing node is `Value::Null`.
    pub async fn get(&self, path: &DbPath) -> FirebaseResult<Value> {
        let result = self.get_inner(path).await;
        metrics::record_firebase_fetch(result.is_ok());
        if let Err(e) = &result {
            tracing::warn!(path = %path, error = %e, "Database fetch failed");
        }
        result
    }

    async fn get_inner(&self, path: &DbPath) -> FirebaseResult<Value> {
        let mut request = self.http.get(self.node_url(path)).timeout(self.timeout);
        if let Some(auth) = &self.auth {
            request = request.bearer_auth(auth.access_token().await?);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FirebaseError::Status {
                status: status.as_u16(),
                body: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| FirebaseError::Decode(e.to_string()))
    }
}

impl SubtreeSource for RealtimeDb {
    fn fetch<'a>(&'a self, path: &'a DbPath) -> BoxFuture<'a, FirebaseResult<Value>> {
        Box::pin(self.get(path))
    }
}

impl std::fmt::Debug for RealtimeDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeDb")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Firebase reports failures as `{"error": "..."}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::validate_path;

    fn anonymous(url: &str) -> FirebaseResult<RealtimeDb> {
        RealtimeDb::new(url, None, reqwest::Client::new(), Duration::from_secs(1))
    }

    #[test]
    fn test_node_url() {
        let db = anonymous("https://demo-default-rtdb.firebaseio.com/").unwrap();
        let path = validate_path("/History/Id123/").unwrap();
        assert_eq!(
            db.node_url(&path),
            "https://demo-default-rtdb.firebaseio.com/History/Id123.json"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(anonymous("not a url"), Err(FirebaseError::Config(_))));
        assert!(matches!(
            anonymous("ftp://demo.firebaseio.com"),
            Err(FirebaseError::Config(_))
        ));
    }

    #[test]
    fn test_from_config_requires_both_values() {
        let mut config = FirebaseConfig::default();
        let err = RealtimeDb::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("FIREBASE_DB_URL"));

        config.db_url = Some("https://demo.firebaseio.com".into());
        let err = RealtimeDb::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_SERVICE_ACCOUNT_JSON"));

        config.service_account_json = Some("{broken".into());
        let err = RealtimeDb::from_config(&config).unwrap_err();
        assert!(matches!(err, FirebaseError::Config(_)));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"error": "Permission denied"}"#), "Permission denied");
        assert_eq!(error_message(" Bad Gateway \n"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_unreachable_database() {
        let db = anonymous("http://127.0.0.1:1").unwrap();
        let path = validate_path("History").unwrap();
        let err = db.get(&path).await.unwrap_err();
        assert!(matches!(err, FirebaseError::Transport(_)));
    }
}
