//! Credential types and error definitions.

use serde::Deserialize;
use thiserror::Error;

/// Google's OAuth2 token endpoint, used when the key file omits `token_uri`.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Scopes required for Realtime Database REST reads.
pub const DATABASE_SCOPES: &str =
    "https://www.googleapis.com/auth/firebase.database https://www.googleapis.com/auth/userinfo.email";

/// The subset of a Google service account key file the bridge needs.
///
/// `Debug` is implemented by hand so the private key never reaches a log line.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccount {
    /// Parse a key file document.
    ///
    /// Keys pasted into environment variables often carry literal `\n`
    /// sequences instead of newlines; those are normalized.
    pub fn from_json(raw: &str) -> FirebaseResult<Self> {
        let mut account: ServiceAccount = serde_json::from_str(raw.trim())
            .map_err(|e| FirebaseError::Config(format!("Invalid service account JSON: {}", e)))?;

        if account.client_email.trim().is_empty() {
            return Err(FirebaseError::Config(
                "Service account is missing client_email".to_string(),
            ));
        }
        if account.private_key.trim().is_empty() {
            return Err(FirebaseError::Config(
                "Service account is missing private_key".to_string(),
            ));
        }
        if account.private_key.contains("\\n") {
            account.private_key = account.private_key.replace("\\n", "\n");
        }

        Ok(account)
    }
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

/// Errors that can occur while talking to Firebase.
#[derive(Debug, Error)]
pub enum FirebaseError {
    /// Credentials or database URL missing or malformed.
    #[error("Firebase not configured: {0}")]
    Config(String),

    /// Signing the token assertion or exchanging it failed.
    #[error("Token exchange failed: {0}")]
    Auth(String),

    /// Transport-level failure (DNS, connect, TLS, timeout).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The database answered with a non-success status.
    #[error("Database returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("Invalid database response: {0}")]
    Decode(String),
}

/// Result type for Firebase operations.
pub type FirebaseResult<T> = Result<T, FirebaseError>;
