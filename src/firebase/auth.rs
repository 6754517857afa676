//! Service account OAuth2 tokens.
//!
//! # Responsibilities
//! - Sign the RS256 JWT assertion for the service account
//! - Exchange it for an access token at the account's token URI
//! - Reuse the token until shortly before it expires
//!
//! # Security
//! - The private key is only held as a parsed signing key
//! - Tokens and assertions are never logged

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use arc_swap::ArcSwapOption;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::firebase::types::{FirebaseError, FirebaseResult, ServiceAccount, DATABASE_SCOPES};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion (Google's maximum).
const ASSERTION_TTL_SECS: u64 = 3600;

/// Tokens closer than this to expiry are refreshed.
const REFRESH_MARGIN_SECS: u64 = 60;

#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_TTL_SECS
}

#[derive(Debug)]
struct AccessToken {
    value: String,
    expires_at: u64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Expiry instant of a token issued at `now`; the lifetime comes from the
/// token endpoint and is not trusted to be small.
fn token_expiry(now: u64, expires_in: u64) -> u64 {
    now.saturating_add(expires_in)
}

/// Mints and caches access tokens for one service account.
pub struct TokenProvider {
    account: ServiceAccount,
    key: EncodingKey,
    http: reqwest::Client,
    cached: ArcSwapOption<AccessToken>,
}

impl TokenProvider {
    /// Parse the account's private key. A key that isn't RSA PEM is a
    /// configuration failure.
    pub fn new(account: ServiceAccount, http: reqwest::Client) -> FirebaseResult<Self> {
        let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
            .map_err(|e| FirebaseError::Config(format!("Invalid service account key: {}", e)))?;

        Ok(Self {
            account,
            key,
            http,
            cached: ArcSwapOption::empty(),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.account.client_email
    }

    /// Return a valid access token, exchanging a new assertion when the cached
    /// one is missing or about to expire.
    ///
    /// Concurrent callers may both refresh; the last store wins.
    pub async fn access_token(&self) -> FirebaseResult<String> {
        let now = unix_now();
        if let Some(token) = self.cached.load_full() {
            if token.expires_at > now.saturating_add(REFRESH_MARGIN_SECS) {
                return Ok(token.value.clone());
            }
        }

        let token = self.exchange(now).await?;
        let value = token.value.clone();
        self.cached.store(Some(Arc::new(token)));
        Ok(value)
    }

    fn assertion(&self, now: u64) -> FirebaseResult<String> {
        let claims = AssertionClaims {
            iss: self.account.client_email.clone(),
            scope: DATABASE_SCOPES.to_string(),
            aud: self.account.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| FirebaseError::Auth(format!("Failed to sign assertion: {}", e)))
    }

    async fn exchange(&self, now: u64) -> FirebaseResult<AccessToken> {
        let assertion = self.assertion(now)?;

        tracing::debug!(
            client_email = %self.account.client_email,
            token_uri = %self.account.token_uri,
            "Requesting access token"
        );

        let response = self
            .http
            .post(&self.account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FirebaseError::Auth(format!("{}: {}", status, body.trim())));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| FirebaseError::Auth(format!("Invalid token response: {}", e)))?;

        tracing::info!(
            client_email = %self.account.client_email,
            expires_in = token.expires_in,
            "Access token refreshed"
        );

        Ok(AccessToken {
            value: token.access_token,
            expires_at: token_expiry(now, token.expires_in),
        })
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("client_email", &self.account.client_email)
            .field("token_uri", &self.account.token_uri)
            .finish_non_exhaustive()
    }
}
