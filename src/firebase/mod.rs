//! Firebase Realtime Database integration.
//!
//! # Data Flow
//! ```text
//! GOOGLE_SERVICE_ACCOUNT_JSON
//!     → types.rs (ServiceAccount)
//!     → auth.rs (RS256 assertion → OAuth2 access token, cached)
//!     → client.rs (GET {FIREBASE_DB_URL}/{path}.json, bearer auth)
//! ```
//!
//! # Security Constraints
//! - Credentials ONLY from configuration / environment
//! - Never log private keys or access tokens
//! - Every fetch has a timeout; there are no retries

pub mod auth;
pub mod client;
pub mod types;

pub use auth::TokenProvider;
pub use client::RealtimeDb;
pub use types::{FirebaseError, FirebaseResult, ServiceAccount};
