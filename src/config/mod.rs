//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (BRIDGE_CONFIG)
//!     → environment overrides (PORT, FIREBASE_DB_URL, GOOGLE_SERVICE_ACCOUNT_JSON)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow an empty environment
//! - Firebase credentials are optional at this layer; the DB routes report
//!   their absence per request

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, ConfigError};
pub use schema::BridgeConfig;
pub use schema::FirebaseConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ViewDefaults;
