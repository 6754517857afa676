//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bridge.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Realtime Database connection settings.
    pub firebase: FirebaseConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Defaults applied to `/view` when the query omits them.
    pub view: ViewDefaults,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Realtime Database connection settings.
///
/// Both values normally come from the environment
/// (`FIREBASE_DB_URL`, `GOOGLE_SERVICE_ACCOUNT_JSON`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FirebaseConfig {
    /// Database base URL, e.g. `https://my-app-default-rtdb.firebaseio.com`.
    pub db_url: Option<String>,

    /// Raw service account JSON document.
    #[serde(skip_serializing)]
    pub service_account_json: Option<String>,

    /// Per-fetch timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            db_url: None,
            service_account_json: None,
            request_timeout_secs: 10,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Presentational defaults for the card view.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewDefaults {
    pub title: String,
    pub sub: String,
    pub unit: String,
    pub amount_key: String,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            title: "Historial".to_string(),
            sub: String::new(),
            unit: String::new(),
            amount_key: "amount".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human format.
    pub json_logs: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "firebase_bridge=info,tower_http=info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
