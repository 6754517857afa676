//! Firebase bridge (v1)
//!
//! Reads a Firebase Realtime Database subtree and serves it as JSON or as an
//! HTML card list for mobile WebViews.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /history?path=…          ┌──────────┐   ┌──────────┐   ┌───────────────┐
//!     GET /view?path=…&title=…  ──▶│   http   │──▶│ history  │──▶│   firebase    │──▶ Realtime DB
//!                                  │ handlers │   │  reader  │   │ token + REST  │    (REST .json)
//!                                  └────┬─────┘   └──────────┘   └───────────────┘
//!                                       │
//!                                       ▼
//!                                  ┌──────────┐
//!                                  │  render  │  cards + page (HTML)
//!                                  └──────────┘
//!
//!     Cross-cutting: config · observability · lifecycle
//! ```
//!
//! # Environment
//! - `PORT`: listener port (default 3000)
//! - `FIREBASE_DB_URL`: database base URL
//! - `GOOGLE_SERVICE_ACCOUNT_JSON`: service account key document
//! - `BRIDGE_CONFIG`: optional TOML config file
//! - `RUST_LOG`: log filter override

use firebase_bridge::config;
use firebase_bridge::lifecycle::startup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_from_env()?;
    startup::start(config).await
}
