//! Firebase Realtime Database → JSON / HTML bridge.

pub mod config;
pub mod firebase;
pub mod history;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;

pub use config::schema::BridgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
