//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout)
//! - Resolve the database client once at startup
//! - Serve until the shutdown coordinator fires

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{BridgeConfig, ViewDefaults};
use crate::firebase::RealtimeDb;
use crate::history::HistoryReader;
use crate::http::handlers;
use crate::http::request::{request_id, MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::ApiError;
use crate::lifecycle::shutdown;

/// Database availability, decided once at startup.
#[derive(Debug)]
pub enum DbState {
    Ready(HistoryReader),
    /// Configuration failure; every DB route answers 500 with this message.
    Unavailable(String),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbState>,
    pub view_defaults: Arc<ViewDefaults>,
}

impl AppState {
    pub fn new(db: DbState, view_defaults: ViewDefaults) -> Self {
        Self {
            db: Arc::new(db),
            view_defaults: Arc::new(view_defaults),
        }
    }

    /// Build the Realtime Database client from configuration. Failure is
    /// logged and kept, not fatal.
    pub fn from_config(config: &BridgeConfig) -> Self {
        let db = match RealtimeDb::from_config(&config.firebase) {
            Ok(client) => DbState::Ready(HistoryReader::new(Arc::new(client))),
            Err(e) => {
                tracing::error!(error = %e, "Database unavailable; DB routes will return 500");
                DbState::Unavailable(e.to_string())
            }
        };
        Self::new(db, config.view.clone())
    }

    pub fn reader(&self) -> Result<&HistoryReader, ApiError> {
        match self.db.as_ref() {
            DbState::Ready(reader) => Ok(reader),
            DbState::Unavailable(reason) => Err(ApiError::Unavailable(reason.clone())),
        }
    }
}

/// HTTP server for the bridge.
pub struct HttpServer {
    router: Router,
    config: BridgeConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: BridgeConfig) -> Self {
        let state = AppState::from_config(&config);
        Self::with_state(config, state)
    }

    /// Create a server around an existing state (custom `SubtreeSource`s).
    pub fn with_state(config: BridgeConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &BridgeConfig, state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                request_id = %request_id(req.headers()),
            )
        });

        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/history", get(handlers::history))
            .route("/view", get(handlers::view))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(cors)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(trace)
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait_for(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}
