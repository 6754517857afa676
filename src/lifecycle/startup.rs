//! Startup orchestration.
//!
//! # Responsibilities
//! - Install logging and (optionally) metrics
//! - Bind the listener
//! - Connect OS signals to the shutdown coordinator
//! - Run the HTTP server until shutdown
//!
//! # Design Decisions
//! - Fail fast on listener errors; a broken database config is not fatal
//! - The listener starts last

use tokio::net::TcpListener;

use crate::config::BridgeConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_listener;
use crate::observability::{logging, metrics};

/// Start every subsystem and serve until SIGINT/SIGTERM.
pub async fn start(config: BridgeConfig) -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        db_url = config.firebase.db_url.as_deref().unwrap_or("unset"),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config);
    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Bridge listening");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
