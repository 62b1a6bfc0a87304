//! Gatekeeper demo entry point.
//!
//! Wires the admission filter in front of a placeholder application:
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                 GATEKEEPER                    │
//!                  │                                               │
//!  Client Request  │  ┌──────────┐   ┌───────────┐   ┌─────────┐  │
//!  ────────────────┼─▶│   http   │──▶│ admission │──▶│   app   │  │
//!                  │  │ listener │   │  filter   │   │ handler │  │
//!                  │  └──────────┘   └─────┬─────┘   └─────────┘  │
//!                  │                       │                      │
//!                  │        ┌──────────────┼──────────────┐       │
//!                  │        ▼              ▼              ▼       │
//!                  │  ┌──────────┐  ┌────────────┐  ┌──────────┐  │
//!                  │  │ registry │  │ block list │  │  expiry  │  │
//!                  │  │ (counts) │  │ (hard deny)│  │  timers  │  │
//!                  │  └──────────┘  └────────────┘  └──────────┘  │
//!                  └──────────────────────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatekeeper::config::{load_config, GuardConfig};
use gatekeeper::filter::AdmissionFilter;
use gatekeeper::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatekeeper=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("gatekeeper v0.1.0 starting");

    // Load configuration (defaults when no path is given)
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => GuardConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_request_count = config.filter.max_request_count,
        request_window_ms = config.filter.request_window_ms,
        ban_duration_ms = config.filter.effective_ban_duration_ms(),
        "Configuration loaded"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            gatekeeper::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server with the filter in front
    let filter = Arc::new(AdmissionFilter::new(config.filter.clone()));
    let server = HttpServer::new(filter);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
