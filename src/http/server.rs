//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the admission middleware wired in
//! - Serve with connection info so the middleware sees real peer addresses
//! - Graceful shutdown on Ctrl+C
//!
//! The handler behind the middleware is a placeholder; in a real deployment
//! the application's own router sits there.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::filter::AdmissionFilter;
use crate::http::middleware::admission_middleware;

/// HTTP server fronted by the admission filter.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around the given filter.
    pub fn new(filter: Arc<AdmissionFilter>) -> Self {
        let router = Router::new()
            .route("/{*path}", any(placeholder_handler))
            .route("/", any(placeholder_handler))
            .layer(middleware::from_fn_with_state(filter, admission_middleware))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Stand-in for the application behind the filter.
async fn placeholder_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
