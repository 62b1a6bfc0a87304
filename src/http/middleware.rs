//! Admission middleware.
//! Maps filter decisions onto HTTP responses in front of the application.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::filter::{AdmissionFilter, Decision};
use crate::observability::metrics;

/// Middleware function for request admission.
pub async fn admission_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(filter): State<Arc<AdmissionFilter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match filter.evaluate_ip(addr.ip(), &path) {
        Decision::Allow => {
            metrics::record_decision("allow");
            next.run(request).await
        }
        Decision::Deny => {
            tracing::warn!(client = %addr.ip(), path = %path, "Request denied");
            metrics::record_decision("deny");
            (StatusCode::FORBIDDEN, "Forbidden").into_response()
        }
    }
}
