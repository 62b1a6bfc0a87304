//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees syntactically.
//! Returns all validation errors, not just the first.

use std::net::SocketAddr;

use crate::config::schema::GuardConfig;

/// A single semantic configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    ZeroRequestWindow,
    ZeroBanDuration,
    PathMissingSlash(String),
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ZeroRequestWindow => {
                write!(f, "filter.request_window_ms must be greater than zero")
            }
            ValidationError::ZeroBanDuration => {
                write!(f, "effective ban duration must be greater than zero")
            }
            ValidationError::PathMissingSlash(path) => {
                write!(f, "suspicious path '{}' does not start with '/'", path)
            }
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address '{}' is not a socket address", addr)
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "observability.metrics_address '{}' is not a socket address", addr)
            }
        }
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.filter.request_window_ms == 0 {
        errors.push(ValidationError::ZeroRequestWindow);
    }
    if config.filter.effective_ban_duration_ms() == 0 {
        errors.push(ValidationError::ZeroBanDuration);
    }
    if let Some(paths) = &config.filter.suspicious_paths {
        for path in paths {
            if !path.starts_with('/') {
                errors.push(ValidationError::PathMissingSlash(path.clone()));
            }
        }
    }
    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
