//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the filter.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Milliseconds in a fixed 30-day month, the unit bans are configured in.
pub const MONTH_MS: u64 = 30 * 24 * 60 * 60 * 1000;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GuardConfig {
    /// Listener configuration for the demo server.
    pub listener: ListenerConfig,

    /// Admission filter settings.
    pub filter: FilterConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Admission filter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Requests tolerated inside the burst window before a ban.
    pub max_request_count: u32,

    /// Burst window: a request compounds the count only when it lands
    /// within this many milliseconds of the previous one.
    pub request_window_ms: u64,

    /// Ban length in fixed 30-day months.
    pub ban_duration_months: u32,

    /// Exact ban length in milliseconds; overrides `ban_duration_months`
    /// when set (short bans, tests).
    pub ban_duration_ms: Option<u64>,

    /// Deny requests whose source address is malformed instead of passing
    /// them through untracked.
    pub reject_invalid_addresses: bool,

    /// Override of the built-in suspicious path list.
    pub suspicious_paths: Option<Vec<String>>,

    /// File of suspicious paths, one per line; lines not starting with `/`
    /// are ignored. Merged into `suspicious_paths` at load time.
    pub suspicious_paths_file: Option<PathBuf>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_request_count: 5,
            request_window_ms: 10_000,
            ban_duration_months: 1,
            ban_duration_ms: None,
            reject_invalid_addresses: false,
            suspicious_paths: None,
            suspicious_paths_file: None,
        }
    }
}

impl FilterConfig {
    /// Effective ban duration in milliseconds: the exact override when set,
    /// otherwise the month-based setting.
    pub fn effective_ban_duration_ms(&self) -> u64 {
        self.ban_duration_ms
            .unwrap_or(u64::from(self.ban_duration_months) * MONTH_MS)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.max_request_count, 5);
        assert_eq!(config.request_window_ms, 10_000);
        assert_eq!(config.effective_ban_duration_ms(), MONTH_MS);
        assert!(!config.reject_invalid_addresses);
    }

    #[test]
    fn test_ban_duration_override() {
        let config = FilterConfig {
            ban_duration_ms: Some(3_000),
            ..FilterConfig::default()
        };
        assert_eq!(config.effective_ban_duration_ms(), 3_000);

        let config = FilterConfig {
            ban_duration_months: 2,
            ..FilterConfig::default()
        };
        assert_eq!(config.effective_ban_duration_ms(), 2 * MONTH_MS);
    }

    #[test]
    fn test_minimal_toml() {
        let config: GuardConfig = toml::from_str(
            r#"
            [filter]
            max_request_count = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.filter.max_request_count, 2);
        assert_eq!(config.filter.request_window_ms, 10_000);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
