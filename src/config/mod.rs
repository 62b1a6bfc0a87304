//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, resolve path-list file)
//!     → validation.rs (semantic checks)
//!     → GuardConfig (validated, immutable)
//!     → shared with the filter and the HTTP glue
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{FilterConfig, GuardConfig, ListenerConfig, ObservabilityConfig};
