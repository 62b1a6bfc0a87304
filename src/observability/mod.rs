//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Filter and glue produce:
//!     → tracing events (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout via tracing-subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod metrics;
