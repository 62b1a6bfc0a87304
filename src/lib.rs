//! Inbound-request admission filter.
//!
//! Tracks per-address request frequency, watches for probes of
//! known-sensitive paths, and escalates offenders to time-bounded bans.
//! Positioned as middleware in front of an application's routing layer.

pub mod config;
pub mod filter;
pub mod http;
pub mod observability;

pub use config::{FilterConfig, GuardConfig};
pub use filter::{AdmissionFilter, BlockList, Decision, SuspiciousRecord};
pub use http::HttpServer;
