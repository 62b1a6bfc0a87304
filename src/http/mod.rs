//! HTTP glue.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → middleware.rs (peer address + path → filter decision)
//!     → 403 on Deny, pass-through on Allow
//!     → server.rs (router, placeholder application handler)
//! ```
//!
//! This layer is deliberately thin: the filter core never depends on it,
//! and a host application can replace it wholesale.

pub mod middleware;
pub mod server;

pub use middleware::admission_middleware;
pub use server::HttpServer;
