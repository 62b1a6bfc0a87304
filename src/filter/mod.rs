//! Admission filtering subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (address, path):
//!     → address.rs (syntactic validation, family)
//!     → admission.rs (whitelist → block list → registry, in that order)
//!     → registry.rs (burst-window count update)
//!     → blocklist.rs + scheduler.rs (on escalation: ban + unban timer)
//!     → Decision returned to the caller
//! ```
//!
//! # Design Decisions
//! - The filter only decides; enforcement (response codes, connection
//!   handling) belongs to the hosting layer
//! - Block list and registry are consistent at every decision point; the
//!   only slack is the scheduler's firing latency, closed by inline
//!   reconciliation of elapsed bans
//! - No process-wide state: everything hangs off the AdmissionFilter

pub mod address;
pub mod admission;
pub mod blocklist;
pub mod paths;
pub mod registry;
pub mod scheduler;

pub use address::{classify, is_valid, AddressFamily};
pub use admission::{AdmissionFilter, Decision, FilterError};
pub use blocklist::{BlockList, InMemoryBlockList, NoopBlockList};
pub use paths::{SuspiciousPathSet, DEFAULT_SUSPICIOUS_PATHS};
pub use registry::{SuspiciousRecord, SuspiciousRegistry};
pub use scheduler::ExpiryScheduler;
