//! Admission filter orchestration.
//!
//! # State machine (per address)
//! ```text
//! Unknown → Tracked: first suspicious-path hit
//! Tracked → Tracked: each request (burst-window count update)
//! Tracked → Banned:  request_count > max_request_count
//! Banned  → Unknown: expiry timer fires, or an elapsed ban is
//!                    reconciled synchronously on the next request
//! ```
//!
//! # Design Decisions
//! - One mutex around registry + block list + whitelist + timers: the
//!   read-check-ban sequence is atomic, and expiry callbacks serialize
//!   against evaluation for the same address
//! - Elapsed bans are reconciled inline before the block list is consulted,
//!   never by re-entering the evaluation
//! - Malformed addresses are not tracked; policy for them is configurable

use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::FilterConfig;
use crate::filter::blocklist::{BlockList, InMemoryBlockList};
use crate::filter::paths::SuspiciousPathSet;
use crate::filter::registry::{SuspiciousRecord, SuspiciousRegistry};
use crate::filter::scheduler::ExpiryScheduler;
use crate::observability::metrics;

/// Admission decision for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_deny(&self) -> bool {
        matches!(self, Decision::Deny)
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Errors surfaced by the administrative mutators. Request evaluation never
/// returns an error; malformed input degrades to the configured policy.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("invalid address format: {0}")]
    InvalidAddressFormat(String),
}

/// Shared mutable state behind the filter's single lock.
struct FilterState {
    registry: SuspiciousRegistry,
    block_list: Box<dyn BlockList>,
    white_list: HashSet<IpAddr>,
    scheduler: ExpiryScheduler,
}

/// The admission filter: consults whitelist, block list and the suspicious
/// registry in that order and escalates over-threshold addresses to
/// time-bounded bans.
pub struct AdmissionFilter {
    config: FilterConfig,
    paths: SuspiciousPathSet,
    inner: Arc<Mutex<FilterState>>,
}

impl AdmissionFilter {
    /// Create a filter with the default in-memory block list.
    pub fn new(config: FilterConfig) -> Self {
        Self::with_block_list(config, Box::new(InMemoryBlockList::new()))
    }

    /// Create a filter around an externally supplied block-list
    /// collaborator.
    pub fn with_block_list(config: FilterConfig, block_list: Box<dyn BlockList>) -> Self {
        let paths = match &config.suspicious_paths {
            Some(paths) => SuspiciousPathSet::new(paths.iter().cloned()),
            None => SuspiciousPathSet::default(),
        };
        Self {
            config,
            paths,
            inner: Arc::new(Mutex::new(FilterState {
                registry: SuspiciousRegistry::new(),
                block_list,
                white_list: HashSet::new(),
                scheduler: ExpiryScheduler::new(),
            })),
        }
    }

    /// Evaluate a request described by literal address and path.
    pub fn evaluate(&self, address: &str, path: &str) -> Decision {
        self.evaluate_at(address, path, now_ms())
    }

    /// Evaluation with an explicit timestamp (milliseconds since epoch).
    pub fn evaluate_at(&self, address: &str, path: &str, now_ms: u64) -> Decision {
        match address.parse::<IpAddr>() {
            Ok(ip) => self.evaluate_ip_at(ip, path, now_ms),
            Err(_) => {
                if self.config.reject_invalid_addresses {
                    tracing::warn!(address = %address, "Rejecting malformed address");
                    Decision::Deny
                } else {
                    Decision::Allow
                }
            }
        }
    }

    /// Evaluate a request from an already-parsed address.
    pub fn evaluate_ip(&self, address: IpAddr, path: &str) -> Decision {
        self.evaluate_ip_at(address, path, now_ms())
    }

    pub fn evaluate_ip_at(&self, address: IpAddr, path: &str, now_ms: u64) -> Decision {
        let mut state = self.lock();

        // Whitelist overrides everything, including a live block-list entry.
        if state.white_list.contains(&address) {
            return Decision::Allow;
        }

        // A ban whose time has elapsed but whose timer has not fired yet is
        // reconciled here, before the block list is consulted.
        if state
            .registry
            .get(&address)
            .is_some_and(|r| r.ban_elapsed(now_ms))
        {
            Self::unban_locked(&mut state, address, "reconciled");
        }

        if state.block_list.check(address) {
            return Decision::Deny;
        }

        // A banned record stays denied until expiry even when the block-list
        // collaborator records nothing (NoopBlockList); no rate re-evaluation.
        if state.registry.get(&address).is_some_and(|r| r.is_banned()) {
            return Decision::Deny;
        }

        // Untracked, non-suspicious traffic costs no bookkeeping.
        if state.registry.get(&address).is_none() && !self.paths.contains(path) {
            return Decision::Allow;
        }

        let count = state
            .registry
            .observe(address, now_ms, self.config.request_window_ms)
            .request_count();
        metrics::record_tracked(state.registry.len());

        if count > self.config.max_request_count {
            self.ban_locked(&mut state, address, now_ms);
            return Decision::Deny;
        }

        Decision::Allow
    }

    /// Bulk-load externally supplied records (e.g. a warm-start snapshot).
    /// Banned records past expiry are discarded; still-active bans are
    /// loaded with an unban scheduled for their remaining time. Returns the
    /// number of records loaded.
    pub fn initialize(&self, records: Vec<SuspiciousRecord>) -> usize {
        self.initialize_at(records, now_ms())
    }

    pub fn initialize_at(&self, records: Vec<SuspiciousRecord>, now_ms: u64) -> usize {
        let mut state = self.lock();
        let mut loaded = 0;

        for record in records {
            if record.is_banned() {
                if record.ban_elapsed(now_ms) {
                    continue;
                }
                let address = record.address();
                let remaining = Duration::from_millis(record.remaining_ban_ms(now_ms));
                state.block_list.add(address);
                state.registry.insert(record);
                self.schedule_unban(&mut state, address, remaining);
                tracing::info!(address = %address, remaining_ms = remaining.as_millis() as u64, "Loaded active ban");
            } else {
                state.registry.insert(record);
            }
            loaded += 1;
        }

        metrics::record_tracked(state.registry.len());
        loaded
    }

    /// Export the current records: the other half of the persistence seam.
    pub fn snapshot(&self) -> Vec<SuspiciousRecord> {
        self.lock().registry.records().cloned().collect()
    }

    /// Administrative early unban: cancels the pending timer and clears both
    /// stores. Idempotent; returns whether anything was removed.
    pub fn unban(&self, address: &str) -> Result<bool, FilterError> {
        let address = parse_address(address)?;
        let mut state = self.lock();
        Ok(Self::unban_locked(&mut state, address, "manual"))
    }

    pub fn add_to_white_list(&self, address: &str) -> Result<(), FilterError> {
        let address = parse_address(address)?;
        self.lock().white_list.insert(address);
        Ok(())
    }

    pub fn remove_from_white_list(&self, address: &str) -> Result<bool, FilterError> {
        let address = parse_address(address)?;
        Ok(self.lock().white_list.remove(&address))
    }

    pub fn add_to_block_list(&self, address: &str) -> Result<(), FilterError> {
        let address = parse_address(address)?;
        self.lock().block_list.add(address);
        Ok(())
    }

    pub fn remove_from_block_list(&self, address: &str) -> Result<bool, FilterError> {
        let address = parse_address(address)?;
        Ok(self.lock().block_list.remove(address))
    }

    pub fn is_white_listed(&self, address: &str) -> bool {
        address
            .parse::<IpAddr>()
            .map(|ip| self.lock().white_list.contains(&ip))
            .unwrap_or(false)
    }

    pub fn is_blocked(&self, address: &str) -> bool {
        address
            .parse::<IpAddr>()
            .map(|ip| self.lock().block_list.check(ip))
            .unwrap_or(false)
    }

    /// Current tracking record for an address, if any.
    pub fn suspicious_record(&self, address: &str) -> Option<SuspiciousRecord> {
        let ip = address.parse::<IpAddr>().ok()?;
        self.lock().registry.get(&ip).cloned()
    }

    pub fn is_suspicious_path(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Number of addresses currently tracked.
    pub fn tracked_count(&self) -> usize {
        self.lock().registry.len()
    }

    /// Number of pending unban timers.
    pub fn pending_unbans(&self) -> usize {
        self.lock().scheduler.pending()
    }

    fn lock(&self) -> MutexGuard<'_, FilterState> {
        self.inner.lock().expect("admission filter mutex poisoned")
    }

    /// Escalate a tracked record to banned. Caller holds the lock; the
    /// whole read-check-ban sequence happens under it, so two concurrent
    /// over-threshold requests cannot schedule two timers.
    fn ban_locked(&self, state: &mut MutexGuard<'_, FilterState>, address: IpAddr, now_ms: u64) {
        let duration_ms = self.config.effective_ban_duration_ms();
        if let Some(record) = state.registry.get_mut(&address) {
            record.ban(now_ms, duration_ms);
        }
        state.block_list.add(address);
        self.schedule_unban(state, address, Duration::from_millis(duration_ms));

        tracing::warn!(address = %address, duration_ms, "Address banned");
        metrics::record_ban();
    }

    fn schedule_unban(
        &self,
        state: &mut MutexGuard<'_, FilterState>,
        address: IpAddr,
        delay: Duration,
    ) {
        // Weak, not Arc: a pending timer must not keep a dropped filter's
        // state alive.
        let inner = Arc::downgrade(&self.inner);
        state.scheduler.schedule(address, delay, move || {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let mut state = inner.lock().expect("admission filter mutex poisoned");
            // Block list first, then registry: by the time any later check
            // observes the address, both removals have happened.
            let removed = state.block_list.remove(address);
            state.registry.evict(&address);
            state.scheduler.clear(&address);
            metrics::record_tracked(state.registry.len());
            if removed {
                tracing::info!(address = %address, "Ban expired, address unblocked");
                metrics::record_unban("expired");
            }
        });
    }

    fn unban_locked(state: &mut MutexGuard<'_, FilterState>, address: IpAddr, reason: &'static str) -> bool {
        state.scheduler.cancel(&address);
        let removed_block = state.block_list.remove(address);
        let removed_record = state.registry.evict(&address).is_some();
        if removed_block || removed_record {
            metrics::record_tracked(state.registry.len());
            metrics::record_unban(reason);
            tracing::info!(address = %address, reason, "Address unbanned");
        }
        removed_block || removed_record
    }
}

/// Milliseconds since the Unix epoch.
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn parse_address(address: &str) -> Result<IpAddr, FilterError> {
    address
        .parse::<IpAddr>()
        .map_err(|_| FilterError::InvalidAddressFormat(address.to_string()))
}
