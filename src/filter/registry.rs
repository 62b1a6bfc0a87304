//! Suspicious request tracking.
//!
//! One record per tracked address: request count, last-seen time, ban state.
//! The registry owns the records; escalation policy (when a count becomes a
//! ban) belongs to the admission filter.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::filter::address::AddressFamily;

/// Tracking record for one address.
///
/// Timestamps are milliseconds since the Unix epoch. `ban_expiry_ms` is set
/// exactly when `banned` is, and `request_count` never decreases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspiciousRecord {
    address: IpAddr,
    family: AddressFamily,
    request_count: u32,
    last_request_ms: u64,
    #[serde(default)]
    banned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ban_expiry_ms: Option<u64>,
}

impl SuspiciousRecord {
    /// Create a record for a first observed request.
    pub fn new(address: IpAddr, now_ms: u64) -> Self {
        Self {
            address,
            family: AddressFamily::of(&address),
            request_count: 1,
            last_request_ms: now_ms,
            banned: false,
            ban_expiry_ms: None,
        }
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn request_count(&self) -> u32 {
        self.request_count
    }

    pub fn last_request_ms(&self) -> u64 {
        self.last_request_ms
    }

    pub fn is_banned(&self) -> bool {
        self.banned
    }

    pub fn ban_expiry_ms(&self) -> Option<u64> {
        self.ban_expiry_ms
    }

    /// Apply one observed request: the count compounds only when the request
    /// lands within `window_ms` of the previous one (a burst window, not a
    /// fixed counter); the last-seen time always advances.
    pub(crate) fn observe(&mut self, now_ms: u64, window_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.last_request_ms);
        if !self.banned && elapsed <= window_ms {
            self.request_count += 1;
        }
        self.last_request_ms = now_ms;
    }

    /// Mark the record banned until `now_ms + duration_ms`.
    pub fn ban(&mut self, now_ms: u64, duration_ms: u64) {
        self.banned = true;
        self.ban_expiry_ms = Some(now_ms + duration_ms);
    }

    /// True when the record is banned and its ban window has elapsed.
    /// A banned record without an expiry is malformed snapshot input and is
    /// treated as already elapsed.
    pub fn ban_elapsed(&self, now_ms: u64) -> bool {
        self.banned && self.ban_expiry_ms.map_or(true, |expiry| expiry <= now_ms)
    }

    /// Milliseconds of ban remaining, zero once elapsed.
    pub fn remaining_ban_ms(&self, now_ms: u64) -> u64 {
        self.ban_expiry_ms
            .map(|expiry| expiry.saturating_sub(now_ms))
            .unwrap_or(0)
    }
}

/// Map of address to tracking record.
#[derive(Debug, Default)]
pub struct SuspiciousRegistry {
    records: HashMap<IpAddr, SuspiciousRecord>,
}

impl SuspiciousRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, address: &IpAddr) -> Option<&SuspiciousRecord> {
        self.records.get(address)
    }

    pub fn get_mut(&mut self, address: &IpAddr) -> Option<&mut SuspiciousRecord> {
        self.records.get_mut(address)
    }

    /// Upsert on request: create a fresh record (count 1) for an unknown
    /// address, otherwise apply the burst-window update.
    pub fn observe(&mut self, address: IpAddr, now_ms: u64, window_ms: u64) -> &SuspiciousRecord {
        match self.records.entry(address) {
            Entry::Occupied(entry) => {
                let record = entry.into_mut();
                record.observe(now_ms, window_ms);
                record
            }
            Entry::Vacant(entry) => entry.insert(SuspiciousRecord::new(address, now_ms)),
        }
    }

    /// Bulk-load seam: insert an externally supplied record as-is.
    pub fn insert(&mut self, record: SuspiciousRecord) {
        self.records.insert(record.address(), record);
    }

    /// Remove a record entirely. Driven by expiry, never by plain tracking.
    pub fn evict(&mut self, address: &IpAddr) -> Option<SuspiciousRecord> {
        self.records.remove(address)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &SuspiciousRecord> {
        self.records.values()
    }
}
