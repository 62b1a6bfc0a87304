//! Timer-driven ban expiry tests for the admission filter.

use std::time::Duration;

use gatekeeper::config::FilterConfig;
use gatekeeper::filter::{AdmissionFilter, Decision, SuspiciousRecord};

fn short_ban_config(max: u32, ban_ms: u64) -> FilterConfig {
    FilterConfig {
        max_request_count: max,
        ban_duration_ms: Some(ban_ms),
        ..FilterConfig::default()
    }
}

#[tokio::test]
async fn test_ban_expires_without_a_request() {
    let filter = AdmissionFilter::new(short_ban_config(1, 200));

    assert_eq!(filter.evaluate("127.0.0.1", "/admin"), Decision::Allow);
    assert_eq!(filter.evaluate("127.0.0.1", "/admin"), Decision::Deny);
    assert!(filter.is_blocked("127.0.0.1"));
    assert_eq!(filter.pending_unbans(), 1);

    tokio::time::sleep(Duration::from_millis(500)).await;

    // No request needed: the timer alone clears both stores.
    assert!(!filter.is_blocked("127.0.0.1"));
    assert_eq!(filter.tracked_count(), 0);
    assert_eq!(filter.pending_unbans(), 0);
    assert_eq!(filter.evaluate("127.0.0.1", "/home"), Decision::Allow);
}

#[tokio::test]
async fn test_address_can_be_banned_again_after_expiry() {
    let filter = AdmissionFilter::new(short_ban_config(0, 150));

    assert_eq!(filter.evaluate("10.0.0.1", "/admin"), Decision::Deny);
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!filter.is_blocked("10.0.0.1"));

    // Back to Unknown: the next probe starts a fresh cycle.
    assert_eq!(filter.evaluate("10.0.0.1", "/admin"), Decision::Deny);
    assert!(filter.is_blocked("10.0.0.1"));
}

#[tokio::test]
async fn test_initialize_schedules_remaining_time_not_full_duration() {
    // Default months-based duration is 30 days; if initialize scheduled a
    // fresh full ban instead of the remaining time, this test would hang
    // banned far past the sleep below.
    let filter = AdmissionFilter::new(FilterConfig::default());

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64;
    let mut record = SuspiciousRecord::new("10.0.0.2".parse().unwrap(), now - 1_000);
    record.ban(now - 1_000, 1_300); // 300ms of ban left

    assert_eq!(filter.initialize(vec![record]), 1);
    assert!(filter.is_blocked("10.0.0.2"));
    assert_eq!(filter.evaluate("10.0.0.2", "/home"), Decision::Deny);

    tokio::time::sleep(Duration::from_millis(700)).await;

    assert!(!filter.is_blocked("10.0.0.2"));
    assert_eq!(filter.evaluate("10.0.0.2", "/home"), Decision::Allow);
}

#[tokio::test]
async fn test_manual_unban_cancels_the_timer() {
    let filter = AdmissionFilter::new(short_ban_config(0, 60_000));

    assert_eq!(filter.evaluate("10.0.0.3", "/admin"), Decision::Deny);
    assert_eq!(filter.pending_unbans(), 1);

    assert!(filter.unban("10.0.0.3").unwrap());
    assert_eq!(filter.pending_unbans(), 0);
    assert!(!filter.is_blocked("10.0.0.3"));
    assert_eq!(filter.evaluate("10.0.0.3", "/home"), Decision::Allow);
}

#[tokio::test]
async fn test_burst_spacing_avoids_the_ban() {
    // Requests spaced wider than the window never compound the count.
    let filter = AdmissionFilter::new(FilterConfig {
        max_request_count: 2,
        request_window_ms: 50,
        ban_duration_ms: Some(60_000),
        ..FilterConfig::default()
    });

    for _ in 0..4 {
        assert_eq!(filter.evaluate("10.0.0.4", "/admin"), Decision::Allow);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    // The same volume inside the window crosses the threshold.
    assert_eq!(filter.evaluate("10.0.0.4", "/admin"), Decision::Allow);
    assert_eq!(filter.evaluate("10.0.0.4", "/admin"), Decision::Allow);
    assert_eq!(filter.evaluate("10.0.0.4", "/admin"), Decision::Deny);
}
