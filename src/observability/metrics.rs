//! Validation counters
//!
//! - Counters only
//! - Monotonic increase
//! - Thread-safe but lock-free

use std::sync::atomic::{AtomicU64, Ordering};

/// Registry of validation counters.
///
/// Uses Relaxed ordering; counters are independent of each other.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// `verify` calls whose rule chain passed
    verifications_passed: AtomicU64,
    /// `verify` calls that returned an error
    verifications_rejected: AtomicU64,
    /// `verify` calls with an empty rule list
    pass_through_registrations: AtomicU64,
    /// Tables resolved against the schema provider
    schema_lookups: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_verifications_passed(&self) {
        self.verifications_passed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_verifications_rejected(&self) {
        self.verifications_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_pass_through(&self) {
        self.pass_through_registrations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_schema_lookups(&self) {
        self.schema_lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            verifications_passed: self.verifications_passed.load(Ordering::Relaxed),
            verifications_rejected: self.verifications_rejected.load(Ordering::Relaxed),
            pass_through_registrations: self.pass_through_registrations.load(Ordering::Relaxed),
            schema_lookups: self.schema_lookups.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON object
    pub fn to_json(&self) -> String {
        let snapshot = self.snapshot();
        serde_json::json!({
            "pass_through_registrations": snapshot.pass_through_registrations,
            "schema_lookups": snapshot.schema_lookups,
            "verifications_passed": snapshot.verifications_passed,
            "verifications_rejected": snapshot.verifications_rejected,
        })
        .to_string()
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub verifications_passed: u64,
    pub verifications_rejected: u64,
    pub pass_through_registrations: u64,
    pub schema_lookups: u64,
}
