use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use metrics::{counter, histogram};

use crate::store::Collection;

const STORE_OPERATIONS_TOTAL: &str = "twitter_bot_store_operations_total";
const STORE_OPERATION_DURATION: &str = "twitter_bot_store_operation_duration_seconds";
const STORE_ERRORS_TOTAL: &str = "twitter_bot_store_errors_total";
const AUDIT_ENTRIES_TOTAL: &str = "twitter_bot_audit_entries_total";
const AUDIT_FAILURES_TOTAL: &str = "twitter_bot_audit_failures_total";

/// Metrics collection for store and audit activity.
///
/// Totals are kept in-process so callers can inspect them without a
/// recorder; every update is also forwarded to the `metrics` facade.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    store_reads: AtomicU64,
    store_writes: AtomicU64,
    store_errors: AtomicU64,
    audit_entries: AtomicU64,
    audit_failures: AtomicU64,
}

/// Point-in-time copy of the collector's totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Document loads attempted
    pub store_reads: u64,
    /// Document saves attempted
    pub store_writes: u64,
    /// Loads or saves that failed
    pub store_errors: u64,
    /// Audit entries written
    pub audit_entries: u64,
    /// Audit entries that could not be written
    pub audit_failures: u64,
}

impl MetricsCollector {
    /// Record a document load
    pub fn record_store_read(&self, collection: Collection, duration: Duration, success: bool) {
        self.store_reads.fetch_add(1, Ordering::Relaxed);
        self.record_store_operation(collection, "read", duration, success);
    }

    /// Record a document save
    pub fn record_store_write(&self, collection: Collection, duration: Duration, success: bool) {
        self.store_writes.fetch_add(1, Ordering::Relaxed);
        self.record_store_operation(collection, "write", duration, success);
    }

    fn record_store_operation(
        &self,
        collection: Collection,
        operation: &'static str,
        duration: Duration,
        success: bool,
    ) {
        let status = if success { "success" } else { "error" };
        counter!(
            STORE_OPERATIONS_TOTAL,
            "collection" => collection.name(),
            "operation" => operation,
            "status" => status
        )
        .increment(1);
        histogram!(
            STORE_OPERATION_DURATION,
            "collection" => collection.name(),
            "operation" => operation
        )
        .record(duration.as_secs_f64());

        if !success {
            self.store_errors.fetch_add(1, Ordering::Relaxed);
            counter!(STORE_ERRORS_TOTAL, "collection" => collection.name()).increment(1);
        }
    }

    /// Record the outcome of an audit write
    pub fn record_audit(&self, level: &str, success: bool) {
        if success {
            self.audit_entries.fetch_add(1, Ordering::Relaxed);
            counter!(AUDIT_ENTRIES_TOTAL, "level" => level.to_string()).increment(1);
        } else {
            self.audit_failures.fetch_add(1, Ordering::Relaxed);
            counter!(AUDIT_FAILURES_TOTAL).increment(1);
        }
    }

    /// Current totals
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            store_reads: self.store_reads.load(Ordering::Relaxed),
            store_writes: self.store_writes.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
            audit_entries: self.audit_entries.load(Ordering::Relaxed),
            audit_failures: self.audit_failures.load(Ordering::Relaxed),
        }
    }
}
