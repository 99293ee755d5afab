//! Append-only activity log.
//!
//! Every mutating operation writes exactly one entry here after its primary
//! change is saved. Entries are numbered `"1"`, `"2"`, ... under the `logs`
//! lock.

use std::sync::Arc;

use chrono::Local;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::Result;
use crate::models::{LogEntry, LogLevel};
use crate::store::{Collection, DocumentStore};
use crate::utils::{filter_by_level, format_log_line};

/// Writes and reads the `logs` collection
#[derive(Clone)]
pub struct LogRecorder {
    store: Arc<DocumentStore>,
}

impl LogRecorder {
    /// Recorder backed by `store`
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Append an entry and return it.
    pub async fn record(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Result<LogEntry> {
        let _guard = self.store.lock(Collection::Logs).await;
        let mut logs = self.store.load_records(Collection::Logs).await;

        let entry = LogEntry::new(next_log_id(&logs), Local::now(), level, message, details);
        logs.push(serde_json::to_value(&entry)?);

        let result = self.store.save(Collection::Logs, &Value::Array(logs)).await;
        self.store
            .metrics()
            .record_audit(level.as_str(), result.is_ok());
        result?;

        debug!(id = %entry.id, level = %entry.level, message = %entry.message, "audit entry recorded");
        Ok(entry)
    }

    /// Append an entry on behalf of an already-committed mutation.
    ///
    /// A failure here cannot undo the mutation, so it is traced instead of
    /// returned.
    pub async fn record_after_commit(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        details: Option<String>,
    ) {
        let message = message.into();
        if let Err(err) = self.record(level, message.clone(), details).await {
            error!(error = %err, %message, "failed to write audit entry");
        }
    }

    /// Full log in storage order. Entries that do not decode are skipped.
    pub async fn list(&self) -> Vec<LogEntry> {
        self.store
            .load_records(Collection::Logs)
            .await
            .into_iter()
            .filter_map(|record| serde_json::from_value(record).ok())
            .collect()
    }

    /// Entries with the given level; `"all"` disables the filter.
    pub async fn list_by_level(&self, level: &str) -> Vec<LogEntry> {
        filter_by_level(self.list().await, level)
    }

    /// The log rendered one line per entry.
    pub async fn export_text(&self) -> String {
        self.list()
            .await
            .iter()
            .map(format_log_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Next id: one past the larger of the entry count and the highest numeric
/// id. Equals `count + 1` for a log this recorder wrote by itself.
fn next_log_id(logs: &[Value]) -> u64 {
    let max_seen = logs
        .iter()
        .filter_map(|record| record.get("id")?.as_str()?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    let count = u64::try_from(logs.len()).unwrap_or(u64::MAX);
    count.max(max_seen).saturating_add(1)
}

impl std::fmt::Debug for LogRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogRecorder").finish_non_exhaustive()
    }
}
