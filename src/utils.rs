//! Utility functions for presenting the activity log.

use crate::models::LogEntry;

/// Keep only entries whose level equals `level`.
///
/// `"all"` (any case) keeps everything, matching the dashboard's filter.
#[must_use]
pub fn filter_by_level(entries: Vec<LogEntry>, level: &str) -> Vec<LogEntry> {
    if level.eq_ignore_ascii_case("all") {
        return entries;
    }
    entries
        .into_iter()
        .filter(|entry| entry.level.eq_ignore_ascii_case(level))
        .collect()
}

/// Render an entry as `[timestamp] [LEVEL] message - details`.
///
/// The ` - details` suffix is omitted when there are no details.
#[must_use]
pub fn format_log_line(entry: &LogEntry) -> String {
    let mut line = format!(
        "[{}] [{}] {}",
        entry.timestamp,
        entry.level.to_uppercase(),
        entry.message
    );
    if let Some(details) = entry.details.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(" - ");
        line.push_str(details);
    }
    line
}
