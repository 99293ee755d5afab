//! Data models for the bot's managed collections
//!
//! Field names serialize in camelCase so the JSON documents stay readable by
//! the dashboard that consumes them.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp layout used by log entries (local time, second precision).
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A Twitter account monitored by the bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Caller-supplied unique identifier
    pub id: String,
    /// Handle without the leading `@`
    pub username: String,
    /// Display name
    pub name: String,
    /// Avatar URL or reference
    pub avatar: String,
    /// Free-text state label, e.g. "active"
    pub status: String,
    /// When the account was last checked
    pub last_checked: String,
    /// Cumulative likes performed on this account's tweets
    pub tweets_liked: u64,
    /// Cumulative replies posted to this account's tweets
    pub tweets_replied: u64,
}

/// A canned reply the bot can post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTemplate {
    /// Caller-supplied unique identifier
    pub id: String,
    /// Reply text
    pub text: String,
    /// How many times the template has been used
    pub usage_count: u64,
    /// When the template was last used
    #[serde(default)]
    pub last_used: Option<String>,
}

/// Severity labels the dashboard knows how to render.
///
/// Stored entries keep `level` as free text; this enum is what the core
/// itself writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Routine event
    Info,
    /// Something completed as intended
    Success,
    /// Degraded but not failed
    Warning,
    /// Failed operation
    Error,
}

impl LogLevel {
    /// Stored label for this level
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the append-only activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Sequential decimal id, starting at "1"
    pub id: String,
    /// Local time formatted with [`LOG_TIMESTAMP_FORMAT`]
    pub timestamp: String,
    /// Severity label
    pub level: String,
    /// Human-readable event
    pub message: String,
    /// Extra context; serialized as `null` when absent
    #[serde(default)]
    pub details: Option<String>,
}

impl LogEntry {
    /// Build an entry stamped with `now`.
    #[must_use]
    pub fn new(
        id: u64,
        now: DateTime<Local>,
        level: LogLevel,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            timestamp: now.format(LOG_TIMESTAMP_FORMAT).to_string(),
            level: level.as_str().to_string(),
            message: message.into(),
            details,
        }
    }

    /// Numeric value of the id, if it holds a decimal integer.
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        self.id.parse().ok()
    }
}

/// Operator-configurable parameters. Exactly one instance exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Minutes between checks
    pub check_interval: u32,
    /// Daily like budget
    pub max_likes_per_day: u32,
    /// Daily reply budget
    pub max_replies_per_day: u32,
    /// Send notifications to `notification_email`
    pub enable_notifications: bool,
    /// Notification address
    #[serde(default)]
    pub notification_email: Option<String>,
    /// Suspend activity between `pause_start` and `pause_end`
    pub pause_overnight: bool,
    /// Start of the overnight window, `HH:MM`
    #[serde(default)]
    pub pause_start: Option<String>,
    /// End of the overnight window, `HH:MM`
    #[serde(default)]
    pub pause_end: Option<String>,
    /// Platform API key
    pub twitter_api_key: String,
    /// Platform API secret
    pub twitter_api_secret: String,
    /// Platform access token
    pub twitter_access_token: String,
    /// Platform access token secret
    pub twitter_access_token_secret: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            check_interval: 5,
            max_likes_per_day: 50,
            max_replies_per_day: 20,
            enable_notifications: true,
            notification_email: None,
            pause_overnight: false,
            pause_start: Some("22:00".to_string()),
            pause_end: Some("07:00".to_string()),
            twitter_api_key: String::new(),
            twitter_api_secret: String::new(),
            twitter_access_token: String::new(),
            twitter_access_token_secret: String::new(),
        }
    }
}

/// Lifecycle label reported by the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotState {
    /// Automation is running
    Running,
    /// Automation is stopped
    Stopped,
}

/// Result of a start/stop request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResponse {
    /// State after the request
    pub status: BotState,
    /// Operator-facing confirmation
    pub message: String,
}

/// Snapshot returned by a status query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// Current state
    pub status: BotState,
    /// Human-readable time since the last check
    pub last_check: String,
    /// Human-readable time until the next check
    pub next_check: String,
}

/// Confirmation returned by deletes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Operator-facing confirmation
    pub message: String,
}

/// Dashboard totals derived from the accounts and responses collections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Sum of `tweetsLiked` across accounts
    pub total_likes: u64,
    /// Sum of `tweetsReplied` across accounts
    pub total_replies: u64,
    /// Number of managed accounts
    pub accounts_monitored: usize,
    /// Number of response templates
    pub responses_available: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn account_uses_camel_case_fields() {
        let account = Account {
            id: "1".to_string(),
            username: "alice".to_string(),
            name: "Alice".to_string(),
            avatar: "https://example.com/a.png".to_string(),
            status: "active".to_string(),
            last_checked: "2025-01-01 10:00:00".to_string(),
            tweets_liked: 3,
            tweets_replied: 1,
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["lastChecked"], "2025-01-01 10:00:00");
        assert_eq!(value["tweetsLiked"], 3);
        assert_eq!(value["tweetsReplied"], 1);
    }

    #[test]
    fn log_entry_serializes_missing_details_as_null() {
        let now = Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let entry = LogEntry::new(7, now, LogLevel::Info, "hello", None);
        assert_eq!(entry.id, "7");
        assert_eq!(entry.timestamp, "2025-03-04 05:06:07");
        assert_eq!(entry.sequence(), Some(7));

        let value = serde_json::to_value(&entry).unwrap();
        assert!(value["details"].is_null());
    }

    #[test]
    fn response_template_accepts_missing_last_used() {
        let template: ResponseTemplate =
            serde_json::from_str(r#"{"id":"r1","text":"Thanks!","usageCount":0}"#).unwrap();
        assert_eq!(template.last_used, None);
    }

    #[test]
    fn default_settings_match_first_start_values() {
        let settings = Settings::default();
        assert_eq!(settings.check_interval, 5);
        assert_eq!(settings.max_likes_per_day, 50);
        assert_eq!(settings.max_replies_per_day, 20);
        assert!(settings.enable_notifications);
        assert!(!settings.pause_overnight);
        assert_eq!(settings.pause_start.as_deref(), Some("22:00"));
        assert_eq!(settings.pause_end.as_deref(), Some("07:00"));
        assert!(settings.twitter_api_key.is_empty());
    }

    #[test]
    fn bot_state_is_lowercase() {
        assert_eq!(serde_json::to_value(BotState::Running).unwrap(), "running");
        assert_eq!(serde_json::to_value(BotState::Stopped).unwrap(), "stopped");
    }
}
