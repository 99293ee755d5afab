//! Error types for the twitter-bot-api library.
//!
//! This module provides custom error types using `thiserror`. Boundary layers
//! (the CLI, or an HTTP front end) map them through [`BotError::kind`] and
//! [`BotError::user_message`] instead of matching on variants.

use thiserror::Error;

use crate::store::Collection;

/// Errors that can occur in the twitter-bot-api library.
#[derive(Error, Debug)]
pub enum BotError {
    /// Update or delete target id is absent from its collection
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "account"
        kind: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// A collection could not be written back to storage
    #[error("Failed to persist {collection}: {reason}")]
    Persistence {
        /// Collection whose save failed
        collection: Collection,
        /// Underlying cause
        reason: String,
    },

    /// Payload does not match the expected entity shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of [`BotError`] for boundary mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No such resource
    NotFound,
    /// The underlying save did not complete
    PersistenceFailure,
    /// Rejected by boundary validation
    MalformedInput,
    /// Anything else
    Internal,
}

impl BotError {
    /// Build a [`BotError::Persistence`] from any displayable cause.
    pub fn persistence(collection: Collection, reason: impl std::fmt::Display) -> Self {
        Self::Persistence {
            collection,
            reason: reason.to_string(),
        }
    }

    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Persistence { .. } => ErrorKind::PersistenceFailure,
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            Self::Io(_) | Self::Serialization(_) | Self::InvalidConfig(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to show to an operator. Never includes paths or causes.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { .. } => "No such resource".to_string(),
            Self::MalformedInput(reason) => reason.clone(),
            _ => "Operation could not be completed".to_string(),
        }
    }
}

/// Convenience type alias for Result with BotError
pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_no_such_resource() {
        let err = BotError::NotFound {
            kind: "account",
            id: "42".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.user_message(), "No such resource");
        assert_eq!(err.to_string(), "account not found: 42");
    }

    #[test]
    fn persistence_hides_reason_from_user() {
        let err = BotError::persistence(Collection::Logs, "disk full");
        assert_eq!(err.kind(), ErrorKind::PersistenceFailure);
        assert_eq!(err.user_message(), "Operation could not be completed");
        assert!(err.to_string().contains("disk full"));
    }
}
