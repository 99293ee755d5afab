//! Twitter Bot API - persistence and audit core
//!
//! Management layer for a Twitter auto-interaction bot: managed accounts,
//! canned response templates, an append-only activity log and operator
//! settings, each stored as a whole JSON document.
//!
//! # Features
//!
//! - Uniform CRUD over the accounts and responses collections
//! - Sequentially numbered audit entry for every mutation
//! - Per-collection locking for read-modify-write cycles
//! - Lenient reads with a strict `inspect` for corruption checks
//! - Stub start/stop/status controls for the automation engine

/// Activity log recorder
pub mod audit;
/// Configuration management
pub mod config;
/// Automation control surface
pub mod control;
/// Error types
pub mod error;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Collection repositories
pub mod repository;
/// Service facade
pub mod service;
/// Settings document service
pub mod settings;
/// JSON document store
pub mod store;
/// Log presentation helpers
pub mod utils;
/// Input validation
pub mod validation;

// Re-export key components for easier access
pub use audit::LogRecorder;
pub use control::{ControlSurface, StubControl};
pub use error::{BotError, ErrorKind, Result};
pub use models::{Account, LogEntry, LogLevel, ResponseTemplate, Settings};
pub use repository::{Repository, AccountRepository, ResponseRepository};
pub use service::BotService;
pub use store::{Collection, DocumentState, DocumentStore, JsonFileBackend, StorageBackend};
