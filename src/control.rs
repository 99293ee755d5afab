//! Start/stop/status controls for the automation process.
//!
//! Only the contract lives here. [`StubControl`] records the request in the
//! activity log and answers with fixed values; an engine that actually
//! schedules likes and replies would implement [`ControlSurface`] itself,
//! reading [`crate::models::Settings`] for its limits and pause window.

use async_trait::async_trait;

use crate::audit::LogRecorder;
use crate::models::{BotState, ControlResponse, LogLevel, StatusSnapshot};

/// Lifecycle controls of the automation engine
#[async_trait]
pub trait ControlSurface: Send + Sync {
    /// Start automation
    async fn start(&self) -> ControlResponse;
    /// Stop automation
    async fn stop(&self) -> ControlResponse;
    /// Current state
    async fn status(&self) -> StatusSnapshot;
}

/// Control surface with no engine behind it
#[derive(Debug, Clone)]
pub struct StubControl {
    recorder: LogRecorder,
}

impl StubControl {
    /// Stub auditing through `recorder`
    pub const fn new(recorder: LogRecorder) -> Self {
        Self { recorder }
    }
}

#[async_trait]
impl ControlSurface for StubControl {
    async fn start(&self) -> ControlResponse {
        self.recorder
            .record_after_commit(LogLevel::Info, "Bot started", None)
            .await;
        ControlResponse {
            status: BotState::Running,
            message: "Bot started successfully".to_string(),
        }
    }

    async fn stop(&self) -> ControlResponse {
        self.recorder
            .record_after_commit(LogLevel::Info, "Bot stopped", None)
            .await;
        ControlResponse {
            status: BotState::Stopped,
            message: "Bot stopped successfully".to_string(),
        }
    }

    async fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            status: BotState::Running,
            last_check: "5 minutes ago".to_string(),
            next_check: "in 5 minutes".to_string(),
        }
    }
}
