//! Facade wiring the store, audit log, repositories, settings and control.

use crate::audit::LogRecorder;
use crate::control::{ControlSurface, StubControl};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{LogEntry, LogLevel, StatsSummary};
use crate::repository::{AccountRepository, Repository, ResponseRepository};
use crate::settings::SettingsService;
use crate::store::DocumentStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Everything a front end needs, wired over one [`DocumentStore`].
pub struct BotService {
    store: Arc<DocumentStore>,
    recorder: LogRecorder,
    accounts: AccountRepository,
    responses: ResponseRepository,
    settings: SettingsService,
    control: Box<dyn ControlSurface>,
}

impl BotService {
    /// Service over an existing store, with the stub control surface
    pub fn new(store: Arc<DocumentStore>) -> Self {
        let control = Box::new(StubControl::new(LogRecorder::new(Arc::clone(&store))));
        Self::with_control(store, control)
    }

    /// Service over JSON files in `data_dir`
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(DocumentStore::open(data_dir)))
    }

    /// Service driving a custom control surface
    pub fn with_control(store: Arc<DocumentStore>, control: Box<dyn ControlSurface>) -> Self {
        let recorder = LogRecorder::new(Arc::clone(&store));
        Self {
            accounts: AccountRepository::new(Arc::clone(&store), recorder.clone()),
            responses: ResponseRepository::new(Arc::clone(&store), recorder.clone()),
            settings: SettingsService::new(Arc::clone(&store), recorder.clone()),
            recorder,
            control,
            store,
        }
    }

    /// Create missing documents and record the startup event.
    pub async fn startup(&self) -> Result<LogEntry> {
        self.store.initialize().await?;
        info!("API server started");
        self.recorder
            .record(
                LogLevel::Info,
                "API server started",
                Some("Twitter automatic interaction bot API server started".to_string()),
            )
            .await
    }

    /// Create missing documents without recording anything.
    pub async fn initialize(&self) -> Result<()> {
        self.store.initialize().await
    }

    /// Dashboard totals
    pub async fn stats(&self) -> StatsSummary {
        let accounts = self.accounts.list().await;
        let responses = self.responses.list().await;
        StatsSummary {
            total_likes: accounts.iter().map(|a| a.tweets_liked).sum(),
            total_replies: accounts.iter().map(|a| a.tweets_replied).sum(),
            accounts_monitored: accounts.len(),
            responses_available: responses.len(),
        }
    }

    /// Accounts collection
    #[must_use]
    pub const fn accounts(&self) -> &AccountRepository {
        &self.accounts
    }

    /// Response templates collection
    #[must_use]
    pub const fn responses(&self) -> &ResponseRepository {
        &self.responses
    }

    /// Activity log
    #[must_use]
    pub const fn logs(&self) -> &LogRecorder {
        &self.recorder
    }

    /// Settings document
    #[must_use]
    pub const fn settings(&self) -> &SettingsService {
        &self.settings
    }

    /// Automation controls
    #[must_use]
    pub fn control(&self) -> &dyn ControlSurface {
        self.control.as_ref()
    }

    /// Store and audit metrics
    #[must_use]
    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        self.store.metrics()
    }
}
