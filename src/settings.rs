//! Single-document settings service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::audit::LogRecorder;
use crate::error::Result;
use crate::models::{LogLevel, Settings};
use crate::store::{Collection, DocumentStore};

/// Get/replace access to the settings document
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<DocumentStore>,
    recorder: LogRecorder,
}

impl SettingsService {
    /// Service writing through `store` and auditing through `recorder`
    pub fn new(store: Arc<DocumentStore>, recorder: LogRecorder) -> Self {
        Self { store, recorder }
    }

    /// Current settings. Never fails: an unreadable document yields defaults.
    pub async fn get(&self) -> Settings {
        let value = self.store.load(Collection::Settings).await;
        serde_json::from_value(value).unwrap_or_else(|err| {
            warn!(error = %err, "settings document has unexpected shape, using defaults");
            Settings::default()
        })
    }

    /// Overwrite the settings wholesale.
    pub async fn replace(&self, settings: Settings) -> Result<Settings> {
        let _guard = self.store.lock(Collection::Settings).await;
        self.store
            .save(Collection::Settings, &serde_json::to_value(&settings)?)
            .await?;

        info!(
            check_interval = settings.check_interval,
            pause_overnight = settings.pause_overnight,
            "settings replaced"
        );
        self.recorder
            .record_after_commit(LogLevel::Info, "Settings updated", None)
            .await;
        Ok(settings)
    }
}

impl std::fmt::Debug for SettingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsService").finish_non_exhaustive()
    }
}
