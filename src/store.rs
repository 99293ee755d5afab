//! Document store for the bot's named JSON collections.
//!
//! Each collection is one whole-file JSON document. Reads are lenient: a
//! missing, unreadable or corrupt document loads as the collection's empty
//! value. [`DocumentStore::inspect`] is the strict variant for callers that
//! need to tell those cases apart.
//!
//! Every collection owns one async mutex. Services hold it for the whole
//! load, mutate, save and audit cycle so two writers in the same process never
//! overwrite each other.

use std::fmt;
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::error::{BotError, Result};
use crate::logging::OperationTimer;
use crate::metrics::MetricsCollector;
use crate::models::Settings;

/// The four persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Managed accounts (array)
    Accounts,
    /// Response templates (array)
    Responses,
    /// Activity log (array)
    Logs,
    /// Operator settings (single object)
    Settings,
}

impl Collection {
    /// Every collection, in initialization order
    pub const ALL: [Self; 4] = [Self::Accounts, Self::Responses, Self::Logs, Self::Settings];

    /// Collection name, also the backing file stem
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Responses => "responses",
            Self::Logs => "logs",
            Self::Settings => "settings",
        }
    }

    /// Backing file name, e.g. `accounts.json`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }

    /// Value a fresh or unreadable document is treated as
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self {
            Self::Settings => serde_json::to_value(Settings::default()).unwrap_or_default(),
            _ => Value::Array(Vec::new()),
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Accounts => 0,
            Self::Responses => 1,
            Self::Logs => 2,
            Self::Settings => 3,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strict view of a stored document
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentState {
    /// No backing document exists yet
    Missing,
    /// The document exists but could not be read
    Unreadable(String),
    /// The document was read but is not valid JSON
    Corrupted(String),
    /// The decoded document
    Present(Value),
}

/// Raw storage for collection documents.
///
/// `read` returns `Ok(None)` when the document does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the raw document text
    async fn read(&self, collection: Collection) -> Result<Option<String>>;
    /// Replace the document with `contents`
    async fn write(&self, collection: Collection, contents: String) -> Result<()>;
}

/// Stores each collection as `<data_dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    /// Backend rooted at `data_dir`. The directory is created on first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of a collection's backing file
    #[must_use]
    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }
}

#[async_trait]
impl StorageBackend for JsonFileBackend {
    async fn read(&self, collection: Collection) -> Result<Option<String>> {
        let path = self.path_for(collection);
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == IoErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Atomically write the document (temp file + rename).
    async fn write(&self, collection: Collection, contents: String) -> Result<()> {
        fs::create_dir_all(&self.data_dir).await?;
        let path = self.path_for(collection);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, contents).await?;
        if let Err(err) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(err.into());
        }
        Ok(())
    }
}

struct CollectionLocks([Mutex<()>; 4]);

impl CollectionLocks {
    fn new() -> Self {
        Self(std::array::from_fn(|_| Mutex::new(())))
    }

    async fn acquire(&self, collection: Collection) -> MutexGuard<'_, ()> {
        self.0[collection.index()].lock().await
    }
}

/// Load/save access to the named collections.
pub struct DocumentStore {
    backend: Arc<dyn StorageBackend>,
    locks: CollectionLocks,
    metrics: Arc<MetricsCollector>,
}

impl DocumentStore {
    /// Store over an arbitrary backend
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            locks: CollectionLocks::new(),
            metrics: Arc::new(MetricsCollector::default()),
        }
    }

    /// Store over JSON files in `data_dir`
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileBackend::new(data_dir)))
    }

    /// Metrics fed by this store and its services
    #[must_use]
    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics
    }

    /// Exclusive access to `collection` for a read-modify-write cycle.
    ///
    /// Callers that also write an audit entry must take their own collection
    /// first and `logs` second.
    pub async fn lock(&self, collection: Collection) -> MutexGuard<'_, ()> {
        self.locks.acquire(collection).await
    }

    /// Read a document without any fallback.
    pub async fn inspect(&self, collection: Collection) -> DocumentState {
        let timer = OperationTimer::new("store.read", collection.name());
        let state = match self.backend.read(collection).await {
            Ok(None) => DocumentState::Missing,
            Ok(Some(contents)) => match serde_json::from_str(&contents) {
                Ok(value) => DocumentState::Present(value),
                Err(err) => DocumentState::Corrupted(err.to_string()),
            },
            Err(err) => DocumentState::Unreadable(err.to_string()),
        };
        let success = matches!(state, DocumentState::Present(_) | DocumentState::Missing);
        self.metrics
            .record_store_read(collection, timer.finish(), success);
        state
    }

    /// Read a document, substituting the collection's empty value when it
    /// is missing, unreadable or corrupt.
    pub async fn load(&self, collection: Collection) -> Value {
        match self.inspect(collection).await {
            DocumentState::Present(value) => value,
            DocumentState::Missing => {
                warn!(collection = %collection, "document missing, using empty value");
                collection.default_value()
            }
            DocumentState::Unreadable(reason) => {
                warn!(collection = %collection, %reason, "document unreadable, using empty value");
                collection.default_value()
            }
            DocumentState::Corrupted(reason) => {
                warn!(collection = %collection, %reason, "document corrupted, using empty value");
                collection.default_value()
            }
        }
    }

    /// Load an array collection as raw records.
    ///
    /// A document that is valid JSON but not an array is treated like a
    /// corrupt one.
    pub async fn load_records(&self, collection: Collection) -> Vec<Value> {
        match self.load(collection).await {
            Value::Array(records) => records,
            other => {
                warn!(
                    collection = %collection,
                    found = json_kind(&other),
                    "expected an array document, using empty collection"
                );
                Vec::new()
            }
        }
    }

    /// Serialize `value` and replace the stored document.
    pub async fn save(&self, collection: Collection, value: &Value) -> Result<()> {
        let timer = OperationTimer::new("store.write", collection.name());
        let result = self.write_document(collection, value).await;
        self.metrics
            .record_store_write(collection, timer.finish(), result.is_ok());
        if let Err(err) = &result {
            warn!(collection = %collection, error = %err, "failed to save document");
        }
        result
    }

    async fn write_document(&self, collection: Collection, value: &Value) -> Result<()> {
        let mut buf = serde_json::to_string_pretty(value)
            .map_err(|err| BotError::persistence(collection, err))?;
        buf.push('\n');
        debug!(collection = %collection, bytes = buf.len(), "writing document");
        self.backend
            .write(collection, buf)
            .await
            .map_err(|err| BotError::persistence(collection, err))
    }

    /// Create every missing document with its default value. Existing
    /// documents are left untouched, even when corrupt.
    pub async fn initialize(&self) -> Result<()> {
        for collection in Collection::ALL {
            let _guard = self.lock(collection).await;
            match self.inspect(collection).await {
                DocumentState::Missing => {
                    info!(collection = %collection, "creating document with default value");
                    self.save(collection, &collection.default_value()).await?;
                }
                DocumentState::Unreadable(reason) => {
                    warn!(collection = %collection, %reason, "document unreadable, leaving it in place");
                }
                DocumentState::Corrupted(reason) => {
                    warn!(collection = %collection, %reason, "document corrupted, leaving it in place");
                }
                DocumentState::Present(_) => {}
            }
        }
        Ok(())
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
