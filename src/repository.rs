//! Generic CRUD over the accounts and responses collections.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::info;

use crate::audit::LogRecorder;
use crate::error::{BotError, Result};
use crate::models::{Account, Confirmation, LogLevel, ResponseTemplate};
use crate::store::{Collection, DocumentStore};

/// A record type stored in one of the array collections.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the records live in
    const COLLECTION: Collection;
    /// Kind used in not-found errors
    const KIND: &'static str;
    /// Confirmation returned by a successful delete
    const DELETED_CONFIRMATION: &'static str;

    /// Caller-supplied id
    fn id(&self) -> &str;
    /// Audit message for a create
    fn created_message(&self) -> String;
    /// Audit message for an update
    fn updated_message(&self) -> String;
    /// Audit message for a delete
    fn deleted_message(&self) -> String;
}

impl Entity for Account {
    const COLLECTION: Collection = Collection::Accounts;
    const KIND: &'static str = "account";
    const DELETED_CONFIRMATION: &'static str = "Account deleted successfully";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_message(&self) -> String {
        format!("New account added: @{}", self.username)
    }

    fn updated_message(&self) -> String {
        format!("Account updated: @{}", self.username)
    }

    fn deleted_message(&self) -> String {
        format!("Account deleted: @{}", self.username)
    }
}

impl Entity for ResponseTemplate {
    const COLLECTION: Collection = Collection::Responses;
    const KIND: &'static str = "response";
    const DELETED_CONFIRMATION: &'static str = "Response deleted successfully";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_message(&self) -> String {
        "New response template added".to_string()
    }

    fn updated_message(&self) -> String {
        "Response template updated".to_string()
    }

    fn deleted_message(&self) -> String {
        "Response template deleted".to_string()
    }
}

/// CRUD over one array collection
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Every record, in insertion order
    async fn list(&self) -> Vec<T>;
    /// Append `entity`; the caller supplies its id
    async fn create(&self, entity: T) -> Result<T>;
    /// Replace the first record whose id is `id`
    async fn update(&self, id: &str, entity: T) -> Result<T>;
    /// Remove the first record whose id is `id`
    async fn delete(&self, id: &str) -> Result<Confirmation>;
}

/// [`Repository`] over a [`DocumentStore`] collection with audit logging.
///
/// Records are handled as raw JSON while mutating, so an element that does
/// not decode as `T` survives other writes untouched. `list` skips it.
pub struct CollectionRepository<T> {
    store: Arc<DocumentStore>,
    recorder: LogRecorder,
    _entity: PhantomData<fn() -> T>,
}

/// Accounts collection
pub type AccountRepository = CollectionRepository<Account>;
/// Response templates collection
pub type ResponseRepository = CollectionRepository<ResponseTemplate>;

impl<T: Entity> CollectionRepository<T> {
    /// Repository writing through `store` and auditing through `recorder`
    pub fn new(store: Arc<DocumentStore>, recorder: LogRecorder) -> Self {
        Self {
            store,
            recorder,
            _entity: PhantomData,
        }
    }

    fn not_found(id: &str) -> BotError {
        BotError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }
}

fn position_of(records: &[Value], id: &str) -> Option<usize> {
    records
        .iter()
        .position(|record| record.get("id").and_then(Value::as_str) == Some(id))
}

#[async_trait]
impl<T: Entity> Repository<T> for CollectionRepository<T> {
    async fn list(&self) -> Vec<T> {
        self.store
            .load_records(T::COLLECTION)
            .await
            .into_iter()
            .filter_map(|record| serde_json::from_value(record).ok())
            .collect()
    }

    async fn create(&self, entity: T) -> Result<T> {
        let _guard = self.store.lock(T::COLLECTION).await;
        let mut records = self.store.load_records(T::COLLECTION).await;
        records.push(serde_json::to_value(&entity)?);
        self.store
            .save(T::COLLECTION, &Value::Array(records))
            .await?;

        info!(collection = %T::COLLECTION, id = entity.id(), "record created");
        self.recorder
            .record_after_commit(LogLevel::Info, entity.created_message(), None)
            .await;
        Ok(entity)
    }

    async fn update(&self, id: &str, entity: T) -> Result<T> {
        let _guard = self.store.lock(T::COLLECTION).await;
        let mut records = self.store.load_records(T::COLLECTION).await;
        let index = position_of(&records, id).ok_or_else(|| Self::not_found(id))?;
        records[index] = serde_json::to_value(&entity)?;
        self.store
            .save(T::COLLECTION, &Value::Array(records))
            .await?;

        info!(collection = %T::COLLECTION, id, "record updated");
        self.recorder
            .record_after_commit(LogLevel::Info, entity.updated_message(), None)
            .await;
        Ok(entity)
    }

    async fn delete(&self, id: &str) -> Result<Confirmation> {
        let _guard = self.store.lock(T::COLLECTION).await;
        let mut records = self.store.load_records(T::COLLECTION).await;
        let index = position_of(&records, id).ok_or_else(|| Self::not_found(id))?;
        let removed = records.remove(index);
        self.store
            .save(T::COLLECTION, &Value::Array(records))
            .await?;

        info!(collection = %T::COLLECTION, id, "record deleted");
        let message = serde_json::from_value::<T>(removed).map_or_else(
            |_| format!("{} deleted: {id}", T::KIND),
            |entity| entity.deleted_message(),
        );
        self.recorder
            .record_after_commit(LogLevel::Info, message, None)
            .await;
        Ok(Confirmation {
            message: T::DELETED_CONFIRMATION.to_string(),
        })
    }
}
