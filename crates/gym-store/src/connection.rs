use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use gym_domain::{AttendanceRecord, Delete, Expense, GymClass, Id, Member, Retrieve, Trainer};

use crate::records::Record;
use crate::results::StoreError;
use crate::storage::{DirectoryStorage, MemoryStorage, Storage};

/// Exclusive access to the storage, held for a whole
/// read-modify-write.
pub struct Handle {
    storage: Box<dyn Storage>,
    last_id: Id,
}

impl Handle {
    /// Read a collection. A missing, unreadable or unparsable document
    /// reads as empty.
    pub async fn load<T: Record>(&self) -> Vec<T> {
        let data = match self.storage.get_item(T::KEY).await {
            Ok(Some(data)) => data,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(collection = T::KEY, error = %err, "could not read collection");
                return Vec::new();
            }
        };
        match serde_json::from_str(&data) {
            Ok(records) => records,
            Err(err) => {
                warn!(collection = T::KEY, error = %err, "could not parse collection");
                Vec::new()
            }
        }
    }

    /// Replace a collection. Nothing is written if this fails.
    pub async fn store<T: Record>(&mut self, records: &[T]) -> Result<(), StoreError> {
        let data = serde_json::to_string(records)?;
        if let Err(err) = self.storage.set_item(T::KEY, &data).await {
            warn!(collection = T::KEY, error = %err, "could not save collection");
            return Err(err);
        }
        debug!(collection = T::KEY, records = records.len(), "saved collection");
        Ok(())
    }

    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).await
    }

    pub async fn set_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).await
    }

    pub async fn remove_raw(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).await
    }

    /// Next record id: the clock in milliseconds, but always above
    /// every id handed out or loaded before.
    pub fn next_id(&mut self, now: &DateTime<FixedOffset>) -> Id {
        let millis = Id::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id.saturating_add(1));
        self.last_id = id;
        id
    }

    async fn max_id<T: Record>(&self) -> Id {
        self.load::<T>().await.iter().map(Record::id).max().unwrap_or(0)
    }

    async fn seed_ids(&mut self) {
        self.last_id = [
            self.max_id::<Member>().await,
            self.max_id::<AttendanceRecord>().await,
            self.max_id::<Expense>().await,
            self.max_id::<Trainer>().await,
            self.max_id::<GymClass>().await,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
    }
}

/// A shareable connection to the entity store
#[derive(Clone)]
pub struct Connection {
    handle: Arc<Mutex<Handle>>,
}

impl Connection {
    /// Open the store kept in a data directory
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let storage = DirectoryStorage::open(data_dir.as_ref()).await?;
        info!(path = %storage.root().display(), "opened data directory");
        Ok(Self::with_storage(storage).await)
    }

    pub async fn with_storage(storage: impl Storage + 'static) -> Self {
        let mut handle = Handle {
            storage: Box::new(storage),
            last_id: 0,
        };
        handle.seed_ids().await;
        Self {
            handle: Arc::new(Mutex::new(handle)),
        }
    }

    /// Open a new, empty in-memory store.
    pub async fn open_test() -> Self {
        Self::with_storage(MemoryStorage::new()).await
    }

    pub async fn lock(&self) -> MutexGuard<'_, Handle> {
        self.handle.lock().await
    }

    /// All records of a collection, empty if there are none or the
    /// document can not be read.
    pub async fn list<T: Record>(&self) -> Vec<T> {
        self.lock().await.load().await
    }

    /// Replace all records of a collection.
    pub async fn save<T: Record>(&self, records: &[T]) -> Result<()> {
        self.lock().await.store(records).await?;
        Ok(())
    }

    /// The stored document of a key, as is.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.lock().await.get_raw(key).await.ok().flatten()
    }
}

#[async_trait]
impl<T: Record> Retrieve<T> for Connection {
    async fn retrieve(&self, id: Id) -> Result<T> {
        let record = self
            .list::<T>()
            .await
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or(StoreError::NotFound {
                collection: T::KEY,
                id,
            })?;
        Ok(record)
    }
}

#[async_trait]
impl<T: Record> Delete<T> for Connection {
    async fn delete(&self, id: Id) -> Result<()> {
        let mut conn = self.lock().await;
        let records: Vec<T> = conn.load().await;
        let before = records.len();
        let remaining: Vec<T> = records.into_iter().filter(|r| r.id() != id).collect();
        if remaining.len() == before {
            debug!(collection = T::KEY, id, "nothing to delete");
            return Ok(());
        }
        conn.store(&remaining).await?;
        info!(collection = T::KEY, id, "deleted record");
        Ok(())
    }
}
