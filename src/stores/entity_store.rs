use std::sync::Arc;

use tokio::sync::Mutex;

use crate::errors::InternalError;
use crate::stores::backend::{CollectionBackend, LoadedCollection};
use crate::stores::record::Record;

/// Cached, lazily loaded collection of one record type
///
/// The first access loads from the backend: an absent backing store is seeded once
/// with [`Record::seed`], and records failing [`Record::is_intact`] are dropped with
/// the cleaned collection written straight back. Every mutation works on a copy
/// that only replaces the cache once the backend write has succeeded.
pub struct EntityStore<T: Record> {
    backend: Arc<dyn CollectionBackend<T>>,
    cache: Mutex<Option<Vec<T>>>,
}

impl<T: Record> EntityStore<T> {
    pub fn new(backend: Arc<dyn CollectionBackend<T>>) -> Self {
        Self {
            backend,
            cache: Mutex::new(None),
        }
    }

    async fn load_from_backend(&self) -> Result<Vec<T>, InternalError> {
        match self.backend.load().await? {
            None => {
                let seeded = T::seed();
                self.backend.save(&seeded).await?;
                tracing::info!("Initialized {} with {} sample records", T::COLLECTION, seeded.len());
                Ok(seeded)
            }
            Some(LoadedCollection { records, rejected }) => {
                let loaded = records.len();
                let intact: Vec<T> = records.into_iter().filter(T::is_intact).collect();
                let dropped = loaded - intact.len() + rejected;

                if dropped > 0 {
                    tracing::warn!("Filtered out {} corrupted {} entries", dropped, T::COLLECTION);
                    self.backend.save(&intact).await?;
                }

                tracing::debug!("Loaded {} {}", intact.len(), T::COLLECTION);
                Ok(intact)
            }
        }
    }

    async fn with_records<R>(&self, read: impl FnOnce(&[T]) -> R) -> Result<R, InternalError> {
        let mut slot = self.cache.lock().await;
        if slot.is_none() {
            *slot = Some(self.load_from_backend().await?);
        }
        Ok(read(slot.as_deref().unwrap_or_default()))
    }

    /// Snapshot of every record
    pub async fn all(&self) -> Result<Vec<T>, InternalError> {
        self.with_records(|records| records.to_vec()).await
    }

    pub async fn filter(&self, keep: impl Fn(&T) -> bool) -> Result<Vec<T>, InternalError> {
        self.with_records(|records| records.iter().filter(|r| keep(r)).cloned().collect())
            .await
    }

    pub async fn find(&self, id: i32) -> Result<Option<T>, InternalError> {
        self.with_records(|records| records.iter().find(|r| r.id() == id).cloned())
            .await
    }

    pub async fn find_by(&self, matches: impl Fn(&T) -> bool) -> Result<Option<T>, InternalError> {
        self.with_records(|records| records.iter().find(|r| matches(r)).cloned())
            .await
    }

    /// Like [`find`](Self::find) but a missing record is a `NotFound` error
    pub async fn get(&self, id: i32) -> Result<T, InternalError> {
        self.find(id)
            .await?
            .ok_or_else(|| InternalError::not_found(T::KIND, id))
    }

    pub async fn count(&self) -> Result<usize, InternalError> {
        self.with_records(|records| records.len()).await
    }

    /// Max existing id + 1, or 1 for an empty collection
    pub async fn next_id(&self) -> Result<i32, InternalError> {
        self.with_records(next_id_of).await
    }

    /// Apply `change` to a working copy, persist it, then publish it to the cache
    ///
    /// When `change` fails nothing is written and the cache is untouched.
    pub async fn update<R, F>(&self, change: F) -> Result<R, InternalError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, InternalError> + Send,
        R: Send,
    {
        let mut slot = self.cache.lock().await;
        if slot.is_none() {
            *slot = Some(self.load_from_backend().await?);
        }

        let mut working = slot.clone().unwrap_or_default();
        let result = change(&mut working)?;

        self.backend.save(&working).await?;
        *slot = Some(working);
        Ok(result)
    }

    /// Create a record with the next free id
    pub async fn insert_with<F>(&self, build: F) -> Result<T, InternalError>
    where
        F: FnOnce(i32) -> Result<T, InternalError> + Send,
    {
        self.update(|records| {
            let record = build(next_id_of(records))?;
            records.push(record.clone());
            Ok(record)
        })
        .await
    }

    /// Mutate one record in place; `NotFound` if it does not exist
    pub async fn update_one<F>(&self, id: i32, change: F) -> Result<T, InternalError>
    where
        F: FnOnce(&mut T) -> Result<(), InternalError> + Send,
    {
        self.update(|records| {
            let record = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or_else(|| InternalError::not_found(T::KIND, id))?;
            change(record)?;
            Ok(record.clone())
        })
        .await
    }

    pub async fn remove(&self, id: i32) -> Result<T, InternalError> {
        self.update(|records| {
            let index = records
                .iter()
                .position(|r| r.id() == id)
                .ok_or_else(|| InternalError::not_found(T::KIND, id))?;
            Ok(records.remove(index))
        })
        .await
    }

    /// Forget the cached collection so the next access reloads from the backend
    pub async fn reset(&self) {
        *self.cache.lock().await = None;
    }
}

/// Max id in `records` + 1, or 1 when empty
pub fn next_id_of<T: Record>(records: &[T]) -> i32 {
    records.iter().map(Record::id).max().map_or(1, |max| max + 1)
}
