use async_trait::async_trait;

use crate::errors::InternalError;
use crate::stores::record::Record;

/// Result of reading a collection from its backing store
#[derive(Debug, Clone)]
pub struct LoadedCollection<T> {
    pub records: Vec<T>,
    /// Entries that could not be decoded at all
    pub rejected: usize,
}

impl<T> LoadedCollection<T> {
    pub fn new(records: Vec<T>, rejected: usize) -> Self {
        Self { records, rejected }
    }
}

/// Whole-collection persistence for one record type
///
/// Implementations never append: `save` replaces everything previously stored
/// for the collection.
#[async_trait]
pub trait CollectionBackend<T: Record>: Send + Sync {
    /// `Ok(None)` means the collection has never been written
    async fn load(&self) -> Result<Option<LoadedCollection<T>>, InternalError>;

    async fn save(&self, records: &[T]) -> Result<(), InternalError>;
}
