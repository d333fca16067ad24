use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, Set,
    TransactionTrait,
};

use crate::errors::internal::DatabaseError;
use crate::errors::InternalError;
use crate::stores::backend::{CollectionBackend, LoadedCollection};
use crate::stores::record::Record;
use crate::types::db::seeded_collection;

/// Rows per INSERT statement, kept well below SQLite's bound-parameter limit
const INSERT_CHUNK: usize = 50;

/// Mapping between a domain record and its table row
pub trait DbRecord: Record {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: IntoActiveModel<Self::ActiveModel> + FromQueryResult + Send + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + Sync + 'static;

    fn to_active_model(&self) -> Self::ActiveModel;

    /// `None` when the row cannot be represented (e.g. unparsable decimal text)
    fn from_model(model: Self::Model) -> Option<Self>;
}

/// Stores each collection in its own table
///
/// A row in `seeded_collections` records that a collection has been written, so an
/// emptied table is never mistaken for a fresh install.
#[derive(Debug, Clone)]
pub struct DatabaseBackend {
    db: DatabaseConnection,
}

impl DatabaseBackend {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<T: DbRecord> CollectionBackend<T> for DatabaseBackend {
    async fn load(&self) -> Result<Option<LoadedCollection<T>>, InternalError> {
        let marker = seeded_collection::Entity::find_by_id(T::COLLECTION.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_collection_marker", e))?;

        let rows = T::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("load_collection", e))?;

        if marker.is_none() && rows.is_empty() {
            return Ok(None);
        }

        let total = rows.len();
        let mut records: Vec<T> = rows.into_iter().filter_map(T::from_model).collect();
        records.sort_by_key(|record| record.id());
        let rejected = total - records.len();

        Ok(Some(LoadedCollection::new(records, rejected)))
    }

    async fn save(&self, records: &[T]) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|source| DatabaseError::TransactionBegin { source })?;

        T::Entity::delete_many()
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("clear_collection", e))?;

        for chunk in records.chunks(INSERT_CHUNK) {
            let models: Vec<T::ActiveModel> = chunk.iter().map(T::to_active_model).collect();
            T::Entity::insert_many(models)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| InternalError::database("insert_collection", e))?;
        }

        let marker = seeded_collection::ActiveModel {
            collection: Set(T::COLLECTION.to_string()),
            updated_at: Set(Utc::now()),
        };
        seeded_collection::Entity::insert(marker)
            .on_conflict(
                OnConflict::column(seeded_collection::Column::Collection)
                    .update_column(seeded_collection::Column::UpdatedAt)
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(|e| InternalError::database("mark_collection", e))?;

        txn.commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source })?;

        tracing::debug!("Saved {} {} to database", records.len(), T::COLLECTION);
        Ok(())
    }
}
