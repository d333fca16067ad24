// Stores layer - persistence adapters and the cached entity collections
pub mod backend;
pub mod database_backend;
pub mod db_mapping;
pub mod entity_store;
pub mod json_backend;
pub mod record;
pub mod seed_data;

pub use backend::{CollectionBackend, LoadedCollection};
pub use database_backend::{DatabaseBackend, DbRecord};
pub use entity_store::{next_id_of, EntityStore};
pub use json_backend::JsonFileBackend;
pub use record::Record;
