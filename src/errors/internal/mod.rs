use thiserror::Error;

pub mod database;
pub mod storage;
pub mod validation;

pub use database::DatabaseError;
pub use storage::StorageError;
pub use validation::ValidationError;

use crate::types::internal::EntityKind;

/// Internal error type for store, service and coordinator operations
///
/// Not exposed via API - endpoints must convert to `ApiError`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} #{id} not found.")]
    NotFound { entity: EntityKind, id: i32 },

    #[error("File not found: {file_name}")]
    StoredFileMissing { file_name: String },

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn io(operation: &str, path: &std::path::Path, source: std::io::Error) -> InternalError {
        InternalError::Storage(StorageError::Io {
            operation: operation.to_string(),
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(value_type: &str, message: impl Into<String>) -> InternalError {
        InternalError::Parse {
            value_type: value_type.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: EntityKind, id: i32) -> InternalError {
        InternalError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, InternalError::NotFound { .. })
    }
}
