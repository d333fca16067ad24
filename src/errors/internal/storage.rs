use thiserror::Error;

/// Failures of the flat-file storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage error: {operation} failed for {path}: {source}")]
    Io {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage error: serializing {collection} failed: {source}")]
    Serialization {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {path} does not contain a JSON array")]
    Malformed { path: String },
}
