use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::errors::internal::StorageError;
use crate::errors::InternalError;
use crate::stores::backend::{CollectionBackend, LoadedCollection};
use crate::stores::record::Record;

/// Stores each collection as a pretty-printed JSON array in `<dir>/<collection>.json`
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    /// Decode a JSON array element by element so that one bad entry does not
    /// take the whole collection down with it
    fn decode<T: Record>(path: &Path, bytes: &[u8]) -> Result<LoadedCollection<T>, InternalError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(LoadedCollection::new(Vec::new(), 0));
        }

        let values: Vec<serde_json::Value> = serde_json::from_slice(bytes).map_err(|_| {
            StorageError::Malformed {
                path: path.display().to_string(),
            }
        })?;

        let mut records = Vec::with_capacity(values.len());
        let mut rejected = 0;
        for value in values {
            match serde_json::from_value::<T>(value) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::debug!("Undecodable {} entry in {}: {}", T::COLLECTION, path.display(), e);
                    rejected += 1;
                }
            }
        }

        Ok(LoadedCollection::new(records, rejected))
    }
}

#[async_trait]
impl<T: Record> CollectionBackend<T> for JsonFileBackend {
    async fn load(&self) -> Result<Option<LoadedCollection<T>>, InternalError> {
        let path = self.path_for(T::COLLECTION);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(InternalError::io("read_collection", &path, e)),
        };

        Self::decode(&path, &bytes).map(Some)
    }

    async fn save(&self, records: &[T]) -> Result<(), InternalError> {
        let path = self.path_for(T::COLLECTION);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| InternalError::io("create_data_dir", &self.dir, e))?;

        let json = serde_json::to_vec_pretty(records).map_err(|source| StorageError::Serialization {
            collection: T::COLLECTION.to_string(),
            source,
        })?;

        // Write to a sibling file first so readers never observe a half-written array
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &json)
            .await
            .map_err(|e| InternalError::io("write_collection", &tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| InternalError::io("replace_collection", &path, e))?;

        tracing::debug!("Saved {} {} to {}", records.len(), T::COLLECTION, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::domain::Role;

    #[tokio::test]
    async fn test_missing_file_loads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path());

        let loaded: Option<LoadedCollection<Role>> = CollectionBackend::<Role>::load(&backend).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("Data"));
        let roles = vec![
            Role { id: 1, name: "Lecturer".to_string() },
            Role { id: 7, name: "Auditor".to_string() },
        ];

        backend.save(&roles).await.unwrap();
        let loaded: LoadedCollection<Role> = CollectionBackend::<Role>::load(&backend).await.unwrap().unwrap();

        assert_eq!(loaded.records, roles);
        assert_eq!(loaded.rejected, 0);
        assert!(dir.path().join("Data").join("roles.json").exists());
        assert!(!dir.path().join("Data").join("roles.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_written_file_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path());
        let users = crate::stores::seed_data::users();

        backend.save(&users).await.unwrap();
        let raw = std::fs::read_to_string(dir.path().join("users.json")).unwrap();

        assert!(raw.contains("\"firstName\""));
        assert!(raw.contains("\"roleId\""));
        assert!(!raw.contains("first_name"));
    }

    #[tokio::test]
    async fn test_undecodable_entries_are_counted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("roles.json"),
            r#"[{"id": 1, "name": "Lecturer"}, {"id": "oops"}, 42]"#,
        )
        .unwrap();
        let backend = JsonFileBackend::new(dir.path());

        let loaded: LoadedCollection<Role> = CollectionBackend::<Role>::load(&backend).await.unwrap().unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.rejected, 2);
    }

    #[tokio::test]
    async fn test_non_array_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("roles.json"), r#"{"id": 1}"#).unwrap();
        let backend = JsonFileBackend::new(dir.path());

        let result: Result<Option<LoadedCollection<Role>>, _> = CollectionBackend::<Role>::load(&backend).await;
        assert!(matches!(
            result,
            Err(InternalError::Storage(StorageError::Malformed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_blank_file_is_an_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("roles.json"), "  \n").unwrap();
        let backend = JsonFileBackend::new(dir.path());

        let loaded: LoadedCollection<Role> = CollectionBackend::<Role>::load(&backend).await.unwrap().unwrap();
        assert!(loaded.records.is_empty());
    }
}
