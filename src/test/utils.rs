// Test utilities shared across unit tests
// Only compiled when running tests

use std::path::Path;
use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tempfile::TempDir;

use crate::app_data::AppData;
use crate::config::{AppSettings, MockEnvironment};
use crate::types::internal::RequestContext;

/// Settings pointing data and uploads at `root`
pub fn test_settings(root: &Path) -> AppSettings {
    let data_dir = root.join("Data");
    let upload_dir = root.join("wwwroot");
    let env = MockEnvironment::empty().with_vars(&[
        ("DATA_DIR", data_dir.to_str().unwrap()),
        ("UPLOAD_DIR", upload_dir.to_str().unwrap()),
        ("MAX_UPLOAD_BYTES", "1048576"),
    ]);
    AppSettings::from_env_provider(Arc::new(env)).expect("Failed to build test settings")
}

/// AppData over JSON files in a fresh temp directory
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn setup_json_app_data() -> (TempDir, Arc<AppData>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let app_data = AppData::with_json_files(test_settings(dir.path()));
    (dir, Arc::new(app_data))
}

/// Migrated in-memory SQLite database
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// AppData over an in-memory SQLite database
pub async fn setup_database_app_data() -> (TempDir, Arc<AppData>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db = setup_test_db().await;
    let app_data = AppData::with_database(test_settings(dir.path()), db);
    (dir, Arc::new(app_data))
}

pub fn test_ctx() -> RequestContext {
    RequestContext::for_system("test")
}
