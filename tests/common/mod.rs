// Common test utilities for integration tests

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use cmcs_backend::config::{AppSettings, EnvironmentProvider};
use cmcs_backend::AppData;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tempfile::TempDir;

/// Fixed environment variables, isolated from the process environment
pub struct TestEnvironment {
    vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn for_root(root: &Path) -> Self {
        let mut vars = HashMap::new();
        vars.insert("DATA_DIR".to_string(), root.join("Data").display().to_string());
        vars.insert("UPLOAD_DIR".to_string(), root.join("wwwroot").display().to_string());
        Self { vars }
    }
}

impl EnvironmentProvider for TestEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn settings_for(root: &Path) -> AppSettings {
    AppSettings::from_env_provider(Arc::new(TestEnvironment::for_root(root)))
        .expect("Failed to build test settings")
}

/// JSON-file backed AppData in a fresh temp directory
pub fn setup_json_app_data() -> (TempDir, Arc<AppData>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let app_data = AppData::with_json_files(settings_for(dir.path()));
    (dir, Arc::new(app_data))
}

/// Creates an in-memory database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Database backed AppData over a migrated in-memory SQLite database
pub async fn setup_database_app_data() -> (TempDir, Arc<AppData>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db = setup_test_db().await;
    let app_data = AppData::with_database(settings_for(dir.path()), db);
    (dir, Arc::new(app_data))
}
