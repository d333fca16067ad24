use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::config::database::{connect_database, migrate_database};
use crate::config::{AppSettings, StorageBackendKind};
use crate::errors::InternalError;
use crate::stores::{DatabaseBackend, DbRecord, EntityStore, JsonFileBackend};
use crate::types::domain::{Approval, Claim, ClaimDecision, Role, SupportingDocument, User};

/// Centralized application data following the main-owned stores pattern
///
/// Every store is created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(settings)
///   ↓ picks one backend for all collections
///   ├─ users      (Arc<EntityStore<User>>)
///   ├─ roles      (Arc<EntityStore<Role>>)
///   ├─ claims     (Arc<EntityStore<Claim>>)
///   ├─ approvals  (Arc<EntityStore<Approval>>)
///   ├─ documents  (Arc<EntityStore<SupportingDocument>>)
///   └─ decisions  (Arc<EntityStore<ClaimDecision>>)
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
/// ```
pub struct AppData {
    pub settings: AppSettings,
    pub db: Option<DatabaseConnection>,
    pub users: Arc<EntityStore<User>>,
    pub roles: Arc<EntityStore<Role>>,
    pub claims: Arc<EntityStore<Claim>>,
    pub approvals: Arc<EntityStore<Approval>>,
    pub documents: Arc<EntityStore<SupportingDocument>>,
    pub decisions: Arc<EntityStore<ClaimDecision>>,

    /// Serializes claim-status decisions so the claim, its roster entry and the
    /// decision log change together
    pub decision_lock: Arc<Mutex<()>>,
}

impl AppData {
    /// Initialize all application data for the configured backend
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when the database cannot be reached or migrated
    pub async fn init(settings: AppSettings) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let app_data = match settings.storage_backend() {
            StorageBackendKind::Json => Self::with_json_files(settings),
            StorageBackendKind::Database => {
                let db = connect_database(settings.database_url()).await?;
                migrate_database(&db).await?;
                Self::with_database(settings, db)
            }
        };

        tracing::info!("AppData initialization complete");
        Ok(app_data)
    }

    /// Stores backed by `<DATA_DIR>/<collection>.json`
    pub fn with_json_files(settings: AppSettings) -> Self {
        tracing::debug!("Using JSON storage in {}", settings.data_dir().display());
        let backend = Arc::new(JsonFileBackend::new(settings.data_dir()));

        Self {
            users: Arc::new(EntityStore::new(backend.clone())),
            roles: Arc::new(EntityStore::new(backend.clone())),
            claims: Arc::new(EntityStore::new(backend.clone())),
            approvals: Arc::new(EntityStore::new(backend.clone())),
            documents: Arc::new(EntityStore::new(backend.clone())),
            decisions: Arc::new(EntityStore::new(backend)),
            db: None,
            settings,
            decision_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Stores backed by an already migrated database connection
    pub fn with_database(settings: AppSettings, db: DatabaseConnection) -> Self {
        tracing::debug!("Using database storage");
        let backend = Arc::new(DatabaseBackend::new(db.clone()));

        Self {
            users: database_store::<User>(&backend),
            roles: database_store::<Role>(&backend),
            claims: database_store::<Claim>(&backend),
            approvals: database_store::<Approval>(&backend),
            documents: database_store::<SupportingDocument>(&backend),
            decisions: database_store::<ClaimDecision>(&backend),
            db: Some(db),
            settings,
            decision_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Drop every cached collection; the next access reloads from storage
    pub async fn reset_caches(&self) {
        self.users.reset().await;
        self.roles.reset().await;
        self.claims.reset().await;
        self.approvals.reset().await;
        self.documents.reset().await;
        self.decisions.reset().await;
    }
}

fn database_store<T: DbRecord>(backend: &Arc<DatabaseBackend>) -> Arc<EntityStore<T>> {
    Arc::new(EntityStore::new(backend.clone()))
}
