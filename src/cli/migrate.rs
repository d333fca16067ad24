use crate::config::database::{connect_database, migrate_database};
use crate::config::AppSettings;

/// Run database migrations against `DATABASE_URL`
///
/// Does not initialize the full AppData structure.
pub async fn run_migrations(settings: &AppSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = connect_database(settings.database_url()).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");
    Ok(())
}
