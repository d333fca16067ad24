pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_cmcs_schema;
mod m20260301_000002_create_seeded_collections;
mod m20260315_000001_create_claim_decisions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_cmcs_schema::Migration),
            Box::new(m20260301_000002_create_seeded_collections::Migration),
            Box::new(m20260315_000001_create_claim_decisions::Migration),
        ]
    }
}
