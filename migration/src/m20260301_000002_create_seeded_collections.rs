use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One row per collection that has been written at least once.
        // An empty table plus a marker row means "emptied", not "never created".
        manager
            .create_table(
                Table::create()
                    .table(SeededCollections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeededCollections::Collection)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SeededCollections::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SeededCollections::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SeededCollections {
    Table,
    Collection,
    UpdatedAt,
}
