use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClaimDecisions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClaimDecisions::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClaimDecisions::ClaimId).integer().not_null())
                    .col(ColumnDef::new(ClaimDecisions::Decision).string().not_null())
                    .col(ColumnDef::new(ClaimDecisions::Comments).text().null())
                    .col(ColumnDef::new(ClaimDecisions::DecidedBy).integer().not_null())
                    .col(
                        ColumnDef::new(ClaimDecisions::DecidedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_claim_decisions_claim_id")
                    .table(ClaimDecisions::Table)
                    .col(ClaimDecisions::ClaimId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClaimDecisions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClaimDecisions {
    Table,
    Id,
    ClaimId,
    Decision,
    Comments,
    DecidedBy,
    DecidedAt,
}
