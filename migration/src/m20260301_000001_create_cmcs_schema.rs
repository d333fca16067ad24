use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Roles::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Identifiers are assigned by the application (max + 1), never by SQLite
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::ContactNumber).string().not_null())
                    .col(ColumnDef::new(Users::HourlyRate).string().not_null())
                    .col(ColumnDef::new(Users::RoleId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Claims::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Claims::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Claims::ClaimDate).date().not_null())
                    .col(ColumnDef::new(Claims::Status).string().null())
                    .col(ColumnDef::new(Claims::HoursWorked).string().not_null())
                    .col(ColumnDef::new(Claims::HourlyRate).string().not_null())
                    .col(ColumnDef::new(Claims::TotalAmount).string().not_null())
                    .col(
                        ColumnDef::new(Claims::SubmissionDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Claims::LastUpdated)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Claims::StatusNotes).text().null())
                    .col(ColumnDef::new(Claims::Notes).text().null())
                    .col(ColumnDef::new(Claims::UserId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_claims_user_id")
                    .table(Claims::Table)
                    .col(Claims::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Approvals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Approvals::Id).integer().not_null().primary_key())
                    .col(
                        ColumnDef::new(Approvals::ApprovalDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Approvals::Comments).text().not_null())
                    .col(ColumnDef::new(Approvals::ClaimId).integer().not_null())
                    .col(ColumnDef::new(Approvals::ApproverId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SupportingDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupportingDocuments::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SupportingDocuments::FileName).string().not_null())
                    .col(ColumnDef::new(SupportingDocuments::FilePath).string().not_null())
                    .col(
                        ColumnDef::new(SupportingDocuments::FileSize)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupportingDocuments::ContentType).string().not_null())
                    .col(
                        ColumnDef::new(SupportingDocuments::UploadDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupportingDocuments::ClaimId).integer().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupportingDocuments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Approvals::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Claims::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    ContactNumber,
    HourlyRate,
    RoleId,
}

#[derive(DeriveIden)]
enum Claims {
    Table,
    Id,
    ClaimDate,
    Status,
    HoursWorked,
    HourlyRate,
    TotalAmount,
    SubmissionDate,
    LastUpdated,
    StatusNotes,
    Notes,
    UserId,
}

#[derive(DeriveIden)]
enum Approvals {
    Table,
    Id,
    ApprovalDate,
    Comments,
    ClaimId,
    ApproverId,
}

#[derive(DeriveIden)]
enum SupportingDocuments {
    Table,
    Id,
    FileName,
    FilePath,
    FileSize,
    ContentType,
    UploadDate,
    ClaimId,
}
