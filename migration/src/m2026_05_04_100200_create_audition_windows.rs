//! Migration to create the audition_windows table.
//!
//! An audition window is a bounded time range on a given date from which
//! bookable slots are generated. The program year it belongs to is owned by
//! another subsystem, so program_year_id carries no foreign key here.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditionWindows::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuditionWindows::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditionWindows::TenantId).uuid().not_null())
                    .col(
                        ColumnDef::new(AuditionWindows::ProgramYearId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AuditionWindows::Date).date().not_null())
                    .col(ColumnDef::new(AuditionWindows::StartTime).time().not_null())
                    .col(ColumnDef::new(AuditionWindows::EndTime).time().not_null())
                    .col(
                        ColumnDef::new(AuditionWindows::BlockLengthMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AuditionWindows::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AuditionWindows::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_audition_windows_tenant_id")
                            .from(AuditionWindows::Table, AuditionWindows::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audition_windows_tenant_id")
                    .table(AuditionWindows::Table)
                    .col(AuditionWindows::TenantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audition_windows_tenant_program_year")
                    .table(AuditionWindows::Table)
                    .col(AuditionWindows::TenantId)
                    .col(AuditionWindows::ProgramYearId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_audition_windows_tenant_program_year")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_audition_windows_tenant_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AuditionWindows::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuditionWindows {
    Table,
    Id,
    TenantId,
    ProgramYearId,
    Date,
    StartTime,
    EndTime,
    BlockLengthMinutes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
}
