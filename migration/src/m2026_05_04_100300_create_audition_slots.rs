//! Migration to create the audition_slots table.
//!
//! Slots are generated in bulk with their window and destroyed only by the
//! cascading window delete. assigned_identity_id is written exactly once by
//! the public claim path, through a conditional update on this table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditionSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuditionSlots::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditionSlots::TenantId).uuid().not_null())
                    .col(ColumnDef::new(AuditionSlots::WindowId).uuid().not_null())
                    .col(ColumnDef::new(AuditionSlots::SlotTime).time().not_null())
                    .col(
                        ColumnDef::new(AuditionSlots::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(AuditionSlots::AssignedIdentityId)
                            .uuid()
                            .null(),
                    )
                    .col(ColumnDef::new(AuditionSlots::Notes).text().null())
                    .col(
                        ColumnDef::new(AuditionSlots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AuditionSlots::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_audition_slots_window_id")
                            .from(AuditionSlots::Table, AuditionSlots::WindowId)
                            .to(AuditionWindows::Table, AuditionWindows::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_audition_slots_assigned_identity_id")
                            .from(AuditionSlots::Table, AuditionSlots::AssignedIdentityId)
                            .to(Identities::Table, Identities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One slot per time within a window.
        manager
            .create_index(
                Index::create()
                    .name("idx_audition_slots_window_slot_time")
                    .table(AuditionSlots::Table)
                    .col(AuditionSlots::WindowId)
                    .col(AuditionSlots::SlotTime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audition_slots_tenant_id")
                    .table(AuditionSlots::Table)
                    .col(AuditionSlots::TenantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_audition_slots_window_slot_time")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_audition_slots_tenant_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AuditionSlots::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuditionSlots {
    Table,
    Id,
    TenantId,
    WindowId,
    SlotTime,
    Status,
    AssignedIdentityId,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AuditionWindows {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Identities {
    Table,
    Id,
}
