//! Migration to create the identities table.
//!
//! Identities are the applicant records that public audition claims resolve
//! to. The email column stores the normalized (lowercased) address, so the
//! composite unique index enforces at most one identity per email per tenant.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Identities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Identities::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Identities::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Identities::Email).text().not_null())
                    .col(ColumnDef::new(Identities::FirstName).text().not_null())
                    .col(ColumnDef::new(Identities::LastName).text().not_null())
                    .col(
                        ColumnDef::new(Identities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Identities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_identities_tenant_id")
                            .from(Identities::Table, Identities::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Backstop for the lookup-before-create path: concurrent resolutions
        // of the same email land on this index instead of creating duplicates.
        manager
            .create_index(
                Index::create()
                    .name("idx_identities_tenant_email")
                    .table(Identities::Table)
                    .col(Identities::TenantId)
                    .col(Identities::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_identities_tenant_id")
                    .table(Identities::Table)
                    .col(Identities::TenantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_identities_tenant_email")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_identities_tenant_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Identities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Identities {
    Table,
    Id,
    TenantId,
    Email,
    FirstName,
    LastName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
}
