//! # Slot Repository
//!
//! Repository operations for the audition_slots table. The claim path goes
//! through [`SlotRepository::claim_if_unassigned`], a single conditional
//! update whose row count decides the winner of a claim race; status and
//! notes administration are plain tenant-scoped writes.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::audition_slot::{ActiveModel, Column, Entity, Model};
use crate::models::SlotStatus;

/// Repository for audition slot database operations
pub struct SlotRepository {
    db: DatabaseConnection,
}

impl SlotRepository {
    /// Create a new SlotRepository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Find a slot by ID alone.
    ///
    /// Backs the unauthenticated claim path; the caller takes the tenant
    /// from the returned row before any further store operation.
    pub async fn find_by_id(&self, slot_id: Uuid) -> Result<Option<Model>, ApiError> {
        let slot = Entity::find_by_id(slot_id)
            .one(&self.db)
            .await
            .map_err(ApiError::from)?;

        Ok(slot)
    }

    /// Find a slot by ID, ensuring it belongs to the specified tenant
    pub async fn find_by_tenant(
        &self,
        tenant_id: Uuid,
        slot_id: Uuid,
    ) -> Result<Option<Model>, ApiError> {
        let slot = Entity::find_by_id(slot_id)
            .filter(Column::TenantId.eq(tenant_id))
            .one(&self.db)
            .await
            .map_err(ApiError::from)?;

        Ok(slot)
    }

    /// Assign an identity to a slot if and only if it is still unassigned.
    ///
    /// This is the one operation in the subsystem that concurrent public
    /// callers contend on. The `assigned_identity_id IS NULL` predicate and
    /// the write happen atomically in the store as a single conditional
    /// UPDATE; `rows_affected` tells the caller whether it won (1) or
    /// lost (0).
    pub async fn claim_if_unassigned(
        &self,
        tenant_id: Uuid,
        slot_id: Uuid,
        identity_id: Uuid,
    ) -> Result<u64, ApiError> {
        let result = Entity::update_many()
            .col_expr(Column::AssignedIdentityId, Expr::value(Some(identity_id)))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(Column::Id.eq(slot_id))
            .filter(Column::TenantId.eq(tenant_id))
            .filter(Column::AssignedIdentityId.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| {
                tracing::error!("Failed to execute conditional slot assignment: {}", e);
                ApiError::from(e)
            })?;

        Ok(result.rows_affected)
    }

    /// Update the status of a slot within a tenant.
    ///
    /// Returns the updated slot, or None when the slot does not exist in the
    /// tenant. Last write wins; this path never touches the assignment.
    pub async fn set_status(
        &self,
        tenant_id: Uuid,
        slot_id: Uuid,
        status: SlotStatus,
    ) -> Result<Option<Model>, ApiError> {
        let Some(slot) = self.find_by_tenant(tenant_id, slot_id).await? else {
            return Ok(None);
        };

        let mut active_slot: ActiveModel = slot.into();
        active_slot.status = Set(status);
        active_slot.updated_at = Set(Utc::now().fixed_offset());

        let updated = active_slot.update(&self.db).await.map_err(|e| {
            tracing::error!("Failed to update slot status: {}", e);
            ApiError::from(e)
        })?;

        Ok(Some(updated))
    }

    /// Update or clear the notes of a slot within a tenant.
    ///
    /// Returns the updated slot, or None when the slot does not exist in the
    /// tenant.
    pub async fn set_notes(
        &self,
        tenant_id: Uuid,
        slot_id: Uuid,
        notes: Option<String>,
    ) -> Result<Option<Model>, ApiError> {
        let Some(slot) = self.find_by_tenant(tenant_id, slot_id).await? else {
            return Ok(None);
        };

        let mut active_slot: ActiveModel = slot.into();
        active_slot.notes = Set(notes);
        active_slot.updated_at = Set(Utc::now().fixed_offset());

        let updated = active_slot.update(&self.db).await.map_err(|e| {
            tracing::error!("Failed to update slot notes: {}", e);
            ApiError::from(e)
        })?;

        Ok(Some(updated))
    }
}
