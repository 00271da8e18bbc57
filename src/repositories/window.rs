//! # Window Repository
//!
//! Repository operations for the audition_windows table. A window and its
//! generated slots are created and deleted as one unit of work; no state
//! where the window exists without its slots (or slots without their window)
//! is ever observable.

use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::audition_slot;
use crate::models::audition_window::{ActiveModel, Column, Entity, Model};
use crate::models::SlotStatus;

/// Repository for audition window database operations
pub struct WindowRepository {
    db: DatabaseConnection,
}

impl WindowRepository {
    /// Create a new WindowRepository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persist a window together with its full slot sequence in one
    /// transaction.
    ///
    /// `slot_times` comes from a validated slot plan; every slot starts out
    /// `pending`, unassigned, with no notes.
    pub async fn create_with_slots(
        &self,
        tenant_id: Uuid,
        program_year_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        block_length_minutes: i32,
        slot_times: &[NaiveTime],
    ) -> Result<(Model, Vec<audition_slot::Model>), ApiError> {
        let now = Utc::now().fixed_offset();
        let window_id = Uuid::new_v4();

        let window = ActiveModel {
            id: Set(window_id),
            tenant_id: Set(tenant_id),
            program_year_id: Set(program_year_id),
            date: Set(date),
            start_time: Set(start_time),
            end_time: Set(end_time),
            block_length_minutes: Set(block_length_minutes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let slots: Vec<audition_slot::ActiveModel> = slot_times
            .iter()
            .map(|slot_time| audition_slot::ActiveModel {
                id: Set(Uuid::new_v4()),
                tenant_id: Set(tenant_id),
                window_id: Set(window_id),
                slot_time: Set(*slot_time),
                status: Set(SlotStatus::Pending),
                assigned_identity_id: Set(None),
                notes: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        let txn = self.db.begin().await.map_err(ApiError::from)?;

        Entity::insert(window).exec(&txn).await.map_err(|e| {
            tracing::error!("Failed to insert audition window: {}", e);
            ApiError::from(e)
        })?;

        if !slots.is_empty() {
            audition_slot::Entity::insert_many(slots)
                .exec(&txn)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to insert audition slots: {}", e);
                    ApiError::from(e)
                })?;
        }

        let created_window = Entity::find_by_id(window_id)
            .one(&txn)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::new(
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Audition window not persisted",
                )
            })?;

        let created_slots = audition_slot::Entity::find()
            .filter(audition_slot::Column::WindowId.eq(window_id))
            .order_by_asc(audition_slot::Column::SlotTime)
            .all(&txn)
            .await
            .map_err(ApiError::from)?;

        txn.commit().await.map_err(ApiError::from)?;

        tracing::info!(
            tenant_id = %tenant_id,
            window_id = %window_id,
            slot_count = created_slots.len(),
            "Audition window created"
        );

        Ok((created_window, created_slots))
    }

    /// Find a window by ID, ensuring it belongs to the specified tenant
    pub async fn find_by_tenant(
        &self,
        tenant_id: Uuid,
        window_id: Uuid,
    ) -> Result<Option<Model>, ApiError> {
        let window = Entity::find_by_id(window_id)
            .filter(Column::TenantId.eq(tenant_id))
            .one(&self.db)
            .await
            .map_err(ApiError::from)?;

        Ok(window)
    }

    /// Find a window and its slots (ordered by slot time) within a tenant
    pub async fn find_with_slots(
        &self,
        tenant_id: Uuid,
        window_id: Uuid,
    ) -> Result<Option<(Model, Vec<audition_slot::Model>)>, ApiError> {
        let Some(window) = self.find_by_tenant(tenant_id, window_id).await? else {
            return Ok(None);
        };

        let slots = audition_slot::Entity::find()
            .filter(audition_slot::Column::WindowId.eq(window_id))
            .order_by_asc(audition_slot::Column::SlotTime)
            .all(&self.db)
            .await
            .map_err(ApiError::from)?;

        Ok(Some((window, slots)))
    }

    /// Find a window by ID alone.
    ///
    /// Backs the unauthenticated public view; the caller takes the tenant
    /// from the returned row.
    pub async fn find_by_id(&self, window_id: Uuid) -> Result<Option<Model>, ApiError> {
        let window = Entity::find_by_id(window_id)
            .one(&self.db)
            .await
            .map_err(ApiError::from)?;

        Ok(window)
    }

    /// List the slots of a window, ordered by slot time
    pub async fn list_slots(
        &self,
        window_id: Uuid,
    ) -> Result<Vec<audition_slot::Model>, ApiError> {
        let slots = audition_slot::Entity::find()
            .filter(audition_slot::Column::WindowId.eq(window_id))
            .order_by_asc(audition_slot::Column::SlotTime)
            .all(&self.db)
            .await
            .map_err(ApiError::from)?;

        Ok(slots)
    }

    /// Delete a window and every slot referencing it in one transaction.
    ///
    /// Returns false when the window does not exist in the tenant. Slots are
    /// deleted explicitly rather than via the FK cascade; SQLite test
    /// databases run with FK enforcement off.
    pub async fn delete_with_slots(
        &self,
        tenant_id: Uuid,
        window_id: Uuid,
    ) -> Result<bool, ApiError> {
        let Some(window) = self.find_by_tenant(tenant_id, window_id).await? else {
            return Ok(false);
        };

        let txn = self.db.begin().await.map_err(ApiError::from)?;

        let deleted_slots = audition_slot::Entity::delete_many()
            .filter(audition_slot::Column::WindowId.eq(window.id))
            .exec(&txn)
            .await
            .map_err(ApiError::from)?;

        Entity::delete_by_id(window.id)
            .exec(&txn)
            .await
            .map_err(ApiError::from)?;

        txn.commit().await.map_err(ApiError::from)?;

        tracing::info!(
            tenant_id = %tenant_id,
            window_id = %window_id,
            slots_deleted = deleted_slots.rows_affected,
            "Audition window deleted"
        );

        Ok(true)
    }
}
