//! Shared DTO types for the Auditions API handlers.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::SlotStatus;
use crate::models::audition_slot;
use crate::models::identity;

/// Summary of an identity as embedded in administrative responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IdentitySummaryDto {
    /// Unique identifier of the identity
    pub id: Uuid,
    /// Normalized email address
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
}

impl From<identity::Model> for IdentitySummaryDto {
    fn from(model: identity::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}

/// Full slot representation for administrative responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlotDto {
    /// Unique identifier of the slot
    pub id: Uuid,
    /// Window this slot belongs to
    pub window_id: Uuid,
    /// Time of day the slot starts
    #[schema(example = "09:30:00")]
    pub slot_time: NaiveTime,
    /// Current review status
    pub status: SlotStatus,
    /// Administrator-only free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Identity assigned by a successful claim, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_identity_id: Option<Uuid>,
}

impl From<audition_slot::Model> for SlotDto {
    fn from(model: audition_slot::Model) -> Self {
        Self {
            id: model.id,
            window_id: model.window_id,
            slot_time: model.slot_time,
            status: model.status,
            notes: model.notes,
            assigned_identity_id: model.assigned_identity_id,
        }
    }
}
