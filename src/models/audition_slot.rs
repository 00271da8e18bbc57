//! AuditionSlot entity model
//!
//! SeaORM entity for the audition_slots table, one bookable unit of time
//! within an audition window. assigned_identity_id is set at most once, by
//! the public claim path, through a conditional update.

use super::audition_window::Entity as AuditionWindow;
use super::identity::Entity as Identity;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::{DateTimeWithTimeZone, Time};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Review status of a slot, stored as text at the database boundary only.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    /// Initial status on creation; also the status a fresh claim carries
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "waitlisted")]
    Waitlisted,
}

impl SlotStatus {
    /// Stable textual form used in API payloads and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Pending => "pending",
            SlotStatus::Accepted => "accepted",
            SlotStatus::Rejected => "rejected",
            SlotStatus::Waitlisted => "waitlisted",
        }
    }
}

impl FromStr for SlotStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(SlotStatus::Pending),
            "accepted" => Ok(SlotStatus::Accepted),
            "rejected" => Ok(SlotStatus::Rejected),
            "waitlisted" => Ok(SlotStatus::Waitlisted),
            _ => Err(()),
        }
    }
}

/// AuditionSlot entity representing one bookable unit of time
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audition_slots")]
pub struct Model {
    /// Unique identifier for the slot (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Tenant identifier for multi-tenancy
    pub tenant_id: Uuid,

    /// Window this slot belongs to
    pub window_id: Uuid,

    /// Time of day the slot starts
    pub slot_time: Time,

    /// Current review status
    pub status: SlotStatus,

    /// Identity that won the claim race for this slot, absent until claimed
    pub assigned_identity_id: Option<Uuid>,

    /// Administrator-only free text
    pub notes: Option<String>,

    /// Timestamp when the slot was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the slot was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "AuditionWindow",
        from = "Column::WindowId",
        to = "super::audition_window::Column::Id"
    )]
    AuditionWindow,
    #[sea_orm(
        belongs_to = "Identity",
        from = "Column::AssignedIdentityId",
        to = "super::identity::Column::Id"
    )]
    Identity,
}

impl Related<AuditionWindow> for Entity {
    fn to() -> RelationDef {
        Relation::AuditionWindow.def()
    }
}

impl Related<Identity> for Entity {
    fn to() -> RelationDef {
        Relation::Identity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            SlotStatus::Pending,
            SlotStatus::Accepted,
            SlotStatus::Rejected,
            SlotStatus::Waitlisted,
        ] {
            assert_eq!(SlotStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_status_rejects_unknown_token() {
        assert!(SlotStatus::from_str("confirmed").is_err());
        assert!(SlotStatus::from_str("Pending").is_err());
        assert!(SlotStatus::from_str("").is_err());
    }
}
