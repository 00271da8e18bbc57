//! AuditionWindow entity model
//!
//! SeaORM entity for the audition_windows table. A window is a bounded time
//! range on a given date; its slots are generated with it in one unit of work
//! and removed with it on delete.

use super::audition_slot::Entity as AuditionSlot;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::{Date, DateTimeWithTimeZone, Time};
use uuid::Uuid;

/// AuditionWindow entity representing one audition sitting
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audition_windows")]
pub struct Model {
    /// Unique identifier for the window (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Tenant identifier for multi-tenancy
    pub tenant_id: Uuid,

    /// Program year this window belongs to (owned by another subsystem)
    pub program_year_id: Uuid,

    /// Calendar date of the sitting
    pub date: Date,

    /// Time of day the first slot starts
    pub start_time: Time,

    /// Time of day the window ends (exclusive)
    pub end_time: Time,

    /// Length of each slot in minutes; evenly divides the window duration
    pub block_length_minutes: i32,

    /// Timestamp when the window was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the window was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "AuditionSlot")]
    AuditionSlot,
}

impl Related<AuditionSlot> for Entity {
    fn to() -> RelationDef {
        Relation::AuditionSlot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
