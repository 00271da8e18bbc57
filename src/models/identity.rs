//! Identity entity model
//!
//! SeaORM entity for the identities table, the applicant records that public
//! audition claims resolve to. The email column holds the normalized
//! (trimmed, lowercased) address; it is the case-insensitive comparison key
//! and is unique per tenant.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

/// Identity entity representing a stable applicant record within a tenant
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "identities")]
pub struct Model {
    /// Unique identifier for the identity (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Tenant identifier for multi-tenancy
    pub tenant_id: Uuid,

    /// Normalized email address, unique within the tenant
    pub email: String,

    /// First name as supplied by the first claim that created this record
    pub first_name: String,

    /// Last name as supplied by the first claim that created this record
    pub last_name: String,

    /// Timestamp when the identity was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the identity was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
