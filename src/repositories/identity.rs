//! # Identity Repository
//!
//! Repository operations for the identities table. Resolution is
//! lookup-before-create on the normalized email; the (tenant_id, email)
//! unique index turns the rare concurrent-create race into a violation that
//! the resolver absorbs by re-fetching the winner's row.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::error::{ApiError, is_unique_violation};
use crate::models::identity::{ActiveModel, Column, Entity, Model};

/// Normalize an email address into the stored comparison key.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Repository for identity database operations
pub struct IdentityRepository {
    db: DatabaseConnection,
}

impl IdentityRepository {
    /// Create a new IdentityRepository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Find an identity by normalized email within a tenant
    pub async fn find_by_email(
        &self,
        tenant_id: Uuid,
        normalized_email: &str,
    ) -> Result<Option<Model>, ApiError> {
        let identity = Entity::find()
            .filter(Column::TenantId.eq(tenant_id))
            .filter(Column::Email.eq(normalized_email))
            .one(&self.db)
            .await
            .map_err(ApiError::from)?;

        Ok(identity)
    }

    /// Resolve an email to the tenant's identity record, creating one only
    /// if none exists.
    ///
    /// Existing identities are returned unchanged: the name fields on a
    /// claim never overwrite an earlier record. Safe to call repeatedly and
    /// concurrently for the same email.
    pub async fn resolve(
        &self,
        tenant_id: Uuid,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Model, ApiError> {
        let normalized = normalize_email(email);

        if let Some(existing) = self.find_by_email(tenant_id, &normalized).await? {
            return Ok(existing);
        }

        let now = Utc::now().fixed_offset();
        let identity = ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(tenant_id),
            email: Set(normalized.clone()),
            first_name: Set(first_name.trim().to_string()),
            last_name: Set(last_name.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match identity.insert(&self.db).await {
            Ok(created) => {
                tracing::info!(
                    tenant_id = %tenant_id,
                    identity_id = %created.id,
                    "Identity created"
                );
                Ok(created)
            }
            Err(err) if is_unique_violation(&err) => {
                // A concurrent claim created the identity between our lookup
                // and insert; the unique index guarantees the row exists now.
                tracing::debug!(
                    tenant_id = %tenant_id,
                    "Identity creation lost a race, re-fetching"
                );
                self.find_by_email(tenant_id, &normalized)
                    .await?
                    .ok_or_else(|| {
                        ApiError::new(
                            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                            "INTERNAL_SERVER_ERROR",
                            "Identity vanished after unique violation",
                        )
                    })
            }
            Err(err) => {
                tracing::error!("Failed to create identity: {}", err);
                Err(ApiError::from(err))
            }
        }
    }

    /// Fetch identities by ID within a tenant, for embedding into admin views
    pub async fn find_by_ids(
        &self,
        tenant_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<Model>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let identities = Entity::find()
            .filter(Column::TenantId.eq(tenant_id))
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(ApiError::from)?;

        Ok(identities)
    }
}
