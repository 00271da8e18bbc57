//! # Tenant Repository
//!
//! Repository operations for tenant records. Kept minimal: the auditions
//! service only needs to create tenants and confirm they exist; the rest of
//! tenant administration lives elsewhere in the product.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::error::{ApiError, field_validation_error};
use crate::models::tenant::{ActiveModel, Entity, Model};

/// Request data for creating a new tenant
#[derive(Debug, Clone)]
pub struct CreateTenantRequest {
    /// Display name for the tenant
    pub name: String,
}

/// Repository for tenant database operations
pub struct TenantRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TenantRepository<'a> {
    /// Create a new TenantRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new tenant
    pub async fn create_tenant(&self, request: CreateTenantRequest) -> Result<Model, ApiError> {
        validate_tenant_name(&request.name)?;

        let tenant = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(Some(request.name.trim().to_string())),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = tenant.insert(self.db).await.map_err(|e| {
            tracing::error!("Failed to create tenant: {}", e);
            ApiError::from(e)
        })?;

        Ok(result)
    }

    /// Get tenant by ID
    pub async fn get_tenant_by_id(&self, tenant_id: Uuid) -> Result<Option<Model>, ApiError> {
        let tenant = Entity::find_by_id(tenant_id)
            .one(self.db)
            .await
            .map_err(ApiError::from)?;

        Ok(tenant)
    }

    /// Check if a tenant exists
    pub async fn tenant_exists(&self, tenant_id: Uuid) -> Result<bool, ApiError> {
        Ok(self.get_tenant_by_id(tenant_id).await?.is_some())
    }
}

fn validate_tenant_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(field_validation_error("name", "Tenant name cannot be empty"));
    }

    if name.len() > 255 {
        return Err(field_validation_error(
            "name",
            "Tenant name cannot exceed 255 characters",
        ));
    }

    Ok(())
}
