//! # Tenants API Handlers
//!
//! This module contains handlers for tenant creation and lookup. Tenant
//! administration beyond this lives in the wider product; the auditions
//! service only needs enough surface to provision and inspect tenants.

use crate::auth::{OperatorAuth, TenantExtension, TenantHeader};
use crate::error::{ApiError, not_found};
use crate::repositories::{CreateTenantRequest, TenantRepository};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request payload for creating a new tenant
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTenantRequestDto {
    /// Display name for the tenant (required, max 255 characters)
    #[schema(example = "Riverside Theatre Collective")]
    pub name: String,
}

/// Response payload for tenant operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TenantResponseDto {
    /// Unique identifier for the tenant (UUID)
    pub id: Uuid,
    /// Display name of the tenant
    pub name: String,
    /// Timestamp when the tenant was created (ISO 8601)
    pub created_at: String,
}

/// Create a new tenant
#[utoipa::path(
    post,
    path = "/api/v1/tenants",
    security(("bearer_auth" = [])),
    params(TenantHeader),
    request_body = CreateTenantRequestDto,
    responses(
        (status = 201, description = "Tenant created successfully", body = TenantResponseDto, headers(
            ("Location", description = "URL of the created tenant")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "tenants"
)]
pub async fn create_tenant(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    TenantExtension(_tenant): TenantExtension,
    Json(request): Json<CreateTenantRequestDto>,
) -> Result<(StatusCode, [(&'static str, String); 1], Json<TenantResponseDto>), ApiError> {
    let repo = TenantRepository::new(&state.db);
    let tenant = repo
        .create_tenant(CreateTenantRequest { name: request.name })
        .await?;

    let location = format!("/api/v1/tenants/{}", tenant.id);
    let body = TenantResponseDto {
        id: tenant.id,
        name: tenant.name.unwrap_or_default(),
        created_at: tenant.created_at.to_rfc3339(),
    };

    Ok((StatusCode::CREATED, [("Location", location)], Json(body)))
}

/// Get a tenant by ID
#[utoipa::path(
    get,
    path = "/api/v1/tenants/{tenant_id}",
    security(("bearer_auth" = [])),
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant UUID"),
        TenantHeader
    ),
    responses(
        (status = 200, description = "Tenant retrieved successfully", body = TenantResponseDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Tenant not found", body = ApiError)
    ),
    tag = "tenants"
)]
pub async fn get_tenant(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    TenantExtension(_tenant): TenantExtension,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<TenantResponseDto>, ApiError> {
    let repo = TenantRepository::new(&state.db);
    let tenant = repo
        .get_tenant_by_id(tenant_id)
        .await?
        .ok_or_else(|| not_found("Tenant"))?;

    Ok(Json(TenantResponseDto {
        id: tenant.id,
        name: tenant.name.unwrap_or_default(),
        created_at: tenant.created_at.to_rfc3339(),
    }))
}
