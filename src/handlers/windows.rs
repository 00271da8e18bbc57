//! # Audition Window Handlers
//!
//! Administrative window creation, inspection, and deletion, plus the
//! unauthenticated public view used by applicants to pick a slot.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{OperatorAuth, TenantExtension, TenantHeader};
use crate::error::{ApiError, not_found};
use crate::handlers::types::IdentitySummaryDto;
use crate::repositories::{IdentityRepository, WindowRepository};
use crate::reservations::ReservationService;
use crate::scheduling;
use crate::server::AppState;

/// Request payload for creating an audition window
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateWindowRequestDto {
    /// Program year the window belongs to
    pub program_year_id: Uuid,
    /// Calendar date of the sitting
    #[schema(example = "2026-09-12")]
    pub date: NaiveDate,
    /// Time of day the first slot starts
    #[schema(example = "09:00:00")]
    pub start_time: NaiveTime,
    /// Time of day the window ends (exclusive)
    #[schema(example = "12:00:00")]
    pub end_time: NaiveTime,
    /// Length of each slot in minutes; must evenly divide the window
    #[schema(example = 30)]
    pub block_length_minutes: i32,
}

/// One slot in the administrative window view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WindowSlotDto {
    /// Unique identifier of the slot
    pub id: Uuid,
    /// Time of day the slot starts
    #[schema(example = "09:30:00")]
    pub slot_time: NaiveTime,
    /// Current review status
    pub status: crate::models::SlotStatus,
    /// Administrator-only free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Identity that claimed the slot, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_identity: Option<IdentitySummaryDto>,
}

/// Administrative window representation with its full slot set
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminWindowDto {
    /// Unique identifier of the window
    pub id: Uuid,
    /// Program year the window belongs to
    pub program_year_id: Uuid,
    /// Calendar date of the sitting
    pub date: NaiveDate,
    /// Time of day the first slot starts
    pub start_time: NaiveTime,
    /// Time of day the window ends (exclusive)
    pub end_time: NaiveTime,
    /// Length of each slot in minutes
    pub block_length_minutes: i32,
    /// Slots of this window, ordered by slot time
    pub slots: Vec<WindowSlotDto>,
}

/// One slot in the public window view
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicSlotDto {
    /// Unique identifier of the slot
    pub slot_id: Uuid,
    /// Time of day the slot starts
    #[schema(example = "09:30:00")]
    pub slot_time: NaiveTime,
    /// Whether the slot can still be claimed
    pub is_available: bool,
}

/// Public window representation: availability only, no administrative fields
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicWindowDto {
    /// Unique identifier of the window
    pub window_id: Uuid,
    /// Calendar date of the sitting
    pub date: NaiveDate,
    /// Slots of this window, ordered by slot time
    pub slots: Vec<PublicSlotDto>,
}

/// Create an audition window and generate its slots
#[utoipa::path(
    post,
    path = "/api/v1/windows",
    security(("bearer_auth" = [])),
    params(TenantHeader),
    request_body = CreateWindowRequestDto,
    responses(
        (status = 201, description = "Window and slots created", body = AdminWindowDto, headers(
            ("Location", description = "URL of the created window")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "windows"
)]
pub async fn create_window(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    TenantExtension(tenant): TenantExtension,
    Json(request): Json<CreateWindowRequestDto>,
) -> Result<(StatusCode, [(&'static str, String); 1], Json<AdminWindowDto>), ApiError> {
    let plan = scheduling::plan_slots(
        request.start_time,
        request.end_time,
        request.block_length_minutes,
    )?;

    let repo = WindowRepository::new(state.db.clone());
    let (window, slots) = repo
        .create_with_slots(
            tenant.0,
            request.program_year_id,
            request.date,
            plan.start_time,
            plan.end_time,
            plan.block_length_minutes,
            &plan.slot_times,
        )
        .await?;

    let location = format!("/api/v1/windows/{}", window.id);
    let body = AdminWindowDto {
        id: window.id,
        program_year_id: window.program_year_id,
        date: window.date,
        start_time: window.start_time,
        end_time: window.end_time,
        block_length_minutes: window.block_length_minutes,
        slots: slots
            .into_iter()
            .map(|slot| WindowSlotDto {
                id: slot.id,
                slot_time: slot.slot_time,
                status: slot.status,
                notes: slot.notes,
                assigned_identity: None,
            })
            .collect(),
    };

    Ok((StatusCode::CREATED, [("Location", location)], Json(body)))
}

/// Get an audition window with status, notes, and assigned identities
#[utoipa::path(
    get,
    path = "/api/v1/windows/{window_id}",
    security(("bearer_auth" = [])),
    params(
        ("window_id" = Uuid, Path, description = "Window UUID"),
        TenantHeader
    ),
    responses(
        (status = 200, description = "Window with slots", body = AdminWindowDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Window not found", body = ApiError)
    ),
    tag = "windows"
)]
pub async fn get_window(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    TenantExtension(tenant): TenantExtension,
    Path(window_id): Path<Uuid>,
) -> Result<Json<AdminWindowDto>, ApiError> {
    let repo = WindowRepository::new(state.db.clone());
    let (window, slots) = repo
        .find_with_slots(tenant.0, window_id)
        .await?
        .ok_or_else(|| not_found("Audition window"))?;

    let assigned_ids: Vec<Uuid> = slots
        .iter()
        .filter_map(|slot| slot.assigned_identity_id)
        .collect();
    let identities = IdentityRepository::new(state.db.clone())
        .find_by_ids(tenant.0, &assigned_ids)
        .await?;

    let slots = slots
        .into_iter()
        .map(|slot| {
            let assigned_identity = slot.assigned_identity_id.and_then(|identity_id| {
                identities
                    .iter()
                    .find(|identity| identity.id == identity_id)
                    .cloned()
                    .map(IdentitySummaryDto::from)
            });
            WindowSlotDto {
                id: slot.id,
                slot_time: slot.slot_time,
                status: slot.status,
                notes: slot.notes,
                assigned_identity,
            }
        })
        .collect();

    Ok(Json(AdminWindowDto {
        id: window.id,
        program_year_id: window.program_year_id,
        date: window.date,
        start_time: window.start_time,
        end_time: window.end_time,
        block_length_minutes: window.block_length_minutes,
        slots,
    }))
}

/// Delete an audition window and every slot belonging to it
#[utoipa::path(
    delete,
    path = "/api/v1/windows/{window_id}",
    security(("bearer_auth" = [])),
    params(
        ("window_id" = Uuid, Path, description = "Window UUID"),
        TenantHeader
    ),
    responses(
        (status = 204, description = "Window and slots deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Window not found", body = ApiError)
    ),
    tag = "windows"
)]
pub async fn delete_window(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    TenantExtension(tenant): TenantExtension,
    Path(window_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = WindowRepository::new(state.db.clone());
    let deleted = repo.delete_with_slots(tenant.0, window_id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Audition window"))
    }
}

/// Public view of a window: slot times and availability only
#[utoipa::path(
    get,
    path = "/public/v1/windows/{window_id}",
    params(
        ("window_id" = Uuid, Path, description = "Window UUID")
    ),
    responses(
        (status = 200, description = "Window availability", body = PublicWindowDto),
        (status = 404, description = "Window not found", body = ApiError)
    ),
    tag = "public"
)]
pub async fn public_view(
    State(state): State<AppState>,
    Path(window_id): Path<Uuid>,
) -> Result<Json<PublicWindowDto>, ApiError> {
    let service = ReservationService::new(state.db.clone());
    let view = service.public_view(window_id).await?;

    Ok(Json(PublicWindowDto {
        window_id: view.window.id,
        date: view.window.date,
        slots: view
            .slots
            .into_iter()
            .map(|slot| PublicSlotDto {
                slot_id: slot.slot_id,
                slot_time: slot.slot_time,
                is_available: slot.is_available,
            })
            .collect(),
    }))
}
