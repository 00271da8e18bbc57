//! # Audition Slot Handlers
//!
//! The public claim endpoint and the administrative status/notes endpoints.

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{OperatorAuth, TenantExtension, TenantHeader};
use crate::error::{ApiError, field_validation_error};
use crate::handlers::types::{IdentitySummaryDto, SlotDto};
use crate::models::SlotStatus;
use crate::reservations::ReservationService;
use crate::server::AppState;

/// Request payload for claiming a slot
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClaimSlotRequestDto {
    /// Applicant first name
    #[schema(example = "Jane")]
    pub first_name: String,
    /// Applicant last name
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Applicant email; compared case-insensitively across claims
    #[schema(example = "jane@example.com")]
    pub email: String,
}

/// Response payload for a successful claim
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClaimSlotResponseDto {
    /// The slot, now carrying the applicant's identity
    pub slot: SlotDto,
    /// The identity the claim resolved to
    pub identity: IdentitySummaryDto,
}

/// Request payload for updating a slot's status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SetStatusRequestDto {
    /// One of: pending, accepted, rejected, waitlisted
    #[schema(example = "accepted")]
    pub status: String,
}

/// Request payload for updating a slot's notes
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SetNotesRequestDto {
    /// Free text; null or absent clears the notes
    pub notes: Option<String>,
}

/// Claim a slot for an applicant.
///
/// Exactly one of any number of concurrent claims for the same slot
/// succeeds; the rest receive 409.
#[utoipa::path(
    post,
    path = "/public/v1/slots/{slot_id}/claim",
    params(
        ("slot_id" = Uuid, Path, description = "Slot UUID")
    ),
    request_body = ClaimSlotRequestDto,
    responses(
        (status = 200, description = "Slot claimed", body = ClaimSlotResponseDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Slot not found", body = ApiError),
        (status = 409, description = "Slot already claimed", body = ApiError)
    ),
    tag = "public"
)]
pub async fn claim_slot(
    State(state): State<AppState>,
    Path(slot_id): Path<Uuid>,
    Json(request): Json<ClaimSlotRequestDto>,
) -> Result<Json<ClaimSlotResponseDto>, ApiError> {
    let service = ReservationService::new(state.db.clone());
    let outcome = service
        .claim_slot(
            slot_id,
            &request.first_name,
            &request.last_name,
            &request.email,
        )
        .await?;

    Ok(Json(ClaimSlotResponseDto {
        slot: SlotDto::from(outcome.slot),
        identity: IdentitySummaryDto::from(outcome.identity),
    }))
}

/// Update the review status of a slot
#[utoipa::path(
    patch,
    path = "/api/v1/slots/{slot_id}/status",
    security(("bearer_auth" = [])),
    params(
        ("slot_id" = Uuid, Path, description = "Slot UUID"),
        TenantHeader
    ),
    request_body = SetStatusRequestDto,
    responses(
        (status = 200, description = "Slot updated", body = SlotDto),
        (status = 400, description = "Unrecognized status value", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Slot not found", body = ApiError)
    ),
    tag = "slots"
)]
pub async fn set_status(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    TenantExtension(tenant): TenantExtension,
    Path(slot_id): Path<Uuid>,
    Json(request): Json<SetStatusRequestDto>,
) -> Result<Json<SlotDto>, ApiError> {
    let status = SlotStatus::from_str(&request.status).map_err(|_| {
        field_validation_error(
            "status",
            "status must be one of pending, accepted, rejected, waitlisted",
        )
    })?;

    let service = ReservationService::new(state.db.clone());
    let slot = service.set_status(tenant.0, slot_id, status).await?;

    Ok(Json(SlotDto::from(slot)))
}

/// Update or clear the notes of a slot
#[utoipa::path(
    put,
    path = "/api/v1/slots/{slot_id}/notes",
    security(("bearer_auth" = [])),
    params(
        ("slot_id" = Uuid, Path, description = "Slot UUID"),
        TenantHeader
    ),
    request_body = SetNotesRequestDto,
    responses(
        (status = 200, description = "Slot updated", body = SlotDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Slot not found", body = ApiError)
    ),
    tag = "slots"
)]
pub async fn set_notes(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    TenantExtension(tenant): TenantExtension,
    Path(slot_id): Path<Uuid>,
    Json(request): Json<SetNotesRequestDto>,
) -> Result<Json<SlotDto>, ApiError> {
    let service = ReservationService::new(state.db.clone());
    let slot = service.set_notes(tenant.0, slot_id, request.notes).await?;

    Ok(Json(SlotDto::from(slot)))
}
