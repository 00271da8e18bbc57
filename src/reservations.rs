//! Reservation coordination for audition slots.
//!
//! This module owns the public claim protocol and the administrative
//! status/notes operations. The claim is the only operation in the service
//! where concurrent writers contend: many unauthenticated callers may race
//! for the same slot, and exactly one must win. The decision is delegated to
//! the store as a conditional update (`assign if and only if still
//! unassigned`); losers get a definitive Conflict with no retry or queueing.

use metrics::counter;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::{ApiError, conflict, field_validation_error, not_found};
use crate::models::audition_slot;
use crate::models::audition_window;
use crate::models::identity;
use crate::models::SlotStatus;
use crate::repositories::{IdentityRepository, SlotRepository, WindowRepository};

/// Outcome of a successful claim: the slot now carrying the caller's
/// identity, plus the identity record it resolved to.
#[derive(Debug, Clone)]
pub struct ClaimOutcome {
    pub slot: audition_slot::Model,
    pub identity: identity::Model,
}

/// Public projection of one slot: time and availability only.
#[derive(Debug, Clone)]
pub struct PublicSlot {
    pub slot_id: Uuid,
    pub slot_time: chrono::NaiveTime,
    pub is_available: bool,
}

/// Public projection of a window and its slots.
#[derive(Debug, Clone)]
pub struct PublicWindowView {
    pub window: audition_window::Model,
    pub slots: Vec<PublicSlot>,
}

/// Coordinates slot claims and status administration over the store.
pub struct ReservationService {
    slots: SlotRepository,
    windows: WindowRepository,
    identities: IdentityRepository,
}

impl ReservationService {
    /// Create a new ReservationService over the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            slots: SlotRepository::new(db.clone()),
            windows: WindowRepository::new(db.clone()),
            identities: IdentityRepository::new(db),
        }
    }

    /// Claim a slot for an applicant.
    ///
    /// Order matters here: a blank email fails before any lookup, a missing
    /// slot fails before identity resolution, and the assignment itself is a
    /// single conditional update. Identity resolution may run for callers
    /// that go on to lose the race; it is idempotent, so that is harmless.
    pub async fn claim_slot(
        &self,
        slot_id: Uuid,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<ClaimOutcome, ApiError> {
        if email.trim().is_empty() {
            return Err(field_validation_error("email", "email must not be blank"));
        }

        let slot = self
            .slots
            .find_by_id(slot_id)
            .await?
            .ok_or_else(|| not_found("Audition slot"))?;

        let identity = self
            .identities
            .resolve(slot.tenant_id, email, first_name, last_name)
            .await?;

        let rows_affected = self
            .slots
            .claim_if_unassigned(slot.tenant_id, slot.id, identity.id)
            .await?;

        if rows_affected == 0 {
            counter!("audition_claims_conflicted_total").increment(1);
            tracing::info!(
                tenant_id = %slot.tenant_id,
                slot_id = %slot.id,
                "Claim lost the race for an already-assigned slot"
            );
            return Err(conflict("Slot has already been claimed"));
        }

        counter!("audition_claims_won_total").increment(1);
        tracing::info!(
            tenant_id = %slot.tenant_id,
            slot_id = %slot.id,
            identity_id = %identity.id,
            "Slot claimed"
        );

        let slot = self
            .slots
            .find_by_id(slot_id)
            .await?
            .ok_or_else(|| not_found("Audition slot"))?;

        Ok(ClaimOutcome { slot, identity })
    }

    /// Public view of a window: slot times and availability, nothing else.
    pub async fn public_view(&self, window_id: Uuid) -> Result<PublicWindowView, ApiError> {
        let window = self
            .windows
            .find_by_id(window_id)
            .await?
            .ok_or_else(|| not_found("Audition window"))?;

        let slots = self
            .windows
            .list_slots(window.id)
            .await?
            .into_iter()
            .map(|slot| PublicSlot {
                slot_id: slot.id,
                slot_time: slot.slot_time,
                is_available: slot.assigned_identity_id.is_none(),
            })
            .collect();

        Ok(PublicWindowView { window, slots })
    }

    /// Set the review status of a slot (administrative, last write wins).
    pub async fn set_status(
        &self,
        tenant_id: Uuid,
        slot_id: Uuid,
        status: SlotStatus,
    ) -> Result<audition_slot::Model, ApiError> {
        self.slots
            .set_status(tenant_id, slot_id, status)
            .await?
            .ok_or_else(|| not_found("Audition slot"))
    }

    /// Set or clear the notes of a slot (administrative).
    pub async fn set_notes(
        &self,
        tenant_id: Uuid,
        slot_id: Uuid,
        notes: Option<String>,
    ) -> Result<audition_slot::Model, ApiError> {
        let notes = notes.filter(|n| !n.is_empty());

        self.slots
            .set_notes(tenant_id, slot_id, notes)
            .await?
            .ok_or_else(|| not_found("Audition slot"))
    }
}
