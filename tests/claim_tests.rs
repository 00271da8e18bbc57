//! Tests for the slot claim protocol: the at-most-one-winner guarantee,
//! identity resolution, and the public availability view.

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use tokio::sync::Barrier;
use uuid::Uuid;

use auditions::models::SlotStatus;
use auditions::repositories::{IdentityRepository, SlotRepository};
use auditions::reservations::ReservationService;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{count_rows, create_test_tenant, generate_window, setup_test_db, time};

#[tokio::test]
async fn successful_claim_assigns_identity_and_keeps_status_pending() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;
    let (_, slots) = generate_window(&db, tenant, time(9, 0), time(10, 0), 30)
        .await
        .unwrap();

    let service = ReservationService::new(db.clone());
    let outcome = service
        .claim_slot(slots[0].id, "Jane", "Doe", "jane@example.com")
        .await
        .unwrap();

    assert_eq!(outcome.slot.status, SlotStatus::Pending);
    assert_eq!(outcome.slot.assigned_identity_id, Some(outcome.identity.id));
    assert_eq!(outcome.identity.email, "jane@example.com");
    assert_eq!(outcome.identity.first_name, "Jane");
    assert_eq!(outcome.identity.tenant_id, tenant);

    Ok(())
}

#[tokio::test]
async fn blank_email_is_rejected_before_any_side_effect() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;
    let (_, slots) = generate_window(&db, tenant, time(9, 0), time(10, 0), 30)
        .await
        .unwrap();

    let service = ReservationService::new(db.clone());
    for email in ["", "   ", "\t"] {
        let err = service
            .claim_slot(slots[0].id, "Jane", "Doe", email)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        let details = err.details.unwrap();
        assert_eq!(details["field"], "email");
    }

    // No identity was created and the slot is still unassigned.
    assert_eq!(count_rows(&db, "identities").await?, 0);
    let slot = SlotRepository::new(db.clone())
        .find_by_id(slots[0].id)
        .await?
        .unwrap();
    assert_eq!(slot.assigned_identity_id, None);

    Ok(())
}

#[tokio::test]
async fn claiming_an_unknown_slot_fails_before_identity_resolution() -> Result<()> {
    let db = setup_test_db().await?;
    create_test_tenant(&db, None).await?;

    let service = ReservationService::new(db.clone());
    let err = service
        .claim_slot(Uuid::new_v4(), "Jane", "Doe", "jane@example.com")
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(count_rows(&db, "identities").await?, 0);

    Ok(())
}

#[tokio::test]
async fn second_claim_for_the_same_slot_conflicts() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;
    let (_, slots) = generate_window(&db, tenant, time(9, 0), time(10, 0), 30)
        .await
        .unwrap();

    let service = ReservationService::new(db.clone());
    let winner = service
        .claim_slot(slots[0].id, "Jane", "Doe", "jane@example.com")
        .await
        .unwrap();

    let err = service
        .claim_slot(slots[0].id, "John", "Roe", "john@example.com")
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::CONFLICT);

    // The loser's assignment never replaces the winner's.
    let slot = SlotRepository::new(db.clone())
        .find_by_id(slots[0].id)
        .await?
        .unwrap();
    assert_eq!(slot.assigned_identity_id, Some(winner.identity.id));

    Ok(())
}

#[tokio::test]
async fn concurrent_claims_produce_exactly_one_winner() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;
    let (_, slots) = generate_window(&db, tenant, time(9, 0), time(9, 30), 30)
        .await
        .unwrap();
    let slot_id = slots[0].id;

    let claimants = 8;
    let barrier = Arc::new(Barrier::new(claimants));
    let mut handles = Vec::with_capacity(claimants);

    for i in 0..claimants {
        let db = db.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            let service = ReservationService::new(db);
            barrier.wait().await;
            service
                .claim_slot(
                    slot_id,
                    "Applicant",
                    &format!("Number{}", i),
                    &format!("applicant{}@example.com", i),
                )
                .await
        }));
    }

    let mut wins = 0;
    let mut conflicts = 0;
    let mut winner_identity = None;
    for handle in handles {
        match handle.await? {
            Ok(outcome) => {
                wins += 1;
                winner_identity = outcome.slot.assigned_identity_id;
            }
            Err(err) => {
                assert_eq!(err.status, StatusCode::CONFLICT);
                conflicts += 1;
            }
        }
    }

    assert_eq!(wins, 1);
    assert_eq!(conflicts, claimants - 1);

    // The stored assignment matches the single winner.
    let slot = SlotRepository::new(db.clone())
        .find_by_id(slot_id)
        .await?
        .unwrap();
    assert_eq!(slot.assigned_identity_id, winner_identity);
    assert!(slot.assigned_identity_id.is_some());

    Ok(())
}

#[tokio::test]
async fn identity_resolution_is_case_insensitive_and_idempotent() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;
    let (_, slots) = generate_window(&db, tenant, time(9, 0), time(10, 0), 30)
        .await
        .unwrap();

    let service = ReservationService::new(db.clone());
    let first = service
        .claim_slot(slots[0].id, "Jane", "Doe", "jane@x.com")
        .await
        .unwrap();
    let second = service
        .claim_slot(slots[1].id, "Janet", "Doe", "JANE@X.COM")
        .await
        .unwrap();

    assert_eq!(first.identity.id, second.identity.id);
    // The later claim's names never overwrite the existing record.
    assert_eq!(second.identity.first_name, "Jane");
    assert_eq!(count_rows(&db, "identities").await?, 1);

    Ok(())
}

#[tokio::test]
async fn resolver_reuses_identity_across_repeated_calls() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;

    let identities = IdentityRepository::new(db.clone());
    let created = identities
        .resolve(tenant, "  Sam@Example.COM ", "Sam", "Lee")
        .await
        .unwrap();
    assert_eq!(created.email, "sam@example.com");

    let reused = identities
        .resolve(tenant, "sam@example.com", "Samuel", "Lee")
        .await
        .unwrap();
    assert_eq!(reused.id, created.id);
    assert_eq!(reused.first_name, "Sam");
    assert_eq!(count_rows(&db, "identities").await?, 1);

    Ok(())
}

#[tokio::test]
async fn public_view_hides_identity_and_only_flips_the_claimed_slot() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;
    let (window, slots) = generate_window(&db, tenant, time(9, 0), time(12, 0), 30)
        .await
        .unwrap();

    let service = ReservationService::new(db.clone());
    service
        .claim_slot(slots[2].id, "Jane", "Doe", "jane@example.com")
        .await
        .unwrap();

    let view = service.public_view(window.id).await.unwrap();
    assert_eq!(view.slots.len(), 6);

    for public_slot in &view.slots {
        if public_slot.slot_id == slots[2].id {
            assert!(!public_slot.is_available);
        } else {
            assert!(public_slot.is_available);
        }
    }

    Ok(())
}

#[tokio::test]
async fn public_view_of_unknown_window_reports_not_found() -> Result<()> {
    let db = setup_test_db().await?;
    create_test_tenant(&db, None).await?;

    let service = ReservationService::new(db.clone());
    let err = service.public_view(Uuid::new_v4()).await.unwrap_err();

    assert_eq!(err.status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn status_and_notes_administration_round_trip() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;
    let (_, slots) = generate_window(&db, tenant, time(9, 0), time(10, 0), 30)
        .await
        .unwrap();

    let service = ReservationService::new(db.clone());

    let updated = service
        .set_status(tenant, slots[0].id, SlotStatus::Waitlisted)
        .await
        .unwrap();
    assert_eq!(updated.status, SlotStatus::Waitlisted);

    let noted = service
        .set_notes(tenant, slots[0].id, Some("strong vocal range".to_string()))
        .await
        .unwrap();
    assert_eq!(noted.notes.as_deref(), Some("strong vocal range"));

    let cleared = service.set_notes(tenant, slots[0].id, None).await.unwrap();
    assert_eq!(cleared.notes, None);

    // Administrative writes never touch the claim assignment.
    assert_eq!(cleared.assigned_identity_id, None);

    Ok(())
}

#[tokio::test]
async fn admin_updates_to_unknown_slots_report_not_found() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;

    let service = ReservationService::new(db.clone());

    let err = service
        .set_status(tenant, Uuid::new_v4(), SlotStatus::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);

    let err = service
        .set_notes(tenant, Uuid::new_v4(), Some("late".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);

    Ok(())
}
