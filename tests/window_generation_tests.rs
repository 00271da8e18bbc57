//! Tests for audition window generation: slot counts, slot sequences,
//! validation failures, and cascading deletes.

use anyhow::Result;
use axum::http::StatusCode;
use uuid::Uuid;

use auditions::models::SlotStatus;
use auditions::repositories::{SlotRepository, WindowRepository};

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{count_rows, create_test_tenant, generate_window, setup_test_db, time};

#[tokio::test]
async fn morning_sitting_generates_six_pending_slots() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;

    let (window, slots) = generate_window(&db, tenant, time(9, 0), time(12, 0), 30)
        .await
        .unwrap();

    assert_eq!(slots.len(), 6);
    let expected = [
        time(9, 0),
        time(9, 30),
        time(10, 0),
        time(10, 30),
        time(11, 0),
        time(11, 30),
    ];
    for (slot, expected_time) in slots.iter().zip(expected) {
        assert_eq!(slot.slot_time, expected_time);
        assert_eq!(slot.status, SlotStatus::Pending);
        assert_eq!(slot.assigned_identity_id, None);
        assert_eq!(slot.notes, None);
        assert_eq!(slot.window_id, window.id);
        assert_eq!(slot.tenant_id, tenant);
    }

    Ok(())
}

#[tokio::test]
async fn slot_count_equals_duration_over_block_length() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;

    let (_, slots) = generate_window(&db, tenant, time(13, 0), time(17, 0), 20)
        .await
        .unwrap();
    assert_eq!(slots.len(), 12);

    let (_, slots) = generate_window(&db, tenant, time(10, 0), time(10, 15), 15)
        .await
        .unwrap();
    assert_eq!(slots.len(), 1);

    Ok(())
}

#[tokio::test]
async fn slot_sequence_is_strictly_increasing_and_ends_before_end_time() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;

    let (window, slots) = generate_window(&db, tenant, time(9, 0), time(11, 30), 25)
        .await
        .unwrap();

    for pair in slots.windows(2) {
        assert!(pair[0].slot_time < pair[1].slot_time);
    }
    assert!(slots.last().unwrap().slot_time < window.end_time);

    Ok(())
}

#[tokio::test]
async fn non_dividing_block_length_is_rejected_with_nothing_persisted() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;

    // 180 minutes is not divisible by 35
    let err = generate_window(&db, tenant, time(9, 0), time(12, 0), 35)
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    let details = err.details.unwrap();
    assert_eq!(details["field"], "blockLengthMinutes");

    assert_eq!(count_rows(&db, "audition_windows").await?, 0);
    assert_eq!(count_rows(&db, "audition_slots").await?, 0);

    Ok(())
}

#[tokio::test]
async fn inverted_time_range_is_rejected_on_start_time() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;

    let err = generate_window(&db, tenant, time(14, 0), time(9, 0), 30)
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    let details = err.details.unwrap();
    assert_eq!(details["field"], "startTime");
    assert_eq!(count_rows(&db, "audition_windows").await?, 0);

    Ok(())
}

#[tokio::test]
async fn zero_block_length_is_rejected() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;

    let err = generate_window(&db, tenant, time(9, 0), time(12, 0), 0)
        .await
        .unwrap_err();

    let details = err.details.unwrap();
    assert_eq!(details["field"], "blockLengthMinutes");
    assert_eq!(count_rows(&db, "audition_slots").await?, 0);

    Ok(())
}

#[tokio::test]
async fn admin_view_returns_window_with_ordered_slots() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;
    let (window, _) = generate_window(&db, tenant, time(9, 0), time(10, 30), 30)
        .await
        .unwrap();

    let repo = WindowRepository::new(db.clone());
    let (found, slots) = repo.find_with_slots(tenant, window.id).await?.unwrap();

    assert_eq!(found.id, window.id);
    assert_eq!(slots.len(), 3);
    assert!(slots.windows(2).all(|pair| pair[0].slot_time < pair[1].slot_time));

    Ok(())
}

#[tokio::test]
async fn deleting_a_window_removes_every_slot() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;
    let (window, slots) = generate_window(&db, tenant, time(9, 0), time(12, 0), 30)
        .await
        .unwrap();

    let windows = WindowRepository::new(db.clone());
    let deleted = windows.delete_with_slots(tenant, window.id).await?;
    assert!(deleted);

    let slot_repo = SlotRepository::new(db.clone());
    for slot in slots {
        assert!(slot_repo.find_by_id(slot.id).await?.is_none());
    }
    assert!(windows.find_by_tenant(tenant, window.id).await?.is_none());
    assert_eq!(count_rows(&db, "audition_slots").await?, 0);

    Ok(())
}

#[tokio::test]
async fn deleting_an_unknown_window_reports_not_found() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_test_tenant(&db, None).await?;

    let windows = WindowRepository::new(db.clone());
    let deleted = windows.delete_with_slots(tenant, Uuid::new_v4()).await?;

    assert!(!deleted);

    Ok(())
}
