//! Tests ensuring tenant isolation: records of one tenant are
//! indistinguishable from non-existent records for every other tenant.

use anyhow::Result;
use axum::http::StatusCode;

use auditions::models::SlotStatus;
use auditions::repositories::{IdentityRepository, SlotRepository, WindowRepository};
use auditions::reservations::ReservationService;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{count_rows, create_test_tenant, generate_window, setup_test_db, time};

#[tokio::test]
async fn windows_are_invisible_across_tenants() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant_a = create_test_tenant(&db, None).await?;
    let tenant_b = create_test_tenant(&db, None).await?;

    let (window, _) = generate_window(&db, tenant_a, time(9, 0), time(12, 0), 30)
        .await
        .unwrap();

    let windows = WindowRepository::new(db.clone());
    assert!(windows.find_by_tenant(tenant_b, window.id).await?.is_none());
    assert!(windows.find_with_slots(tenant_b, window.id).await?.is_none());

    // A cross-tenant delete is a no-op reported as not found.
    assert!(!windows.delete_with_slots(tenant_b, window.id).await?);
    assert!(windows.find_by_tenant(tenant_a, window.id).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn slot_administration_is_tenant_scoped() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant_a = create_test_tenant(&db, None).await?;
    let tenant_b = create_test_tenant(&db, None).await?;

    let (_, slots) = generate_window(&db, tenant_a, time(9, 0), time(10, 0), 30)
        .await
        .unwrap();

    let service = ReservationService::new(db.clone());

    let err = service
        .set_status(tenant_b, slots[0].id, SlotStatus::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);

    let err = service
        .set_notes(tenant_b, slots[0].id, Some("peeking".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);

    // The slot is untouched for its owner.
    let slot = SlotRepository::new(db.clone())
        .find_by_tenant(tenant_a, slots[0].id)
        .await?
        .unwrap();
    assert_eq!(slot.status, SlotStatus::Pending);
    assert_eq!(slot.notes, None);

    Ok(())
}

#[tokio::test]
async fn same_email_resolves_to_distinct_identities_per_tenant() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant_a = create_test_tenant(&db, None).await?;
    let tenant_b = create_test_tenant(&db, None).await?;

    let identities = IdentityRepository::new(db.clone());
    let in_a = identities
        .resolve(tenant_a, "jane@x.com", "Jane", "Doe")
        .await
        .unwrap();
    let in_b = identities
        .resolve(tenant_b, "jane@x.com", "Jane", "Doe")
        .await
        .unwrap();

    assert_ne!(in_a.id, in_b.id);
    assert_eq!(in_a.tenant_id, tenant_a);
    assert_eq!(in_b.tenant_id, tenant_b);
    assert_eq!(count_rows(&db, "identities").await?, 2);

    Ok(())
}

#[tokio::test]
async fn cross_tenant_lookup_of_identities_returns_nothing() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant_a = create_test_tenant(&db, None).await?;
    let tenant_b = create_test_tenant(&db, None).await?;

    let identities = IdentityRepository::new(db.clone());
    let created = identities
        .resolve(tenant_a, "jane@x.com", "Jane", "Doe")
        .await
        .unwrap();

    assert!(identities
        .find_by_email(tenant_b, "jane@x.com")
        .await?
        .is_none());
    let found = identities.find_by_ids(tenant_b, &[created.id]).await?;
    assert!(found.is_empty());

    Ok(())
}
