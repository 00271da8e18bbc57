//! Test utilities for database testing.
//!
//! This module provides utilities for setting up in-memory SQLite databases
//! with migrations for testing purposes, plus fixtures for tenants and
//! audition windows.

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use auditions::error::ApiError;
use auditions::models::{audition_slot, audition_window};
use auditions::repositories::WindowRepository;
use auditions::scheduling;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    // SQLite does not enforce our Postgres foreign key semantics; disable FK
    // checks so fixtures can be inserted without satisfying every relation.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = OFF".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Creates a test tenant in the database.
pub async fn create_test_tenant(
    db: &DatabaseConnection,
    tenant_id: Option<Uuid>,
) -> Result<Uuid> {
    let id = tenant_id.unwrap_or_else(Uuid::new_v4);

    let stmt = Statement::from_string(
        db.get_database_backend(),
        format!(
            "INSERT INTO tenants (id, name) VALUES ('{}', 'Test Tenant')",
            id
        ),
    );

    db.execute(stmt).await?;

    Ok(id)
}

/// Shorthand for building a time of day.
#[allow(dead_code)]
pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// Shorthand for building a calendar date.
#[allow(dead_code)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Generate a window the way the create endpoint does: validate the plan,
/// then persist window + slots in one unit of work.
#[allow(dead_code)]
pub async fn generate_window(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    start: NaiveTime,
    end: NaiveTime,
    block_length_minutes: i32,
) -> Result<(audition_window::Model, Vec<audition_slot::Model>), ApiError> {
    let plan = scheduling::plan_slots(start, end, block_length_minutes)?;

    WindowRepository::new(db.clone())
        .create_with_slots(
            tenant_id,
            Uuid::new_v4(),
            date(2026, 9, 12),
            plan.start_time,
            plan.end_time,
            plan.block_length_minutes,
            &plan.slot_times,
        )
        .await
}

/// Count rows in a table, for asserting that nothing was persisted.
#[allow(dead_code)]
pub async fn count_rows(db: &DatabaseConnection, table: &str) -> Result<i64> {
    let stmt = Statement::from_string(
        db.get_database_backend(),
        format!("SELECT COUNT(*) AS cnt FROM {}", table),
    );

    let row = db
        .query_one(stmt)
        .await?
        .ok_or_else(|| anyhow::anyhow!("count query returned no row"))?;

    Ok(row.try_get::<i64>("", "cnt")?)
}
