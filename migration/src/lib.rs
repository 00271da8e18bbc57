//! Database migrations for the Auditions API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_05_04_100000_create_tenants;
mod m2026_05_04_100100_create_identities;
mod m2026_05_04_100200_create_audition_windows;
mod m2026_05_04_100300_create_audition_slots;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_05_04_100000_create_tenants::Migration),
            Box::new(m2026_05_04_100100_create_identities::Migration),
            Box::new(m2026_05_04_100200_create_audition_windows::Migration),
            Box::new(m2026_05_04_100300_create_audition_slots::Migration),
        ]
    }
}
