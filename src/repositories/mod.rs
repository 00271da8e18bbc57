//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM
//! operations for database entities. Every tenant-owned operation takes the
//! tenant id as an explicit parameter; the only exceptions are the lookups
//! backing the unauthenticated public endpoints, which resolve the tenant
//! from the fetched row.

pub mod identity;
pub mod slot;
pub mod tenant;
pub mod window;

pub use identity::IdentityRepository;
pub use slot::SlotRepository;
pub use tenant::{CreateTenantRequest, TenantRepository};
pub use window::WindowRepository;
