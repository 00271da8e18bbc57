//! # Data Models
//!
//! This module contains all the SeaORM entity models used throughout the
//! Auditions API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod audition_slot;
pub mod audition_window;
pub mod identity;
pub mod tenant;

pub use audition_slot::Entity as AuditionSlot;
pub use audition_slot::SlotStatus;
pub use audition_window::Entity as AuditionWindow;
pub use identity::Entity as Identity;
pub use tenant::Entity as Tenant;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "callboard-auditions".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
