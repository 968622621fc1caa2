//! Services Layer
//!
//! Business logic called by the Axum handlers and the import command.

pub mod role_service;
pub mod sidebar;
pub mod statistics_announcement_service;
pub mod topic_admin_service;
pub mod topic_service;

/// Result of a guarded destroy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyOutcome {
    Destroyed { name: String },
    Refused { name: String },
}
