//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Only trait definitions, domain enums and domain error types.

pub mod editions;
pub mod errors;
pub mod publication_types;
pub mod repositories;
pub mod roles;

pub use editions::{DocumentType, EditionState};
pub use errors::DomainError;
pub use publication_types::PublicationType;
pub use repositories::*;
pub use roles::RoleType;
