//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Resource not found
    #[error("{0} not found")]
    NotFound(&'static str),
    /// One or more validation messages, shown back to the editor
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    /// The operation conflicts with existing records
    #[error("Conflict: {0}")]
    Conflict(String),
    /// CSV headings rejected before any row was read
    #[error("Invalid headings: {}", .0.join(", "))]
    InvalidHeadings(Vec<String>),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DomainError::Validation(vec![message.into()])
    }
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
