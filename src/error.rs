//! Error types shared by the store and the controller. Driver errors from
//! `rusqlite` are flattened into `StoreError` messages so nothing above the
//! persistence layer depends on the database engine.

use thiserror::Error;

/// Any failure raised by a [`StudentStore`](crate::store::StudentStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Failed to connect to the database: {0}")]
    Connection(String),
    #[error("Failed to create the student table: {0}")]
    Schema(String),
    #[error("A student with enrollment id {enrollment_id} already exists.")]
    Duplicate { enrollment_id: i64 },
    #[error("Student {enrollment_id} does not exist.")]
    NotFound { enrollment_id: i64 },
    #[error("The database is not connected.")]
    NotConnected,
    #[error("{0}")]
    Query(String),
}

impl StoreError {
    /// Build a `Query` error from a driver failure, prefixing what was being
    /// attempted.
    pub(crate) fn query(action: &str, err: impl std::fmt::Display) -> Self {
        StoreError::Query(format!("Failed to {action}: {err}"))
    }
}

/// Malformed or missing form input. Never fatal; shown to the user as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Some fields are empty.")]
    EmptyFields,
    #[error("Enrollment, Score 1 and Score 2 must be numeric.")]
    NonNumeric,
    #[error("Enrollment must be greater than zero.")]
    NonPositiveId,
}

/// Everything the controller can hand back to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("The student list is not open.")]
    ViewClosed,
}
