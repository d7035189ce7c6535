use thiserror::Error;

/// Every failure of the data access layer, classified so callers can map
/// each kind to a status code or decide to re-fetch and retry. Nothing is
/// retried in here.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("invalid cursor format")]
    InvalidCursorFormat,

    #[error("cursor does not match the requested sort {requested}")]
    CursorSortMismatch { requested: &'static str },

    #[error("task {id} was not found or its version is stale")]
    UpdateConflictOrNotFound { id: String },

    #[error("unique key constraint violated")]
    UniqueKeyConstraint,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
