//! Error types.
//!
//! | Variant | Meaning | Typical surface |
//! |---------|---------|-----------------|
//! | `Validation` | malformed request, rejected before any data access | client error |
//! | `NotFound` | a referenced entity is missing from the data store | 404 |
//! | `Store` | the data store failed | server error |
//! | `Cancelled` | the run was cancelled between sessions | - |
//! | `Config` | unreadable or malformed configuration | startup error |
//!
//! Scheduling shortfalls are not errors: they are reported as warnings
//! on a successful [`GenerationResult`](crate::models::GenerationResult).

use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Result alias for data store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Top-level error.
#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("invalid request: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("one or more {entity} not found: {}", .ids.join(", "))]
    NotFound { entity: &'static str, ids: Vec<String> },

    #[error("data store error: {0}")]
    Store(#[from] StoreError),

    #[error("generation cancelled")]
    Cancelled,

    #[error("configuration error: {0}")]
    Config(String),
}

impl TimetableError {
    /// Whether the caller is at fault (bad request or unknown reference).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TimetableError::Validation(_) | TimetableError::NotFound { .. }
        )
    }
}

impl From<Vec<ValidationError>> for TimetableError {
    fn from(errors: Vec<ValidationError>) -> Self {
        TimetableError::Validation(errors)
    }
}

/// Data store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{operation} failed: {message}")]
    Backend { operation: String, message: String },

    #[error("invalid dataset: {}", join_messages(.0))]
    InvalidDataset(Vec<ValidationError>),

    #[error("dataset parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a backend failure for a named operation.
    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Backend {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_validation_display_joins_messages() {
        let err = TimetableError::Validation(vec![
            ValidationError::new(
                ValidationErrorKind::MissingBatches,
                "At least one batch ID is required",
            ),
            ValidationError::new(
                ValidationErrorKind::MissingTimeSlots,
                "At least one time slot is required",
            ),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid request: At least one batch ID is required; At least one time slot is required"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_not_found_display() {
        let err = TimetableError::NotFound {
            entity: "batches",
            ids: vec!["B9".into(), "B10".into()],
        };
        assert_eq!(err.to_string(), "one or more batches not found: B9, B10");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_store_error_wraps() {
        let err: TimetableError =
            StoreError::backend("find_batches_by_ids", "connection reset").into();
        assert_eq!(
            err.to_string(),
            "data store error: find_batches_by_ids failed: connection reset"
        );
        assert!(!err.is_client_error());
        assert!(!TimetableError::Cancelled.is_client_error());
    }
}
