//! Use-case failure taxonomy.
//!
//! Validation and not-found failures carry caller-safe detail and cross the
//! transport boundary verbatim. Internal failures keep their cause in the
//! message for logging but are presented opaquely to callers. Idempotent
//! operations never surface "already done" through these variants.

use remind_store::StoreError;
use thiserror::Error;

/// Classified failures returned by every use-case operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or out-of-range input, scoped to the offending field.
    /// List elements are indexed, e.g. `times[2]` or `devices[0]`.
    #[error("validation error: {field} - {message}")]
    Validation {
        /// The offending input field.
        field: String,
        /// Why it was rejected.
        message: String,
    },

    /// Referenced entity does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// What was missing.
        message: String,
    },

    /// Store-level uniqueness race not absorbed by the idempotency read.
    #[error("already exists: {message}")]
    AlreadyExists {
        /// The conflicting constraint.
        message: String,
    },

    /// Store or channel failure; opaque to the caller.
    #[error("internal error: {message}")]
    Internal {
        /// Underlying cause, for logs only.
        message: String,
    },
}

impl ServiceError {
    /// Field-scoped validation failure.
    pub fn validation(field: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Entity lookup failure.
    pub fn not_found(message: impl std::fmt::Display) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    /// Wrapped internal failure.
    pub fn internal(message: impl std::fmt::Display) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { message } => Self::AlreadyExists { message },
            other => Self::internal(other),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn validation_names_the_field() {
        let err = ServiceError::validation("times[2]", "remind time cannot be in the past");
        assert_eq!(
            err.to_string(),
            "validation error: times[2] - remind time cannot be in the past"
        );
    }

    #[test]
    fn conflict_maps_to_already_exists() {
        let err: ServiceError = StoreError::Conflict {
            message: "UNIQUE constraint failed".into(),
        }
        .into();
        assert_matches!(err, ServiceError::AlreadyExists { .. });
    }

    #[test]
    fn other_store_errors_map_to_internal() {
        let err: ServiceError = StoreError::Migration {
            message: "v001 failed".into(),
        }
        .into();
        assert_matches!(err, ServiceError::Internal { message } if message.contains("v001"));
    }
}
