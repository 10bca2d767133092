//! Identifier newtypes.
//!
//! [`RemindId`] is opaque — generated fresh with `Uuid::now_v7()` and parsed
//! from any well-formed UUID. [`UserId`] and [`TaskId`] come from an upstream
//! identifier scheme and must carry UUID version 7; anything else is rejected
//! at the boundary.

use std::fmt;

use uuid::Uuid;

use crate::errors::DomainError;

/// Unique identifier of a single reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemindId(Uuid);

impl RemindId {
    /// Generate a fresh time-ordered ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse from a string. Accepts any valid UUID.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::InvalidRemindId)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RemindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of the user a reminder batch belongs to. Must be UUIDv7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse from a string, enforcing UUID version 7.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let id = Uuid::parse_str(s).map_err(|_| DomainError::InvalidUserId)?;
        if id.get_version_num() != 7 {
            return Err(DomainError::InvalidUserId);
        }
        Ok(Self(id))
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of the originating task. Must be UUIDv7.
///
/// Also serves as the idempotency key for a creation batch: the first
/// successful batch under a task ID is authoritative for the task's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Parse from a string, enforcing UUID version 7.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let id = Uuid::parse_str(s).map_err(|_| DomainError::InvalidTaskId)?;
        if id.get_version_num() != 7 {
            return Err(DomainError::InvalidTaskId);
        }
        Ok(Self(id))
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
