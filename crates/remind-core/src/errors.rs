//! Domain error types.
//!
//! [`DomainError`] covers every invariant the domain layer enforces. The
//! variants are small enough for exhaustive matching at the use-case
//! boundary, where most of them translate into field-scoped validation
//! failures.

use thiserror::Error;

/// Errors raised by domain constructors and transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Remind ID string failed to parse as a UUID.
    #[error("invalid remind ID")]
    InvalidRemindId,

    /// User ID was not a well-formed UUIDv7.
    #[error("invalid user ID: must be a valid UUIDv7")]
    InvalidUserId,

    /// Task ID was not a well-formed UUIDv7.
    #[error("invalid task ID: must be a valid UUIDv7")]
    InvalidTaskId,

    /// Task type string is outside the closed classification set.
    #[error("invalid task type: {0}")]
    InvalidTaskType(String),

    /// Device ID must be non-empty.
    #[error("device ID cannot be empty")]
    EmptyDeviceId,

    /// Delivery token must be non-empty.
    #[error("delivery token cannot be empty")]
    EmptyDeliveryToken,

    /// A device collection must contain at least one device.
    #[error("at least one device is required")]
    EmptyDevices,

    /// Slide window width below the 1-minute floor.
    #[error("slide window width must be at least 1 minute")]
    WindowWidthTooSmall,

    /// Slide window width above the 10-minute ceiling.
    #[error("slide window width must not exceed 10 minutes")]
    WindowWidthTooLarge,

    /// Remind time earlier than now minus the grace tolerance.
    #[error("remind time cannot be in the past")]
    PastRemindTime,

    /// Throttle latch is already set; the transition is a permitted
    /// self-loop and callers absorb this as idempotent success.
    #[error("remind is already throttled")]
    AlreadyThrottled,

    /// Time range start is after end.
    #[error("invalid time range: start must not be after end")]
    InvalidTimeRange,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
