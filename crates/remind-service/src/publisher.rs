//! Cancellation-event channel seam.
//!
//! The service emits exactly one [`RemindCancelledEvent`] per cancellation
//! that actually deleted something. Delivery is best-effort: publish
//! failures are logged by the caller and never fail the cancellation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Event emitted after reminders for a task were deleted.
#[derive(Debug, Clone, Serialize)]
pub struct RemindCancelledEvent {
    /// The cancelled task.
    pub task_id: String,
    /// The requesting user.
    pub user_id: String,
    /// How many reminders were deleted.
    pub deleted_count: u64,
    /// IDs of the deleted reminders.
    pub remind_ids: Vec<String>,
    /// When the cancellation happened.
    pub cancelled_at: DateTime<Utc>,
}

/// Failure to hand the event to the channel.
#[derive(Debug, Error)]
#[error("publish error: {message}")]
pub struct PublishError {
    /// What went wrong, as reported by the channel.
    pub message: String,
}

impl PublishError {
    /// Wrap a channel-level failure.
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Outbound event channel consumed by the service.
///
/// Implementations acknowledge the immediate publish only; no delivery
/// confirmation is awaited.
#[async_trait]
pub trait CancellationPublisher: Send + Sync {
    /// Publish a cancellation event.
    async fn publish_remind_cancelled(
        &self,
        event: &RemindCancelledEvent,
    ) -> Result<(), PublishError>;
}

/// Publisher that drops every event. Used when no channel is configured.
pub struct NullPublisher;

#[async_trait]
impl CancellationPublisher for NullPublisher {
    async fn publish_remind_cancelled(
        &self,
        _event: &RemindCancelledEvent,
    ) -> Result<(), PublishError> {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
