//! Plain value inputs and outputs for the use-case boundary.
//!
//! Nothing transport-specific crosses here: identifiers are strings, times
//! are UTC timestamps, device lists are plain pairs. Outputs flatten the
//! domain entities back into the same shape.

use chrono::{DateTime, Utc};
use remind_core::Remind;

/// One delivery target in a creation request.
#[derive(Debug, Clone)]
pub struct DeviceInput {
    /// Device identifier; must be non-empty.
    pub device_id: String,
    /// Push delivery token; must be non-empty.
    pub delivery_token: String,
}

/// Request to create a reminder batch for one task.
#[derive(Debug, Clone)]
pub struct CreateRemindsInput {
    /// Nominal reminder times; at least one required.
    pub times: Vec<DateTime<Utc>>,
    /// Owning user (UUIDv7 string).
    pub user_id: String,
    /// Delivery targets shared by the whole batch.
    pub devices: Vec<DeviceInput>,
    /// Originating task (UUIDv7 string); the batch idempotency key.
    pub task_id: String,
    /// Task classification label.
    pub task_type: String,
}

/// Inclusive time-range query.
#[derive(Debug, Clone, Copy)]
pub struct TimeRangeInput {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Inclusive upper bound.
    pub end: DateTime<Utc>,
}

/// Request to set the throttle latch on one reminder.
#[derive(Debug, Clone)]
pub struct UpdateThrottledInput {
    /// Reminder ID string.
    pub id: String,
    /// Requested latch state. `true` latches; `false` is a no-op
    /// write-through — the latch has no reverse transition.
    pub throttled: bool,
}

/// Request to delete one reminder.
#[derive(Debug, Clone)]
pub struct DeleteRemindInput {
    /// Reminder ID string.
    pub id: String,
}

/// Request to cancel every reminder for a task.
#[derive(Debug, Clone)]
pub struct CancelByTaskInput {
    /// Originating task (UUIDv7 string).
    pub task_id: String,
    /// Requesting user (UUIDv7 string); validated for well-formedness only.
    pub user_id: String,
}

/// One delivery target in a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceOutput {
    /// Device identifier.
    pub device_id: String,
    /// Push delivery token.
    pub delivery_token: String,
}

/// One reminder, flattened for the transport layer.
#[derive(Debug, Clone)]
pub struct RemindOutput {
    /// Reminder ID.
    pub id: String,
    /// Nominal reminder time.
    pub time: DateTime<Utc>,
    /// Owning user.
    pub user_id: String,
    /// Delivery targets.
    pub devices: Vec<DeviceOutput>,
    /// Originating task.
    pub task_id: String,
    /// Classification label.
    pub task_type: String,
    /// Delivery tolerance in whole seconds.
    pub slide_window_seconds: i64,
    /// Throttle latch state.
    pub throttled: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Remind> for RemindOutput {
    fn from(remind: &Remind) -> Self {
        Self {
            id: remind.id().to_string(),
            time: remind.time(),
            user_id: remind.user_id().to_string(),
            devices: remind
                .devices()
                .iter()
                .map(|d| DeviceOutput {
                    device_id: d.device_id().to_string(),
                    delivery_token: d.delivery_token().to_string(),
                })
                .collect(),
            task_id: remind.task_id().to_string(),
            task_type: remind.task_type().as_str().to_string(),
            slide_window_seconds: remind.slide_window_width().as_secs(),
            throttled: remind.is_throttled(),
            created_at: remind.created_at(),
            updated_at: remind.updated_at(),
        }
    }
}

/// A reminder batch with its count.
#[derive(Debug, Clone)]
pub struct RemindsOutput {
    /// The reminders, in the order the store returned them.
    pub reminds: Vec<RemindOutput>,
    /// Batch size.
    pub count: usize,
}

impl From<&[Remind]> for RemindsOutput {
    fn from(reminds: &[Remind]) -> Self {
        let reminds: Vec<RemindOutput> = reminds.iter().map(RemindOutput::from).collect();
        let count = reminds.len();
        Self { reminds, count }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
