//! The `Remind` aggregate and the `TimeRange` query value.
//!
//! A reminder is created fresh via [`Remind::new`] (invariants enforced) or
//! rehydrated from storage via [`Remind::reconstitute`] (trusted fields).
//! After creation the only permitted mutation is the one-way throttle latch.

use chrono::{DateTime, Duration, Utc};

use crate::device::Devices;
use crate::errors::DomainError;
use crate::ids::{RemindId, TaskId, UserId};
use crate::task_type::TaskType;
use crate::window::SlideWindowWidth;

/// Grace tolerance when validating the reminder time against "now".
/// Absorbs clock skew and upstream processing latency, not genuine
/// past scheduling.
fn past_time_grace() -> Duration {
    Duration::minutes(1)
}

/// A scheduled notification record: one task, one time, one device set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remind {
    id: RemindId,
    time: DateTime<Utc>,
    user_id: UserId,
    devices: Devices,
    task_id: TaskId,
    task_type: TaskType,
    slide_window_width: SlideWindowWidth,
    throttled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Remind {
    /// Create a fresh reminder.
    ///
    /// Rejects times earlier than now minus a one-minute grace tolerance.
    /// The slide-window width comes from the batch calculator and is fixed
    /// for the life of the entity.
    pub fn new(
        time: DateTime<Utc>,
        user_id: UserId,
        devices: Devices,
        task_id: TaskId,
        task_type: TaskType,
        slide_window_width: SlideWindowWidth,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        if time < now - past_time_grace() {
            return Err(DomainError::PastRemindTime);
        }

        Ok(Self {
            id: RemindId::generate(),
            time,
            user_id,
            devices,
            task_id,
            task_type,
            slide_window_width,
            throttled: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrate an existing reminder from storage. No invariant checks
    /// beyond what the field types already carry.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: RemindId,
        time: DateTime<Utc>,
        user_id: UserId,
        devices: Devices,
        task_id: TaskId,
        task_type: TaskType,
        slide_window_width: SlideWindowWidth,
        throttled: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            time,
            user_id,
            devices,
            task_id,
            task_type,
            slide_window_width,
            throttled,
            created_at,
            updated_at,
        }
    }

    /// Set the throttle latch.
    ///
    /// Normal → Throttled is the only transition; reaching Throttled from
    /// Throttled returns [`DomainError::AlreadyThrottled`], which callers
    /// treat as an idempotent self-loop rather than a failure.
    pub fn mark_throttled(&mut self) -> Result<(), DomainError> {
        if self.throttled {
            return Err(DomainError::AlreadyThrottled);
        }

        self.throttled = true;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether the nominal time has already passed.
    pub fn is_due(&self) -> bool {
        Utc::now() > self.time
    }

    /// Unique identifier.
    pub fn id(&self) -> RemindId {
        self.id
    }

    /// Nominal reminder time.
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Owning user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Delivery targets.
    pub fn devices(&self) -> &Devices {
        &self.devices
    }

    /// Originating task.
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Task classification.
    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Delivery tolerance window.
    pub fn slide_window_width(&self) -> SlideWindowWidth {
        self.slide_window_width
    }

    /// Throttle latch state.
    pub fn is_throttled(&self) -> bool {
        self.throttled
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last-update timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Inclusive time range for reminder queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Construct a range; `start` must not be after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidTimeRange);
        }
        Ok(Self { start, end })
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Inclusive upper bound.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `t` falls within the range, bounds included.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t <= self.end
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;
    use crate::window::target_window_width;
    use uuid::Uuid;

    fn user_id() -> UserId {
        UserId::parse(&Uuid::now_v7().to_string()).unwrap()
    }

    fn task_id() -> TaskId {
        TaskId::parse(&Uuid::now_v7().to_string()).unwrap()
    }

    fn devices() -> Devices {
        Devices::new(vec![Device::new("device-1", "token-1").unwrap()]).unwrap()
    }

    fn fresh(time: DateTime<Utc>) -> Result<Remind, DomainError> {
        Remind::new(
            time,
            user_id(),
            devices(),
            task_id(),
            TaskType::Near,
            target_window_width(TaskType::Near),
        )
    }

    #[test]
    fn new_remind_starts_unthrottled() {
        let remind = fresh(Utc::now() + Duration::hours(1)).unwrap();
        assert!(!remind.is_throttled());
    }

    #[test]
    fn rejects_time_beyond_grace() {
        let err = fresh(Utc::now() - Duration::minutes(2)).unwrap_err();
        assert_eq!(err, DomainError::PastRemindTime);
    }

    #[test]
    fn accepts_time_within_grace() {
        // 30 seconds in the past is inside the one-minute tolerance.
        assert!(fresh(Utc::now() - Duration::seconds(30)).is_ok());
    }

    #[test]
    fn mark_throttled_latches() {
        let mut remind = fresh(Utc::now() + Duration::hours(1)).unwrap();
        remind.mark_throttled().unwrap();
        assert!(remind.is_throttled());
    }

    #[test]
    fn mark_throttled_twice_reports_self_loop() {
        let mut remind = fresh(Utc::now() + Duration::hours(1)).unwrap();
        remind.mark_throttled().unwrap();
        assert_eq!(
            remind.mark_throttled(),
            Err(DomainError::AlreadyThrottled)
        );
        assert!(remind.is_throttled());
    }

    #[test]
    fn is_due_for_past_time() {
        // Reconstitute to sidestep the creation-time past check.
        let remind = Remind::reconstitute(
            RemindId::generate(),
            Utc::now() - Duration::hours(1),
            user_id(),
            devices(),
            task_id(),
            TaskType::Near,
            target_window_width(TaskType::Near),
            false,
            Utc::now() - Duration::hours(2),
            Utc::now() - Duration::hours(2),
        );
        assert!(remind.is_due());
    }

    #[test]
    fn reconstitute_preserves_throttled_state() {
        let now = Utc::now();
        let remind = Remind::reconstitute(
            RemindId::generate(),
            now + Duration::hours(1),
            user_id(),
            devices(),
            task_id(),
            TaskType::Short,
            target_window_width(TaskType::Short),
            true,
            now,
            now,
        );
        assert!(remind.is_throttled());
    }

    #[test]
    fn time_range_rejects_inverted_bounds() {
        let now = Utc::now();
        assert_eq!(
            TimeRange::new(now, now - Duration::minutes(1)),
            Err(DomainError::InvalidTimeRange)
        );
    }

    #[test]
    fn time_range_is_inclusive() {
        let start = Utc::now();
        let end = start + Duration::hours(1);
        let range = TimeRange::new(start, end).unwrap();
        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(end + Duration::seconds(1)));
    }

    #[test]
    fn point_range_is_valid() {
        let now = Utc::now();
        let range = TimeRange::new(now, now).unwrap();
        assert!(range.contains(now));
    }
}
