//! The reminder use-case orchestrator.
//!
//! Business rules enforced here, on top of the domain invariants:
//!
//! - **Idempotent creation**: the first successful batch for a task ID is
//!   authoritative; later requests get the stored batch back unchanged.
//! - **All-or-nothing batches**: the N inserts run in one repository
//!   transaction. A mid-batch failure leaves zero rows.
//! - **One-way throttle latch**: re-latching is logged and succeeds.
//! - **Best-effort cancellation events**: deletion decides the outcome;
//!   a publish failure is logged and swallowed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use remind_core::{
    slide_window_widths, Device, Devices, DomainError, Remind, RemindId, TaskId, TaskType,
    TimeRange, UserId,
};
use remind_store::RemindRepository;

use crate::errors::ServiceError;
use crate::publisher::{CancellationPublisher, RemindCancelledEvent};
use crate::types::{
    CancelByTaskInput, CreateRemindsInput, DeleteRemindInput, RemindOutput, RemindsOutput,
    TimeRangeInput, UpdateThrottledInput,
};

/// Orchestrates reminder lifecycle operations over a repository and an
/// event channel. Stateless per call; safe to share across requests.
pub struct RemindService {
    repo: Arc<dyn RemindRepository + Send + Sync>,
    publisher: Arc<dyn CancellationPublisher>,
}

impl RemindService {
    /// Wire the service to its collaborators.
    pub fn new(
        repo: Arc<dyn RemindRepository + Send + Sync>,
        publisher: Arc<dyn CancellationPublisher>,
    ) -> Self {
        Self { repo, publisher }
    }

    /// Create a reminder batch for one task.
    ///
    /// Idempotent on the task ID: if any reminders already exist for it,
    /// the stored batch is returned unchanged and nothing is created.
    pub async fn create_reminds(
        &self,
        input: CreateRemindsInput,
    ) -> Result<RemindsOutput, ServiceError> {
        debug!(
            task_id = %input.task_id,
            user_id = %input.user_id,
            times_count = input.times.len(),
            "creating reminds"
        );

        if input.times.is_empty() {
            return Err(ServiceError::validation(
                "times",
                "at least one time is required",
            ));
        }

        let user_id = UserId::parse(&input.user_id)
            .map_err(|e| ServiceError::validation("user_id", e))?;
        let task_id = TaskId::parse(&input.task_id)
            .map_err(|e| ServiceError::validation("task_id", e))?;

        // Idempotency gate: the first batch for a task ID wins for the
        // lifetime of the task.
        let existing = self.repo.find_by_task_id(task_id).map_err(|e| {
            error!(error = %e, task_id = %input.task_id, "failed to check existing reminds");
            ServiceError::internal(e)
        })?;
        if !existing.is_empty() {
            info!(
                task_id = %input.task_id,
                count = existing.len(),
                "returning existing reminds (idempotency)"
            );
            return Ok(RemindsOutput::from(existing.as_slice()));
        }

        let mut devices = Vec::with_capacity(input.devices.len());
        for (i, d) in input.devices.iter().enumerate() {
            let device = Device::new(d.device_id.clone(), d.delivery_token.clone())
                .map_err(|e| ServiceError::validation(format!("devices[{i}]"), e))?;
            devices.push(device);
        }
        let devices =
            Devices::new(devices).map_err(|e| ServiceError::validation("devices", e))?;

        let task_type: TaskType = input
            .task_type
            .parse()
            .map_err(|e: DomainError| ServiceError::validation("task_type", e))?;

        let widths = slide_window_widths(&input.times, task_type);

        let mut reminds = Vec::with_capacity(input.times.len());
        for (i, (&time, &width)) in input.times.iter().zip(widths.iter()).enumerate() {
            let remind = Remind::new(time, user_id, devices.clone(), task_id, task_type, width)
                .map_err(|e| ServiceError::validation(format!("times[{i}]"), e))?;
            reminds.push(remind);
        }

        self.repo
            .with_tx(&mut |tx| {
                for remind in &reminds {
                    tx.save(remind)?;
                }
                Ok(())
            })
            .map_err(|e| {
                error!(error = %e, task_id = %input.task_id, "failed to save remind batch");
                ServiceError::from(e)
            })?;

        debug!(task_id = %input.task_id, count = reminds.len(), "reminds created");
        Ok(RemindsOutput::from(reminds.as_slice()))
    }

    /// All reminders whose time falls within `[start, end]`, ascending.
    pub async fn get_reminds_by_time_range(
        &self,
        input: TimeRangeInput,
    ) -> Result<RemindsOutput, ServiceError> {
        debug!(start = %input.start, end = %input.end, "getting reminds by time range");

        let range = TimeRange::new(input.start, input.end)
            .map_err(|e| ServiceError::validation("time_range", e))?;

        let reminds = self.repo.find_by_time_range(range).map_err(|e| {
            error!(error = %e, start = %input.start, end = %input.end, "time range query failed");
            ServiceError::internal(e)
        })?;

        debug!(count = reminds.len(), "reminds retrieved");
        Ok(RemindsOutput::from(reminds.as_slice()))
    }

    /// Set the throttle latch on one reminder.
    ///
    /// Latching an already-throttled reminder is an idempotent success.
    /// Requesting `false` performs no transition; the current state is
    /// written through and returned.
    pub async fn update_throttled(
        &self,
        input: UpdateThrottledInput,
    ) -> Result<RemindOutput, ServiceError> {
        debug!(remind_id = %input.id, throttled = input.throttled, "updating throttled status");

        let id =
            RemindId::parse(&input.id).map_err(|e| ServiceError::validation("id", e))?;

        let mut remind = self
            .repo
            .find_by_id(id)
            .map_err(|e| {
                error!(error = %e, remind_id = %input.id, "failed to load remind");
                ServiceError::internal(e)
            })?
            .ok_or_else(|| {
                warn!(remind_id = %input.id, "remind not found for throttled update");
                ServiceError::not_found(format!("remind {id}"))
            })?;

        if input.throttled {
            if let Err(err) = remind.mark_throttled() {
                match err {
                    DomainError::AlreadyThrottled => {
                        info!(remind_id = %input.id, "remind already throttled (idempotency)");
                    }
                    other => return Err(ServiceError::validation("throttled", other)),
                }
            }
        }

        self.repo.update(&remind).map_err(|e| {
            error!(error = %e, remind_id = %input.id, "failed to update throttled status");
            ServiceError::internal(e)
        })?;

        debug!(
            remind_id = %input.id,
            throttled = remind.is_throttled(),
            "throttled status updated"
        );
        Ok(RemindOutput::from(&remind))
    }

    /// Delete one reminder. Deleting a missing reminder is a success.
    pub async fn delete_remind(&self, input: DeleteRemindInput) -> Result<(), ServiceError> {
        debug!(remind_id = %input.id, "deleting remind");

        let id =
            RemindId::parse(&input.id).map_err(|e| ServiceError::validation("id", e))?;

        let deleted = self.repo.delete(id).map_err(|e| {
            error!(error = %e, remind_id = %input.id, "failed to delete remind");
            ServiceError::internal(e)
        })?;

        if !deleted {
            info!(remind_id = %input.id, "remind not found for deletion (idempotency)");
        }

        debug!(remind_id = %input.id, "remind deleted");
        Ok(())
    }

    /// Delete every reminder for a task and emit one cancellation event if
    /// anything was deleted. Publish failure never fails the cancellation.
    pub async fn cancel_by_task_id(
        &self,
        input: CancelByTaskInput,
    ) -> Result<(), ServiceError> {
        debug!(task_id = %input.task_id, user_id = %input.user_id, "canceling reminds by task");

        let task_id = TaskId::parse(&input.task_id)
            .map_err(|e| ServiceError::validation("task_id", e))?;
        // Well-formedness only; not cross-checked against stored reminders.
        let _ = UserId::parse(&input.user_id)
            .map_err(|e| ServiceError::validation("user_id", e))?;

        let deleted = self.repo.delete_by_task_id(task_id).map_err(|e| {
            error!(error = %e, task_id = %input.task_id, "failed to cancel reminds");
            ServiceError::internal(e)
        })?;

        if !deleted.is_empty() {
            let event = RemindCancelledEvent {
                task_id: input.task_id.clone(),
                user_id: input.user_id.clone(),
                deleted_count: deleted.len() as u64,
                remind_ids: deleted.iter().map(RemindId::to_string).collect(),
                cancelled_at: Utc::now(),
            };
            if let Err(err) = self.publisher.publish_remind_cancelled(&event).await {
                error!(
                    error = %err,
                    task_id = %input.task_id,
                    "failed to publish remind cancelled event"
                );
            }
        }

        info!(
            task_id = %input.task_id,
            user_id = %input.user_id,
            deleted_count = deleted.len(),
            "reminds canceled by task"
        );
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publisher::PublishError;
    use crate::types::DeviceInput;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration};
    use remind_store::MemoryRemindRepository;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Publisher that records every event it sees.
    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<RemindCancelledEvent>>,
        fail: bool,
    }

    impl RecordingPublisher {
        fn failing() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn events(&self) -> Vec<RemindCancelledEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CancellationPublisher for RecordingPublisher {
        async fn publish_remind_cancelled(
            &self,
            event: &RemindCancelledEvent,
        ) -> Result<(), PublishError> {
            self.events.lock().unwrap().push(event.clone());
            if self.fail {
                return Err(PublishError::new("channel unavailable"));
            }
            Ok(())
        }
    }

    struct Harness {
        service: RemindService,
        repo: Arc<MemoryRemindRepository>,
        publisher: Arc<RecordingPublisher>,
    }

    fn harness() -> Harness {
        harness_with_publisher(RecordingPublisher::default())
    }

    fn harness_with_publisher(publisher: RecordingPublisher) -> Harness {
        let repo = Arc::new(MemoryRemindRepository::new());
        let publisher = Arc::new(publisher);
        let service = RemindService::new(repo.clone(), publisher.clone());
        Harness {
            service,
            repo,
            publisher,
        }
    }

    fn v7() -> String {
        Uuid::now_v7().to_string()
    }

    fn future(minutes: i64) -> DateTime<Utc> {
        Utc::now() + Duration::minutes(minutes)
    }

    fn create_input(task_id: &str) -> CreateRemindsInput {
        CreateRemindsInput {
            times: vec![future(30), future(60), future(120)],
            user_id: v7(),
            devices: vec![DeviceInput {
                device_id: "device-1".into(),
                delivery_token: "token-1".into(),
            }],
            task_id: task_id.into(),
            task_type: "near".into(),
        }
    }

    #[tokio::test]
    async fn create_persists_full_batch() {
        let h = harness();
        let out = h.service.create_reminds(create_input(&v7())).await.unwrap();
        assert_eq!(out.count, 3);
        assert_eq!(h.repo.len(), 3);
    }

    #[tokio::test]
    async fn create_rejects_empty_times() {
        let h = harness();
        let mut input = create_input(&v7());
        input.times.clear();
        let err = h.service.create_reminds(input).await.unwrap_err();
        assert_matches!(err, ServiceError::Validation { field, .. } if field == "times");
    }

    #[tokio::test]
    async fn create_rejects_bad_user_id() {
        let h = harness();
        let mut input = create_input(&v7());
        input.user_id = "not-a-uuid".into();
        let err = h.service.create_reminds(input).await.unwrap_err();
        assert_matches!(err, ServiceError::Validation { field, .. } if field == "user_id");
    }

    #[tokio::test]
    async fn create_rejects_v4_task_id() {
        let h = harness();
        let mut input = create_input(&v7());
        input.task_id = "550e8400-e29b-41d4-a716-446655440000".into();
        let err = h.service.create_reminds(input).await.unwrap_err();
        assert_matches!(err, ServiceError::Validation { field, .. } if field == "task_id");
    }

    #[tokio::test]
    async fn create_indexes_bad_device() {
        let h = harness();
        let mut input = create_input(&v7());
        input.devices.push(DeviceInput {
            device_id: String::new(),
            delivery_token: "t".into(),
        });
        let err = h.service.create_reminds(input).await.unwrap_err();
        assert_matches!(err, ServiceError::Validation { field, .. } if field == "devices[1]");
    }

    #[tokio::test]
    async fn create_rejects_empty_devices() {
        let h = harness();
        let mut input = create_input(&v7());
        input.devices.clear();
        let err = h.service.create_reminds(input).await.unwrap_err();
        assert_matches!(err, ServiceError::Validation { field, .. } if field == "devices");
    }

    #[tokio::test]
    async fn create_rejects_unknown_task_type() {
        let h = harness();
        let mut input = create_input(&v7());
        input.task_type = "urgent".into();
        let err = h.service.create_reminds(input).await.unwrap_err();
        assert_matches!(err, ServiceError::Validation { field, .. } if field == "task_type");
    }

    #[tokio::test]
    async fn create_indexes_past_time() {
        let h = harness();
        let mut input = create_input(&v7());
        input.times[1] = Utc::now() - Duration::minutes(5);
        let err = h.service.create_reminds(input).await.unwrap_err();
        assert_matches!(err, ServiceError::Validation { field, .. } if field == "times[1]");
        // Validation happens before any persistence.
        assert!(h.repo.is_empty());
    }

    #[tokio::test]
    async fn create_is_idempotent_on_task_id() {
        let h = harness();
        let task_id = v7();
        let first = h
            .service
            .create_reminds(create_input(&task_id))
            .await
            .unwrap();

        // Different times and devices, same task ID.
        let mut second_input = create_input(&task_id);
        second_input.times = vec![future(300)];
        second_input.devices = vec![DeviceInput {
            device_id: "other".into(),
            delivery_token: "other-token".into(),
        }];
        let second = h.service.create_reminds(second_input).await.unwrap();

        assert_eq!(second.count, first.count);
        let mut first_ids: Vec<_> = first.reminds.iter().map(|r| r.id.clone()).collect();
        let mut second_ids: Vec<_> = second.reminds.iter().map(|r| r.id.clone()).collect();
        first_ids.sort();
        second_ids.sort();
        assert_eq!(first_ids, second_ids);
        assert_eq!(h.repo.len(), 3);
    }

    #[tokio::test]
    async fn create_assigns_target_and_intermediate_widths() {
        let h = harness();
        // near: 30-minute gaps → intermediate 9 minutes, target 5 minutes.
        let mut input = create_input(&v7());
        let base = future(30);
        input.times = vec![base, base + Duration::minutes(30), base + Duration::minutes(60)];
        let out = h.service.create_reminds(input).await.unwrap();

        let mut by_time = out.reminds.clone();
        by_time.sort_by_key(|r| r.time);
        assert_eq!(by_time[0].slide_window_seconds, 9 * 60);
        assert_eq!(by_time[1].slide_window_seconds, 9 * 60);
        assert_eq!(by_time[2].slide_window_seconds, 5 * 60);
    }

    #[tokio::test]
    async fn create_duplicate_times_roll_back_whole_batch() {
        let h = harness();
        let mut input = create_input(&v7());
        let t = future(45);
        input.times = vec![t, t];
        let err = h.service.create_reminds(input).await.unwrap_err();
        assert_matches!(err, ServiceError::AlreadyExists { .. });
        // All-or-nothing: nothing from the batch may remain.
        assert!(h.repo.is_empty());
    }

    #[tokio::test]
    async fn time_range_query_rejects_inverted_range() {
        let h = harness();
        let err = h
            .service
            .get_reminds_by_time_range(TimeRangeInput {
                start: future(60),
                end: future(30),
            })
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::Validation { field, .. } if field == "time_range");
    }

    #[tokio::test]
    async fn time_range_query_returns_sorted_window() {
        let h = harness();
        let _ = h.service.create_reminds(create_input(&v7())).await.unwrap();

        let out = h
            .service
            .get_reminds_by_time_range(TimeRangeInput {
                start: Utc::now(),
                end: future(90),
            })
            .await
            .unwrap();
        // Batch times are +30, +60, +120 — only the first two fall inside.
        assert_eq!(out.count, 2);
        assert!(out.reminds[0].time <= out.reminds[1].time);
    }

    #[tokio::test]
    async fn empty_time_range_result_is_success() {
        let h = harness();
        let out = h
            .service
            .get_reminds_by_time_range(TimeRangeInput {
                start: future(30),
                end: future(60),
            })
            .await
            .unwrap();
        assert_eq!(out.count, 0);
    }

    #[tokio::test]
    async fn throttle_latches_and_persists() {
        let h = harness();
        let created = h.service.create_reminds(create_input(&v7())).await.unwrap();
        let id = created.reminds[0].id.clone();

        let out = h
            .service
            .update_throttled(UpdateThrottledInput {
                id: id.clone(),
                throttled: true,
            })
            .await
            .unwrap();
        assert!(out.throttled);

        let stored = h
            .repo
            .find_by_id(RemindId::parse(&id).unwrap())
            .unwrap()
            .unwrap();
        assert!(stored.is_throttled());
    }

    #[tokio::test]
    async fn throttle_twice_is_idempotent() {
        let h = harness();
        let created = h.service.create_reminds(create_input(&v7())).await.unwrap();
        let id = created.reminds[0].id.clone();

        for _ in 0..2 {
            let out = h
                .service
                .update_throttled(UpdateThrottledInput {
                    id: id.clone(),
                    throttled: true,
                })
                .await
                .unwrap();
            assert!(out.throttled);
        }
    }

    #[tokio::test]
    async fn throttle_false_is_noop_write_through() {
        let h = harness();
        let created = h.service.create_reminds(create_input(&v7())).await.unwrap();
        let id = created.reminds[0].id.clone();

        let out = h
            .service
            .update_throttled(UpdateThrottledInput {
                id,
                throttled: false,
            })
            .await
            .unwrap();
        assert!(!out.throttled);
    }

    #[tokio::test]
    async fn throttle_missing_remind_is_not_found() {
        let h = harness();
        let err = h
            .service
            .update_throttled(UpdateThrottledInput {
                id: RemindId::generate().to_string(),
                throttled: true,
            })
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::NotFound { .. });
    }

    #[tokio::test]
    async fn throttle_bad_id_is_validation() {
        let h = harness();
        let err = h
            .service
            .update_throttled(UpdateThrottledInput {
                id: "garbage".into(),
                throttled: true,
            })
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::Validation { field, .. } if field == "id");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let h = harness();
        let created = h.service.create_reminds(create_input(&v7())).await.unwrap();
        let id = created.reminds[0].id.clone();

        h.service
            .delete_remind(DeleteRemindInput { id: id.clone() })
            .await
            .unwrap();
        // Second delete of the same ID still succeeds.
        h.service
            .delete_remind(DeleteRemindInput { id })
            .await
            .unwrap();
        assert_eq!(h.repo.len(), 2);
    }

    #[tokio::test]
    async fn cancel_deletes_and_publishes_once() {
        let h = harness();
        let task_id = v7();
        let user_id = v7();
        let mut input = create_input(&task_id);
        input.user_id = user_id.clone();
        let created = h.service.create_reminds(input).await.unwrap();

        h.service
            .cancel_by_task_id(CancelByTaskInput {
                task_id: task_id.clone(),
                user_id: user_id.clone(),
            })
            .await
            .unwrap();

        assert!(h.repo.is_empty());
        let events = h.publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].task_id, task_id);
        assert_eq!(events[0].user_id, user_id);
        assert_eq!(events[0].deleted_count, 3);

        let mut expected_ids: Vec<String> =
            created.reminds.iter().map(|r| r.id.clone()).collect();
        let mut event_ids = events[0].remind_ids.clone();
        expected_ids.sort();
        event_ids.sort();
        assert_eq!(event_ids, expected_ids);
    }

    #[tokio::test]
    async fn cancel_with_no_matches_publishes_nothing() {
        let h = harness();
        h.service
            .cancel_by_task_id(CancelByTaskInput {
                task_id: v7(),
                user_id: v7(),
            })
            .await
            .unwrap();
        assert!(h.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn cancel_twice_publishes_once() {
        let h = harness();
        let task_id = v7();
        let _ = h.service.create_reminds(create_input(&task_id)).await.unwrap();

        for _ in 0..2 {
            h.service
                .cancel_by_task_id(CancelByTaskInput {
                    task_id: task_id.clone(),
                    user_id: v7(),
                })
                .await
                .unwrap();
        }
        assert_eq!(h.publisher.events().len(), 1);
    }

    #[tokio::test]
    async fn cancel_survives_publish_failure() {
        let h = harness_with_publisher(RecordingPublisher::failing());
        let task_id = v7();
        let _ = h.service.create_reminds(create_input(&task_id)).await.unwrap();

        // Deletion is the contract; the failed publish is logged only.
        h.service
            .cancel_by_task_id(CancelByTaskInput {
                task_id,
                user_id: v7(),
            })
            .await
            .unwrap();
        assert!(h.repo.is_empty());
    }

    #[tokio::test]
    async fn cancel_validates_both_ids_independently() {
        let h = harness();
        let err = h
            .service
            .cancel_by_task_id(CancelByTaskInput {
                task_id: "bad".into(),
                user_id: v7(),
            })
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::Validation { field, .. } if field == "task_id");

        let err = h
            .service
            .cancel_by_task_id(CancelByTaskInput {
                task_id: v7(),
                user_id: "bad".into(),
            })
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::Validation { field, .. } if field == "user_id");
    }
}
