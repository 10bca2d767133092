//! # remind-service
//!
//! Use-case orchestration for the reminder lifecycle engine.
//!
//! [`RemindService`] exposes five operations over plain value inputs:
//! idempotent batch creation keyed on the task ID, time-range query,
//! one-way throttle transition, idempotent delete, and task-scoped
//! cancellation with best-effort event emission.
//!
//! Transport concerns (routing, status codes) and storage mechanics stay
//! outside; this crate owns validation, the idempotency gate, transaction
//! discipline, and the failure taxonomy.

#![deny(unsafe_code)]

pub mod errors;
pub mod publisher;
pub mod service;
pub mod types;

pub use errors::ServiceError;
pub use publisher::{CancellationPublisher, NullPublisher, PublishError, RemindCancelledEvent};
pub use service::RemindService;
pub use types::{
    CancelByTaskInput, CreateRemindsInput, DeleteRemindInput, DeviceInput, DeviceOutput,
    RemindOutput, RemindsOutput, TimeRangeInput, UpdateThrottledInput,
};
