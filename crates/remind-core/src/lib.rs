//! # remind-core
//!
//! Domain model for the reminder lifecycle engine.
//!
//! - **Identifiers**: [`RemindId`], [`UserId`], [`TaskId`] — the latter two
//!   must be time-ordered UUIDv7 values; `TaskId` doubles as the idempotency
//!   key for a creation batch
//! - **Value objects**: [`Device`]/[`Devices`], [`TaskType`],
//!   [`SlideWindowWidth`], [`TimeRange`]
//! - **Window calculator**: pure per-batch notification-tolerance sizing
//! - **Aggregate**: [`Remind`] with the one-way throttle latch
//!
//! Everything here is persistence-free and side-effect-free.

#![deny(unsafe_code)]

pub mod device;
pub mod errors;
pub mod ids;
pub mod remind;
pub mod task_type;
pub mod window;

pub use device::{Device, Devices};
pub use errors::DomainError;
pub use ids::{RemindId, TaskId, UserId};
pub use remind::{Remind, TimeRange};
pub use task_type::TaskType;
pub use window::{slide_window_widths, target_window_width, SlideWindowWidth};
