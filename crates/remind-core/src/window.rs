//! Slide-window width value object and the per-batch width calculator.
//!
//! The slide window is the tolerance around a reminder's nominal time within
//! which a late or early delivery still counts as on-time. Widths are fixed
//! at entity creation and never recomputed.
//!
//! Batch sizing:
//!
//! 1. Sort the batch chronologically. The last time is the *target*
//!    reminder; everything before it is *intermediate*.
//! 2. The target gets a fixed width by classification — 2 minutes for
//!    short/scheduled, 5 minutes for near/relaxed.
//! 3. Each intermediate gets 30% of the interval to the next reminder,
//!    clamped to \[1 minute, ceiling\] where the ceiling is 5 minutes for
//!    short and 10 minutes otherwise. Tightly-spaced reminders get narrow
//!    windows, loosely-spaced ones wider windows.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::errors::DomainError;
use crate::task_type::TaskType;

/// Global width floor.
pub const MIN_WIDTH: Duration = Duration::from_secs(60);
/// Global width ceiling.
pub const MAX_WIDTH: Duration = Duration::from_secs(10 * 60);

/// Target width for short/scheduled classifications.
const TARGET_WIDTH_SHORT: Duration = Duration::from_secs(2 * 60);
/// Target width for near/relaxed classifications.
const TARGET_WIDTH_BASE: Duration = Duration::from_secs(5 * 60);

/// Intermediate ceiling for the short classification.
const INTERMEDIATE_MAX_SHORT: Duration = Duration::from_secs(5 * 60);

/// Share of the interval to the next reminder used for intermediate widths.
const INTERVAL_RATIO: f64 = 0.30;

/// Tolerance window around a reminder's nominal time.
///
/// Bounded to \[1 minute, 10 minutes\] inclusive; construction outside the
/// range fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlideWindowWidth(Duration);

impl SlideWindowWidth {
    /// Construct from a duration, enforcing the global bounds.
    pub fn new(d: Duration) -> Result<Self, DomainError> {
        if d < MIN_WIDTH {
            return Err(DomainError::WindowWidthTooSmall);
        }
        if d > MAX_WIDTH {
            return Err(DomainError::WindowWidthTooLarge);
        }
        Ok(Self(d))
    }

    /// Construct from whole seconds (the storage representation).
    pub fn from_secs(secs: i64) -> Result<Self, DomainError> {
        let secs = u64::try_from(secs).map_err(|_| DomainError::WindowWidthTooSmall)?;
        Self::new(Duration::from_secs(secs))
    }

    /// The underlying duration.
    pub fn duration(&self) -> Duration {
        self.0
    }

    /// Width in whole seconds.
    pub fn as_secs(&self) -> i64 {
        i64::try_from(self.0.as_secs()).unwrap_or(i64::MAX)
    }
}

/// Fixed target-reminder width for a classification.
///
/// Exhaustive by design: a new classification will not compile until it is
/// deliberately mapped here.
pub fn target_window_width(task_type: TaskType) -> SlideWindowWidth {
    match task_type {
        TaskType::Short | TaskType::Scheduled => SlideWindowWidth(TARGET_WIDTH_SHORT),
        TaskType::Near | TaskType::Relaxed => SlideWindowWidth(TARGET_WIDTH_BASE),
    }
}

/// Intermediate width: 30% of the interval to the next reminder, clamped.
fn intermediate_window_width(task_type: TaskType, interval_to_next: Duration) -> SlideWindowWidth {
    let ceiling = match task_type {
        TaskType::Short => INTERMEDIATE_MAX_SHORT,
        TaskType::Near | TaskType::Relaxed | TaskType::Scheduled => MAX_WIDTH,
    };

    let raw = interval_to_next.mul_f64(INTERVAL_RATIO);
    SlideWindowWidth(raw.clamp(MIN_WIDTH, ceiling))
}

/// Compute a slide-window width for every time in a batch.
///
/// The result is parallel to the *input* slice: `widths[i]` belongs to
/// `times[i]`. Keying by index means duplicate timestamps each keep their
/// own width instead of collapsing under a timestamp-keyed map. Empty input
/// yields empty output.
pub fn slide_window_widths(
    times: &[DateTime<Utc>],
    task_type: TaskType,
) -> Vec<SlideWindowWidth> {
    if times.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..times.len()).collect();
    order.sort_by_key(|&i| times[i]);

    let mut widths = vec![target_window_width(task_type); times.len()];
    for (pos, &idx) in order.iter().enumerate() {
        if pos == order.len() - 1 {
            // Target reminder: fixed width by classification.
            widths[idx] = target_window_width(task_type);
        } else {
            let next = times[order[pos + 1]];
            let interval = (next - times[idx]).to_std().unwrap_or(Duration::ZERO);
            widths[idx] = intermediate_window_width(task_type, interval);
        }
    }

    widths
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
