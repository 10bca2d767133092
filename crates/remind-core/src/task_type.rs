//! Task classification.
//!
//! Closed set of urgency/flexibility categories. Window-width lookups match
//! on this enum exhaustively — adding a variant forces every lookup to be
//! deliberately extended, so no classification can silently fall through to
//! a default width.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Urgency/flexibility classification of the originating task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Tight deadline, strict delivery tolerance.
    Short,
    /// Due soon, moderately flexible.
    Near,
    /// Loose deadline, wide tolerance.
    Relaxed,
    /// Fixed-schedule task, strict tolerance.
    Scheduled,
}

impl TaskType {
    /// Canonical lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Near => "near",
            Self::Relaxed => "relaxed",
            Self::Scheduled => "scheduled",
        }
    }
}

impl FromStr for TaskType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Self::Short),
            "near" => Ok(Self::Near),
            "relaxed" => Ok(Self::Relaxed),
            "scheduled" => Ok(Self::Scheduled),
            other => Err(DomainError::InvalidTaskType(other.to_string())),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
