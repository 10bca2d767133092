//! Row ↔ entity mapping for the `reminds` table.
//!
//! Devices persist as a JSON array column, the slide-window width as whole
//! seconds, and timestamps as fixed-precision RFC 3339 text so that string
//! comparison in SQL matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use remind_core::{Device, Devices, Remind, RemindId, SlideWindowWidth, TaskId, TaskType, UserId};
use rusqlite::Row;

use crate::errors::{Result, StoreError};

/// Format a timestamp for storage. Microsecond precision with a `Z`
/// suffix keeps lexicographic order equal to chronological order.
pub fn fmt_time(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_time(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt {
            message: format!("bad timestamp {s:?}: {e}"),
        })
}

/// Raw row as stored in `reminds`.
#[derive(Debug)]
pub struct RemindRow {
    pub id: String,
    pub time: String,
    pub user_id: String,
    pub devices: String,
    pub task_id: String,
    pub task_type: String,
    pub slide_window_secs: i64,
    pub throttled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl RemindRow {
    /// Build a row from a positional `SELECT *` result.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            time: row.get(1)?,
            user_id: row.get(2)?,
            devices: row.get(3)?,
            task_id: row.get(4)?,
            task_type: row.get(5)?,
            slide_window_secs: row.get(6)?,
            throttled: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    /// Serialize an entity for insertion.
    pub fn from_entity(remind: &Remind) -> Result<Self> {
        Ok(Self {
            id: remind.id().to_string(),
            time: fmt_time(remind.time()),
            user_id: remind.user_id().to_string(),
            devices: serde_json::to_string(remind.devices().as_slice())?,
            task_id: remind.task_id().to_string(),
            task_type: remind.task_type().as_str().to_string(),
            slide_window_secs: remind.slide_window_width().as_secs(),
            throttled: remind.is_throttled(),
            created_at: fmt_time(remind.created_at()),
            updated_at: fmt_time(remind.updated_at()),
        })
    }

    /// Reconstruct the domain entity. Any field failing its domain
    /// invariant means the row is corrupt, not that the caller erred.
    pub fn to_entity(&self) -> Result<Remind> {
        let corrupt = |what: &str, err: &dyn std::fmt::Display| StoreError::Corrupt {
            message: format!("{what} in row {}: {err}", self.id),
        };

        let id = RemindId::parse(&self.id).map_err(|e| corrupt("bad id", &e))?;
        let user_id = UserId::parse(&self.user_id).map_err(|e| corrupt("bad user_id", &e))?;
        let task_id = TaskId::parse(&self.task_id).map_err(|e| corrupt("bad task_id", &e))?;
        let task_type: TaskType = self
            .task_type
            .parse()
            .map_err(|e| corrupt("bad task_type", &e))?;

        let device_list: Vec<Device> = serde_json::from_str(&self.devices)?;
        let devices = Devices::new(device_list).map_err(|e| corrupt("bad devices", &e))?;

        let width = SlideWindowWidth::from_secs(self.slide_window_secs)
            .map_err(|e| corrupt("bad slide_window_secs", &e))?;

        Ok(Remind::reconstitute(
            id,
            parse_time(&self.time)?,
            user_id,
            devices,
            task_id,
            task_type,
            width,
            self.throttled,
            parse_time(&self.created_at)?,
            parse_time(&self.updated_at)?,
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
