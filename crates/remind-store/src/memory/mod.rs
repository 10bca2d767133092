//! In-memory repository backend.
//!
//! Mirrors the `SQLite` backend's observable behavior — (task_id, time)
//! uniqueness, inclusive range queries, ascending order — so service-level
//! tests can exercise transaction rollback and conflict handling without a
//! database file. `with_tx` snapshots the state and restores it when the
//! closure fails.

use std::sync::{Mutex, PoisonError};

use remind_core::{Remind, RemindId, TaskId, TimeRange};

use crate::errors::{Result, StoreError};
use crate::repository::RemindRepository;

/// Mutex-guarded in-memory store.
#[derive(Default)]
pub struct MemoryRemindRepository {
    rows: Mutex<Vec<Remind>>,
}

impl MemoryRemindRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reminders (test convenience).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Remind>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RemindRepository for MemoryRemindRepository {
    fn save(&self, remind: &Remind) -> Result<()> {
        let mut rows = self.lock();
        if rows
            .iter()
            .any(|r| r.task_id() == remind.task_id() && r.time() == remind.time())
        {
            return Err(StoreError::Conflict {
                message: format!(
                    "duplicate (task_id, time): ({}, {})",
                    remind.task_id(),
                    remind.time()
                ),
            });
        }
        rows.push(remind.clone());
        Ok(())
    }

    fn find_by_id(&self, id: RemindId) -> Result<Option<Remind>> {
        Ok(self.lock().iter().find(|r| r.id() == id).cloned())
    }

    fn find_by_task_id(&self, task_id: TaskId) -> Result<Vec<Remind>> {
        let mut found: Vec<Remind> = self
            .lock()
            .iter()
            .filter(|r| r.task_id() == task_id)
            .cloned()
            .collect();
        found.sort_by_key(Remind::time);
        Ok(found)
    }

    fn find_by_time_range(&self, range: TimeRange) -> Result<Vec<Remind>> {
        let mut found: Vec<Remind> = self
            .lock()
            .iter()
            .filter(|r| range.contains(r.time()))
            .cloned()
            .collect();
        found.sort_by_key(Remind::time);
        Ok(found)
    }

    fn update(&self, remind: &Remind) -> Result<()> {
        let mut rows = self.lock();
        if let Some(slot) = rows.iter_mut().find(|r| r.id() == remind.id()) {
            *slot = remind.clone();
        }
        Ok(())
    }

    fn delete(&self, id: RemindId) -> Result<bool> {
        let mut rows = self.lock();
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        Ok(rows.len() < before)
    }

    fn delete_by_task_id(&self, task_id: TaskId) -> Result<Vec<RemindId>> {
        let mut rows = self.lock();
        let deleted: Vec<RemindId> = rows
            .iter()
            .filter(|r| r.task_id() == task_id)
            .map(Remind::id)
            .collect();
        rows.retain(|r| r.task_id() != task_id);
        Ok(deleted)
    }

    fn with_tx(
        &self,
        f: &mut dyn FnMut(&dyn RemindRepository) -> Result<()>,
    ) -> Result<()> {
        let snapshot = self.lock().clone();
        match f(self) {
            Ok(()) => Ok(()),
            Err(err) => {
                // Roll back to the pre-transaction state.
                *self.lock() = snapshot;
                Err(err)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
