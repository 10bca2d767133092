//! The repository contract consumed by the use-case layer.

use remind_core::{Remind, RemindId, TaskId, TimeRange};

use crate::errors::StoreError;

/// Storage operations over reminders.
///
/// Backends must enforce uniqueness of `(task_id, time)` — it is the final
/// arbiter when two creation batches race on a never-before-seen task ID —
/// and surface violations as [`StoreError::Conflict`].
///
/// No `Send + Sync` supertrait: the transaction-scoped view handed to
/// [`RemindRepository::with_tx`] borrows a live transaction and never leaves
/// the calling thread. Long-lived handles add the bounds at the `Arc` level.
pub trait RemindRepository {
    /// Persist a new reminder.
    fn save(&self, remind: &Remind) -> Result<(), StoreError>;

    /// Look up a reminder by ID.
    fn find_by_id(&self, id: RemindId) -> Result<Option<Remind>, StoreError>;

    /// All reminders for a task, ordered by time ascending.
    fn find_by_task_id(&self, task_id: TaskId) -> Result<Vec<Remind>, StoreError>;

    /// All reminders whose time falls within the range (bounds inclusive),
    /// ordered by time ascending.
    fn find_by_time_range(&self, range: TimeRange) -> Result<Vec<Remind>, StoreError>;

    /// Persist the current state of an existing reminder.
    fn update(&self, remind: &Remind) -> Result<(), StoreError>;

    /// Delete by ID. Returns `false` if no row existed — "already gone"
    /// is not an error.
    fn delete(&self, id: RemindId) -> Result<bool, StoreError>;

    /// Delete every reminder for a task, returning the deleted IDs.
    fn delete_by_task_id(&self, task_id: TaskId) -> Result<Vec<RemindId>, StoreError>;

    /// Run `f` against a transaction-scoped view of this repository.
    /// Commits when `f` returns `Ok`, rolls back on `Err` — partial writes
    /// are never observable.
    fn with_tx(
        &self,
        f: &mut dyn FnMut(&dyn RemindRepository) -> Result<(), StoreError>,
    ) -> Result<(), StoreError>;
}
