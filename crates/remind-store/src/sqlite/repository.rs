//! [`SqliteRemindRepository`] — the pooled `SQLite` implementation of
//! [`RemindRepository`].
//!
//! The SQL itself lives in stateless functions over `&Connection`, shared
//! between the pool-backed repository and the transaction-scoped view that
//! [`RemindRepository::with_tx`] hands to its closure.

use rusqlite::Connection;
use tracing::debug;

use remind_core::{Remind, RemindId, TaskId, TimeRange};

use crate::errors::{Result, StoreError};
use crate::repository::RemindRepository;
use crate::sqlite::connection::{ConnectionPool, PooledConnection};
use crate::sqlite::migrations::run_migrations;
use crate::sqlite::model::{fmt_time, RemindRow};

const COLUMNS: &str = "id, time, user_id, devices, task_id, task_type, \
                       slide_window_secs, throttled, created_at, updated_at";

/// Stateless SQL over `&Connection`.
mod sql {
    use super::{fmt_time, Connection, Remind, RemindId, RemindRow, Result, StoreError, TaskId, TimeRange, COLUMNS};
    use rusqlite::{params, OptionalExtension};

    pub fn insert(conn: &Connection, remind: &Remind) -> Result<()> {
        let row = RemindRow::from_entity(remind)?;
        let _ = conn
            .execute(
                &format!("INSERT INTO reminds ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
                params![
                    row.id,
                    row.time,
                    row.user_id,
                    row.devices,
                    row.task_id,
                    row.task_type,
                    row.slide_window_secs,
                    row.throttled,
                    row.created_at,
                    row.updated_at,
                ],
            )
            .map_err(StoreError::from_sqlite)?;
        Ok(())
    }

    pub fn find_by_id(conn: &Connection, id: RemindId) -> Result<Option<Remind>> {
        let row = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM reminds WHERE id = ?1"),
                params![id.to_string()],
                RemindRow::from_row,
            )
            .optional()?;
        row.map(|r| r.to_entity()).transpose()
    }

    pub fn find_by_task_id(conn: &Connection, task_id: TaskId) -> Result<Vec<Remind>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM reminds WHERE task_id = ?1 ORDER BY time ASC"
        ))?;
        let rows = stmt.query_map(params![task_id.to_string()], RemindRow::from_row)?;
        rows.map(|r| r?.to_entity()).collect()
    }

    pub fn find_by_time_range(conn: &Connection, range: TimeRange) -> Result<Vec<Remind>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM reminds WHERE time >= ?1 AND time <= ?2 ORDER BY time ASC"
        ))?;
        let rows = stmt.query_map(
            params![fmt_time(range.start()), fmt_time(range.end())],
            RemindRow::from_row,
        )?;
        rows.map(|r| r?.to_entity()).collect()
    }

    pub fn update(conn: &Connection, remind: &Remind) -> Result<()> {
        let row = RemindRow::from_entity(remind)?;
        let _ = conn.execute(
            "UPDATE reminds SET throttled = ?1, updated_at = ?2 WHERE id = ?3",
            params![row.throttled, row.updated_at, row.id],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, id: RemindId) -> Result<bool> {
        let changed = conn.execute(
            "DELETE FROM reminds WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_by_task_id(conn: &Connection, task_id: TaskId) -> Result<Vec<RemindId>> {
        let mut stmt =
            conn.prepare("DELETE FROM reminds WHERE task_id = ?1 RETURNING id")?;
        let ids = stmt.query_map(params![task_id.to_string()], |row| {
            row.get::<_, String>(0)
        })?;
        ids.map(|raw| {
            RemindId::parse(&raw?).map_err(|e| StoreError::Corrupt {
                message: format!("bad id in deleted row: {e}"),
            })
        })
        .collect()
    }
}

/// Pool-backed repository.
pub struct SqliteRemindRepository {
    pool: ConnectionPool,
}

impl SqliteRemindRepository {
    /// Wrap a connection pool, running any pending migrations first.
    pub fn new(pool: ConnectionPool) -> Result<Self> {
        let conn = pool.get()?;
        let _ = run_migrations(&conn)?;
        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }
}

impl RemindRepository for SqliteRemindRepository {
    fn save(&self, remind: &Remind) -> Result<()> {
        debug!(remind_id = %remind.id(), "saving remind");
        let conn = self.conn()?;
        sql::insert(&conn, remind)
    }

    fn find_by_id(&self, id: RemindId) -> Result<Option<Remind>> {
        let conn = self.conn()?;
        sql::find_by_id(&conn, id)
    }

    fn find_by_task_id(&self, task_id: TaskId) -> Result<Vec<Remind>> {
        let conn = self.conn()?;
        sql::find_by_task_id(&conn, task_id)
    }

    fn find_by_time_range(&self, range: TimeRange) -> Result<Vec<Remind>> {
        let conn = self.conn()?;
        sql::find_by_time_range(&conn, range)
    }

    fn update(&self, remind: &Remind) -> Result<()> {
        debug!(remind_id = %remind.id(), "updating remind");
        let conn = self.conn()?;
        sql::update(&conn, remind)
    }

    fn delete(&self, id: RemindId) -> Result<bool> {
        debug!(remind_id = %id, "deleting remind");
        let conn = self.conn()?;
        sql::delete(&conn, id)
    }

    fn delete_by_task_id(&self, task_id: TaskId) -> Result<Vec<RemindId>> {
        debug!(task_id = %task_id, "deleting reminds by task");
        let conn = self.conn()?;
        let tx = conn.unchecked_transaction()?;
        let ids = sql::delete_by_task_id(&tx, task_id)?;
        tx.commit()?;
        Ok(ids)
    }

    fn with_tx(
        &self,
        f: &mut dyn FnMut(&dyn RemindRepository) -> Result<()>,
    ) -> Result<()> {
        let conn = self.conn()?;
        let tx = conn.unchecked_transaction()?;
        {
            let scoped = TxRemindRepository { conn: &tx };
            // Dropping the uncommitted transaction on error rolls back —
            // partial writes are never visible.
            f(&scoped)?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// Transaction-scoped repository view. `rusqlite::Transaction` derefs to
/// `Connection`, so the same stateless SQL applies.
struct TxRemindRepository<'a> {
    conn: &'a Connection,
}

impl RemindRepository for TxRemindRepository<'_> {
    fn save(&self, remind: &Remind) -> Result<()> {
        sql::insert(self.conn, remind)
    }

    fn find_by_id(&self, id: RemindId) -> Result<Option<Remind>> {
        sql::find_by_id(self.conn, id)
    }

    fn find_by_task_id(&self, task_id: TaskId) -> Result<Vec<Remind>> {
        sql::find_by_task_id(self.conn, task_id)
    }

    fn find_by_time_range(&self, range: TimeRange) -> Result<Vec<Remind>> {
        sql::find_by_time_range(self.conn, range)
    }

    fn update(&self, remind: &Remind) -> Result<()> {
        sql::update(self.conn, remind)
    }

    fn delete(&self, id: RemindId) -> Result<bool> {
        sql::delete(self.conn, id)
    }

    fn delete_by_task_id(&self, task_id: TaskId) -> Result<Vec<RemindId>> {
        sql::delete_by_task_id(self.conn, task_id)
    }

    fn with_tx(
        &self,
        f: &mut dyn FnMut(&dyn RemindRepository) -> Result<()>,
    ) -> Result<()> {
        // Already inside a transaction; nesting joins it.
        f(self)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
