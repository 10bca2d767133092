//! `SQLite` backend.
//!
//! - `connection`: r2d2 pool with WAL/foreign-key pragmas
//! - `migrations`: versioned schema embedded at compile time
//! - `model`: row ↔ entity mapping (devices as a JSON column)
//! - `repository`: [`SqliteRemindRepository`] and its transaction-scoped view
//!
//! [`SqliteRemindRepository`]: repository::SqliteRemindRepository

pub mod connection;
pub mod migrations;
pub mod model;
pub mod repository;
