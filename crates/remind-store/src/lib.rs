//! # remind-store
//!
//! Persistence layer for the reminder lifecycle engine.
//!
//! - [`RemindRepository`]: the contract the use-case layer consumes
//! - `sqlite`: pooled `rusqlite` backend with embedded migrations and a
//!   UNIQUE (task_id, time) index as the final arbiter of creation races
//! - `memory`: mutex-guarded backend with snapshot-rollback transactions,
//!   used by service-level tests
//!
//! Both backends enforce the same uniqueness rule, so transaction and
//! conflict behavior is observable without a real database.

#![deny(unsafe_code)]

pub mod errors;
pub mod memory;
pub mod repository;
pub mod sqlite;

pub use errors::StoreError;
pub use memory::MemoryRemindRepository;
pub use repository::RemindRepository;
pub use sqlite::connection::{new_file, new_in_memory, ConnectionConfig, ConnectionPool};
pub use sqlite::repository::SqliteRemindRepository;
