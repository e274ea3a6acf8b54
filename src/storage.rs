//! Local persistence for the work log snapshot.
//!
//! The store persists one JSON blob under a fixed key through a small
//! key-value port. Two media implement it:
//!
//! ```text
//! <data-dir>/
//!   work-log-storage.json          # JsonFileStore: one file per key
//!   work-log-storage-backup.json   # last snapshot that failed to load
//!   worklog.sqlite                 # SqliteStore: kv(key, value) table
//! ```
//!
//! The on-disk copy is derived; in-memory state is authoritative while
//! the process runs.

mod json_file;
#[cfg(test)]
mod memory;
mod snapshot;
mod sqlite;

use std::io;

pub use json_file::JsonFileStore;
#[cfg(test)]
pub use memory::MemoryStore;
pub use snapshot::{
    BACKUP_KEY, SNAPSHOT_KEY, Snapshot, back_up_snapshot, load_snapshot, save_snapshot,
};
pub use sqlite::SqliteStore;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// A blob store addressed by string keys.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Idempotent: removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;
}
