//! Storage layer for doing.
//!
//! Persisted state is a flat key-value namespace:
//! - `pomodoroSettings` - JSON-encoded timer settings
//! - `currentTask` - the task label as UTF-8
//!
//! Writes are last-write-wins with no transactions spanning keys.

mod database;
mod memory;
mod migrations;

pub use database::Database;
pub use memory::MemoryStore;

use std::rc::Rc;

use crate::config::Paths;
use crate::error::DoingError;

/// Open the backend for this run: the on-disk database, or an empty
/// in-memory store when `ephemeral` is set.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated.
pub fn open_backend(paths: &Paths, ephemeral: bool) -> Result<Rc<dyn KeyValueStore>, DoingError> {
    if ephemeral {
        tracing::debug!("Using in-memory preferences");
        return Ok(Rc::new(MemoryStore::new()));
    }
    Ok(Rc::new(Database::open(paths)?))
}

/// A byte-oriented key-value backend.
///
/// Implementations take `&self` for writes; they are only ever used from
/// one thread, so interior mutability (or the connection's own) suffices.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DoingError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), DoingError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), DoingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_backend_ephemeral_skips_disk() {
        let temp = tempfile::tempdir().unwrap();
        let paths = Paths::with_root(temp.path().join("data"));

        let backend = open_backend(&paths, true).unwrap();
        backend.set("k", b"v").unwrap();

        assert_eq!(backend.get("k").unwrap(), Some(b"v".to_vec()));
        assert!(!paths.root.exists());
    }

    #[test]
    fn test_open_backend_creates_database() {
        let temp = tempfile::tempdir().unwrap();
        let paths = Paths::with_root(temp.path().join("data"));

        let backend = open_backend(&paths, false).unwrap();
        backend.set("k", b"v").unwrap();

        assert!(paths.database.exists());
    }
}
