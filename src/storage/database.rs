//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.doing/doing.db` and holds a single
//! `preferences` table of key/value blobs.

use rusqlite::{params, Connection, OptionalExtension};

use crate::config::Paths;
use crate::error::DoingError;

use super::{migrations, KeyValueStore};

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open(paths: &Paths) -> Result<Self, DoingError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, DoingError> {
        let conn = Connection::open(path).map_err(|e| {
            DoingError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, DoingError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DoingError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    fn migrate(&self) -> Result<(), DoingError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, DoingError> {
        migrations::get_version(&self.conn)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DoingError> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DoingError::Database(format!("Failed to read {key}: {e}")))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), DoingError> {
        self.conn
            .execute(
                r"INSERT INTO preferences (key, value, updated_at)
                  VALUES (?1, ?2, CURRENT_TIMESTAMP)
                  ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = CURRENT_TIMESTAMP",
                params![key, value],
            )
            .map_err(|e| DoingError::Database(format!("Failed to write {key}: {e}")))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DoingError> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1", [key])
            .map_err(|e| DoingError::Database(format!("Failed to delete {key}: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_open_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open_at(&db_path).unwrap();
        assert!(db.schema_version().unwrap() > 0);
        assert!(db_path.exists());
    }

    #[test]
    fn test_open_creates_data_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("data"));

        Database::open(&paths).unwrap();
        assert!(paths.database.exists());
    }

    #[test]
    fn test_get_missing_key() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let db = Database::open_in_memory().unwrap();

        db.set("currentTask", b"first").unwrap();
        db.set("currentTask", b"second").unwrap();

        assert_eq!(db.get("currentTask").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn test_remove() {
        let db = Database::open_in_memory().unwrap();

        db.set("pomodoroSettings", b"{}").unwrap();
        db.remove("pomodoroSettings").unwrap();
        // Removing twice is fine
        db.remove("pomodoroSettings").unwrap();

        assert_eq!(db.get("pomodoroSettings").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.set("currentTask", "writing docs".as_bytes()).unwrap();
        }

        {
            let db = Database::open_at(&db_path).unwrap();
            assert_eq!(
                db.get("currentTask").unwrap(),
                Some("writing docs".as_bytes().to_vec())
            );
        }
    }
}
