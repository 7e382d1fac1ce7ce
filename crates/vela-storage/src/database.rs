//! Database connection and operations

use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

use crate::error::StoreInitError;
use crate::migrations::run_migrations;
use crate::Result;

/// File name of the store inside its support directory
pub const DATABASE_FILE_NAME: &str = "vela.db";

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        // Run migrations
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the store inside `support_dir`, creating the directory if needed.
    ///
    /// The directory must exist (or be creatable) and accept a new file
    /// before any database work happens; the two failure points map to the two
    /// [`StoreInitError`] variants.
    pub fn open_in_support_dir<P: AsRef<Path>>(
        support_dir: P,
    ) -> std::result::Result<Self, StoreInitError> {
        let dir = support_dir.as_ref();

        let directory_error = |source: std::io::Error| StoreInitError::DirectoryAccess {
            path: dir.to_path_buf(),
            source,
        };

        std::fs::create_dir_all(dir).map_err(directory_error)?;

        // Permission bits alone miss directories owned by another user
        tempfile::NamedTempFile::new_in(dir).map_err(directory_error)?;

        let db = Self::open(dir.join(DATABASE_FILE_NAME)).map_err(StoreInitError::StoreInit)?;

        tracing::debug!(path = %dir.display(), "Opened store in support directory");

        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let count: i32 =
                conn.query_row("SELECT COUNT(*) FROM key_value", [], |row| row.get(0))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_open_in_support_dir_creates_directory() {
        let temp = TempDir::new().unwrap();
        let support_dir = temp.path().join("Application Support").join("tabs");

        let db = Database::open_in_support_dir(&support_dir).unwrap();
        drop(db);

        assert!(support_dir.is_dir());
        assert!(support_dir.join(DATABASE_FILE_NAME).is_file());
    }

    #[test]
    fn test_support_dir_that_is_a_file_is_directory_access_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("tabs");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = Database::open_in_support_dir(&blocker).err().unwrap();
        assert!(err.is_directory_access());
    }

    #[test]
    fn test_unopenable_database_is_store_init_error() {
        let temp = TempDir::new().unwrap();
        // A directory where the database file should be cannot be opened as SQLite
        std::fs::create_dir(temp.path().join(DATABASE_FILE_NAME)).unwrap();

        let err = Database::open_in_support_dir(temp.path()).err().unwrap();
        assert!(matches!(err, StoreInitError::StoreInit(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_support_dir_is_directory_access_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let support_dir = temp.path().join("tabs");
        std::fs::create_dir(&support_dir).unwrap();
        std::fs::set_permissions(&support_dir, std::fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users can write regardless of mode bits
        let writable = std::fs::write(support_dir.join("check"), b"").is_ok();

        let result = Database::open_in_support_dir(&support_dir);
        std::fs::set_permissions(&support_dir, std::fs::Permissions::from_mode(0o755)).unwrap();

        if writable {
            assert!(result.is_ok());
        } else {
            assert!(result.err().unwrap().is_directory_access());
        }
    }
}
