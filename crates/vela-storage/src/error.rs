//! Storage error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to bring a store up inside its support directory
#[derive(Error, Debug)]
pub enum StoreInitError {
    #[error("Support directory not accessible: {}", path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store initialization failed: {0}")]
    StoreInit(#[source] StorageError),
}

impl StoreInitError {
    pub fn is_directory_access(&self) -> bool {
        matches!(self, StoreInitError::DirectoryAccess { .. })
    }
}
