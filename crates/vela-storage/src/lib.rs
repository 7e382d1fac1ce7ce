//! Vela Storage Layer
//!
//! SQLite-backed key-value persistence for startup-critical state, plus the
//! deprecated file-per-key store that older releases wrote to.
//! Opening a store in its support directory is the one fallible step that
//! callers must treat as fatal.

mod database;
mod error;
mod key_value;
mod legacy;
mod migrations;

pub use database::{Database, DATABASE_FILE_NAME};
pub use error::{StorageError, StoreInitError};
pub use key_value::KeyValueStore;
pub use legacy::{LegacyFileStore, LegacyStore};

pub type Result<T> = std::result::Result<T, StorageError>;
