//! Diagnostic event kinds

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticEvent {
    // Recoverable session persistence failures
    SessionPrimaryCorrupt,
    SessionPrimaryReadFailed,
    SessionLegacyCorrupt,
    SessionMigrationWriteFailed,
    SessionSaveFailed,

    // Fatal startup failures
    DatabaseContainerInitFailed,
    DatabaseOtherInitFailed,
    BookmarksDatabaseInitFailed,
    HistoryDatabaseInitFailed,
    KeyValueStoreDirectoryAccessFailed,
    KeyValueStoreInitFailed,
    TabsPersistenceDirectoryAccessFailed,
    TabsPersistenceInitFailed,
    UnhandledStartupError,
}

impl DiagnosticEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticEvent::SessionPrimaryCorrupt => "session_primary_corrupt",
            DiagnosticEvent::SessionPrimaryReadFailed => "session_primary_read_failed",
            DiagnosticEvent::SessionLegacyCorrupt => "session_legacy_corrupt",
            DiagnosticEvent::SessionMigrationWriteFailed => "session_migration_write_failed",
            DiagnosticEvent::SessionSaveFailed => "session_save_failed",
            DiagnosticEvent::DatabaseContainerInitFailed => "database_container_init_failed",
            DiagnosticEvent::DatabaseOtherInitFailed => "database_other_init_failed",
            DiagnosticEvent::BookmarksDatabaseInitFailed => "bookmarks_database_init_failed",
            DiagnosticEvent::HistoryDatabaseInitFailed => "history_database_init_failed",
            DiagnosticEvent::KeyValueStoreDirectoryAccessFailed => {
                "key_value_store_directory_access_failed"
            }
            DiagnosticEvent::KeyValueStoreInitFailed => "key_value_store_init_failed",
            DiagnosticEvent::TabsPersistenceDirectoryAccessFailed => {
                "tabs_persistence_directory_access_failed"
            }
            DiagnosticEvent::TabsPersistenceInitFailed => "tabs_persistence_init_failed",
            DiagnosticEvent::UnhandledStartupError => "unhandled_startup_error",
        }
    }

    /// Returns true for events that precede process termination or a halt
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            DiagnosticEvent::SessionPrimaryCorrupt
                | DiagnosticEvent::SessionPrimaryReadFailed
                | DiagnosticEvent::SessionLegacyCorrupt
                | DiagnosticEvent::SessionMigrationWriteFailed
                | DiagnosticEvent::SessionSaveFailed
        )
    }
}

impl std::fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
