//! Failure classification
//!
//! Pure mapping from a raw fatal error to a [`FailureRecord`]. Anything that
//! is not a [`StartupError`] is `Unhandled`.

use std::error::Error;

use vela_diagnostics::{DiagnosticEvent, Parameters};
use vela_storage::StoreInitError;

use crate::error::{BoxError, StartupError};

/// POSIX "no space left on device"
pub const ENOSPC: i32 = 28;

/// Which step of bringing a store up failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreInitStage {
    DirectoryAccess,
    StoreInit,
}

impl From<&StoreInitError> for StoreInitStage {
    fn from(error: &StoreInitError) -> Self {
        match error {
            StoreInitError::DirectoryAccess { .. } => StoreInitStage::DirectoryAccess,
            StoreInitError::StoreInit(_) => StoreInitStage::StoreInit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    DatabaseContainerInit,
    DatabaseOtherInit,
    BookmarksDatabaseInit,
    HistoryDatabaseInit,
    KeyValueStoreInit(StoreInitStage),
    TabsPersistenceInit(StoreInitStage),
    Unhandled,
}

impl FailureKind {
    /// Dedicated diagnostic event for this kind
    pub fn event(&self) -> DiagnosticEvent {
        match self {
            FailureKind::DatabaseContainerInit => DiagnosticEvent::DatabaseContainerInitFailed,
            FailureKind::DatabaseOtherInit => DiagnosticEvent::DatabaseOtherInitFailed,
            FailureKind::BookmarksDatabaseInit => DiagnosticEvent::BookmarksDatabaseInitFailed,
            FailureKind::HistoryDatabaseInit => DiagnosticEvent::HistoryDatabaseInitFailed,
            FailureKind::KeyValueStoreInit(StoreInitStage::DirectoryAccess) => {
                DiagnosticEvent::KeyValueStoreDirectoryAccessFailed
            }
            FailureKind::KeyValueStoreInit(StoreInitStage::StoreInit) => {
                DiagnosticEvent::KeyValueStoreInitFailed
            }
            FailureKind::TabsPersistenceInit(StoreInitStage::DirectoryAccess) => {
                DiagnosticEvent::TabsPersistenceDirectoryAccessFailed
            }
            FailureKind::TabsPersistenceInit(StoreInitStage::StoreInit) => {
                DiagnosticEvent::TabsPersistenceInitFailed
            }
            FailureKind::Unhandled => DiagnosticEvent::UnhandledStartupError,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event())
    }
}

/// Classified fatal startup error
#[derive(Debug)]
pub struct FailureRecord {
    pub kind: FailureKind,
    /// Only ever set for kinds where running out of disk is actionable
    pub disk_full: bool,
    pub parameters: Parameters,
    pub error: Option<BoxError>,
}

impl FailureRecord {
    fn new(kind: FailureKind, error: BoxError) -> Self {
        Self {
            kind,
            disk_full: false,
            parameters: Parameters::new(),
            error: Some(error),
        }
    }

    fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    fn checking_disk_full(mut self) -> Self {
        self.disk_full = self.error.as_deref().is_some_and(|e| is_disk_full(e));
        self
    }
}

impl From<StartupError> for FailureRecord {
    fn from(error: StartupError) -> Self {
        match error {
            StartupError::DatabaseContainer { context, source } => {
                FailureRecord::new(FailureKind::DatabaseContainerInit, source)
                    .with_parameters(context.parameters())
            }
            StartupError::DatabaseOther { context, source } => {
                FailureRecord::new(FailureKind::DatabaseOtherInit, source)
                    .with_parameters(context.parameters())
                    .checking_disk_full()
            }
            StartupError::BookmarksDatabase(source) => {
                FailureRecord::new(FailureKind::BookmarksDatabaseInit, source).checking_disk_full()
            }
            StartupError::HistoryDatabase(source) => {
                FailureRecord::new(FailureKind::HistoryDatabaseInit, source).checking_disk_full()
            }
            StartupError::KeyValueStore(source) => FailureRecord::new(
                FailureKind::KeyValueStoreInit(StoreInitStage::from(&source)),
                Box::new(source),
            ),
            StartupError::TabsPersistence(source) => FailureRecord::new(
                FailureKind::TabsPersistenceInit(StoreInitStage::from(&source)),
                Box::new(source),
            ),
        }
    }
}

/// Classify any fatal error
pub fn classify(error: BoxError) -> FailureRecord {
    match error.downcast::<StartupError>() {
        Ok(startup) => FailureRecord::from(*startup),
        Err(other) => FailureRecord::new(FailureKind::Unhandled, other),
    }
}

/// True if `error` or anything it wraps reports "no space left on device".
///
/// Two paths are checked at every level of the chain: an OS error code of
/// [`ENOSPC`] (including one wrapped inside another `io::Error`), and the
/// SQLite `SQLITE_FULL` result code.
pub fn is_disk_full(error: &(dyn Error + 'static)) -> bool {
    let mut current = Some(error);

    while let Some(err) = current {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if io.raw_os_error() == Some(ENOSPC) {
                return true;
            }
            // io::Error::source skips the wrapped error itself
            if let Some(inner) = io.get_ref() {
                if is_disk_full(inner) {
                    return true;
                }
            }
        }

        if let Some(rusqlite::Error::SqliteFailure(failure, _)) =
            err.downcast_ref::<rusqlite::Error>()
        {
            if failure.code == rusqlite::ErrorCode::DiskFull {
                return true;
            }
        }

        current = err.source();
    }

    false
}
