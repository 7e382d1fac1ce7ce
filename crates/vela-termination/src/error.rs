//! Raw fatal startup errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vela_diagnostics::Parameters;
use vela_storage::StoreInitError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Lifecycle state of the application when the failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationState {
    Active,
    Inactive,
    Background,
}

impl ApplicationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationState::Active => "active",
            ApplicationState::Inactive => "inactive",
            ApplicationState::Background => "background",
        }
    }
}

impl std::fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Environment captured alongside database failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchContext {
    pub application_state: ApplicationState,
    /// Whether file protection currently allows reading protected data
    pub protected_data_available: bool,
}

impl LaunchContext {
    pub fn parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        parameters.insert(
            "application_state".to_string(),
            self.application_state.to_string(),
        );
        parameters.insert(
            "protected_data_available".to_string(),
            self.protected_data_available.to_string(),
        );
        parameters
    }
}

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Database container failed to load: {source}")]
    DatabaseContainer {
        context: LaunchContext,
        #[source]
        source: BoxError,
    },

    #[error("Database failed to initialize: {source}")]
    DatabaseOther {
        context: LaunchContext,
        #[source]
        source: BoxError,
    },

    #[error("Bookmarks database failed to initialize: {0}")]
    BookmarksDatabase(#[source] BoxError),

    #[error("History database failed to initialize: {0}")]
    HistoryDatabase(#[source] BoxError),

    #[error("Key-value store failed to initialize: {0}")]
    KeyValueStore(#[source] StoreInitError),

    #[error("Tabs persistence failed to initialize: {0}")]
    TabsPersistence(#[source] StoreInitError),
}
