//! Vela Core
//!
//! Startup coordination: bring up the persistent stores, restore the open
//! tabs, and route any fatal failure to a single termination decision.

mod config;
mod error;
mod launcher;

pub use config::Config;
pub use error::CoreError;
pub use launcher::{Collaborators, Launched, Launcher};

// Re-export core components
pub use vela_diagnostics::{DiagnosticEvent, DiagnosticSink, MemorySink, TracingSink};
pub use vela_session::{Session, SessionStateStore, TabEntry};
pub use vela_storage::{Database, KeyValueStore, LegacyFileStore, StoreInitError};
pub use vela_termination::{
    AlertPresenter, AlertReason, ApplicationState, LaunchContext, ProcessTerminator,
    StartupError, TerminationConfig, TerminationOutcome,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
