//! Core error types

use thiserror::Error;

use vela_termination::TerminationOutcome;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Startup ended in a terminal outcome
    #[error("Startup halted: {0:?}")]
    Halted(TerminationOutcome),
}
