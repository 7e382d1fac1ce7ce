//! Termination timing

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Best-effort flush windows before the process dies.
///
/// Reports are fire-and-forget, so there is no guarantee one lands before
/// the abort; these delays only give it a chance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationConfig {
    /// Extra wait after reporting an unrecognized error
    pub unhandled_flush_delay: Duration,
    /// Wait before every immediate abort
    pub abort_delay: Duration,
}

impl TerminationConfig {
    /// No delays at all
    pub fn immediate() -> Self {
        Self {
            unhandled_flush_delay: Duration::ZERO,
            abort_delay: Duration::ZERO,
        }
    }
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            unhandled_flush_delay: Duration::from_secs(1),
            abort_delay: Duration::from_secs(1),
        }
    }
}
