//! Terminal-action collaborators

use serde::{Deserialize, Serialize};

/// Why the app halted behind an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertReason {
    InsufficientDiskSpace,
    UnrecoverableState,
}

impl AlertReason {
    pub fn title(&self) -> &'static str {
        match self {
            AlertReason::InsufficientDiskSpace => "Not enough storage",
            AlertReason::UnrecoverableState => "Something went wrong",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AlertReason::InsufficientDiskSpace => {
                "Vela could not start because your device is out of storage. \
                 Free up some space, then restart the app."
            }
            AlertReason::UnrecoverableState => {
                "Vela ran into a problem it cannot recover from. \
                 Please restart the app."
            }
        }
    }
}

pub trait AlertPresenter: Send + Sync {
    /// Replace whatever the active window shows with an empty one
    fn show_blank_window(&self);
    fn present(&self, reason: AlertReason);
}

/// Unconditional process exit. Production implementations never return.
pub trait ProcessTerminator: Send + Sync {
    fn terminate(&self, message: &str);
}

/// Aborts the process
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessAbort;

impl ProcessTerminator for ProcessAbort {
    fn terminate(&self, message: &str) {
        tracing::error!(message = %message, "Aborting");
        std::process::abort();
    }
}

/// Presenter for builds without a window system; writes the alert to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessPresenter;

impl AlertPresenter for HeadlessPresenter {
    fn show_blank_window(&self) {
        tracing::debug!("No window to blank");
    }

    fn present(&self, reason: AlertReason) {
        tracing::error!(
            reason = ?reason,
            title = reason.title(),
            "{}",
            reason.message()
        );
    }
}
