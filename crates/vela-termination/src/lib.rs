//! Vela Startup Termination
//!
//! Turns a fatal initialization error into one deterministic decision:
//!
//! ```text
//! Running
//!   ↓ fail(record)
//! Evaluating(kind)     -- exactly one diagnostic report
//!   ↓
//! TerminateImmediately | AlertThenHalt(reason)
//!   ↓
//! Halted               -- never back to Running
//! ```

mod classifier;
mod config;
mod controller;
mod error;
mod presenter;

pub use classifier::{
    classify, is_disk_full, FailureKind, FailureRecord, StoreInitStage, ENOSPC,
};
pub use config::TerminationConfig;
pub use controller::{decide, ControllerState, TerminationController, TerminationOutcome};
pub use error::{ApplicationState, BoxError, LaunchContext, StartupError};
pub use presenter::{
    AlertPresenter, AlertReason, HeadlessPresenter, ProcessAbort, ProcessTerminator,
};
