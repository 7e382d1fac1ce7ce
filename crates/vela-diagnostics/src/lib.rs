//! Vela Diagnostics
//!
//! Fire-and-forget reporting of noteworthy failures. Startup-critical code
//! reports through a [`DiagnosticSink`] that is handed in by the caller;
//! nothing here reaches for a process-wide reporter.

mod event;
mod sink;

pub use event::DiagnosticEvent;
pub use sink::{DiagnosticReport, DiagnosticSink, MemorySink, TracingSink};

use std::collections::BTreeMap;

/// Free-form contextual parameters attached to a report.
pub type Parameters = BTreeMap<String, String>;
