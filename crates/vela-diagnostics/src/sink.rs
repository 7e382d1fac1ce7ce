//! Diagnostic sinks
//!
//! `report` is fire-and-forget: callers never consult a return value and a
//! sink must not panic on any input.

use parking_lot::Mutex;
use std::error::Error;

use crate::event::DiagnosticEvent;
use crate::Parameters;

pub trait DiagnosticSink: Send + Sync {
    fn report(
        &self,
        event: DiagnosticEvent,
        parameters: Parameters,
        error: Option<&(dyn Error + 'static)>,
    );
}

/// Renders an error and its `source()` chain as `outer: inner: ...`.
///
/// Causes whose message is already part of the rendered text are skipped,
/// since wrapping errors commonly print their source inline.
fn render_chain(error: &(dyn Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        let message = cause.to_string();
        if !rendered.contains(&message) {
            rendered.push_str(": ");
            rendered.push_str(&message);
        }
        current = cause.source();
    }
    rendered
}

/// Production sink that forwards reports to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(
        &self,
        event: DiagnosticEvent,
        parameters: Parameters,
        error: Option<&(dyn Error + 'static)>,
    ) {
        let error = error.map(render_chain).unwrap_or_default();

        if event.is_fatal() {
            tracing::error!(
                event = %event,
                parameters = ?parameters,
                error = %error,
                "Fatal diagnostic"
            );
        } else {
            tracing::warn!(
                event = %event,
                parameters = ?parameters,
                error = %error,
                "Diagnostic"
            );
        }
    }
}

/// A single captured report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
    pub event: DiagnosticEvent,
    pub parameters: Parameters,
    /// Rendered underlying error chain, if one was attached
    pub error: Option<String>,
}

/// Sink that keeps every report in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<DiagnosticReport>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<DiagnosticReport> {
        self.reports.lock().clone()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.reports.lock().iter().map(|r| r.event).collect()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(
        &self,
        event: DiagnosticEvent,
        parameters: Parameters,
        error: Option<&(dyn Error + 'static)>,
    ) {
        self.reports.lock().push(DiagnosticReport {
            event,
            parameters,
            error: error.map(render_chain),
        });
    }
}
