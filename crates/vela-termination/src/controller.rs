//! Termination controller

use parking_lot::Mutex;
use std::error::Error;
use std::sync::Arc;

use vela_diagnostics::DiagnosticSink;

use crate::classifier::{FailureKind, FailureRecord};
use crate::config::TerminationConfig;
use crate::presenter::{AlertPresenter, AlertReason, ProcessTerminator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationOutcome {
    TerminateImmediately,
    AlertThenHalt(AlertReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Running,
    Evaluating(FailureKind),
    Halted(TerminationOutcome),
}

/// Transition function, total over every failure kind
pub fn decide(record: &FailureRecord) -> TerminationOutcome {
    let disk_space_alert = TerminationOutcome::AlertThenHalt(AlertReason::InsufficientDiskSpace);

    match record.kind {
        FailureKind::DatabaseOtherInit | FailureKind::BookmarksDatabaseInit
            if record.disk_full =>
        {
            disk_space_alert
        }
        FailureKind::HistoryDatabaseInit if record.disk_full => disk_space_alert,
        FailureKind::HistoryDatabaseInit => {
            TerminationOutcome::AlertThenHalt(AlertReason::UnrecoverableState)
        }
        FailureKind::DatabaseContainerInit
        | FailureKind::DatabaseOtherInit
        | FailureKind::BookmarksDatabaseInit
        | FailureKind::KeyValueStoreInit(_)
        | FailureKind::TabsPersistenceInit(_)
        | FailureKind::Unhandled => TerminationOutcome::TerminateImmediately,
    }
}

/// State plus the outcome already decided for an in-flight evaluation
struct Inner {
    state: ControllerState,
    pending: Option<TerminationOutcome>,
}

pub struct TerminationController {
    inner: Mutex<Inner>,
    config: TerminationConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
    presenter: Arc<dyn AlertPresenter>,
    terminator: Arc<dyn ProcessTerminator>,
}

impl TerminationController {
    pub fn new(
        config: TerminationConfig,
        diagnostics: Arc<dyn DiagnosticSink>,
        presenter: Arc<dyn AlertPresenter>,
        terminator: Arc<dyn ProcessTerminator>,
    ) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: ControllerState::Running,
                pending: None,
            }),
            config,
            diagnostics,
            presenter,
            terminator,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.inner.lock().state
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.state(), ControllerState::Halted(_))
    }

    /// Drive a fatal failure to its terminal action.
    ///
    /// Reports exactly once, before acting. With a real terminator the
    /// `TerminateImmediately` path does not return. A call made while
    /// another failure is being evaluated, or after the halt, returns that
    /// failure's outcome and does nothing else. The lock is only held for
    /// state transitions, never across collaborator calls or delays.
    pub fn fail(&self, record: FailureRecord) -> TerminationOutcome {
        let outcome = decide(&record);

        {
            let mut inner = self.inner.lock();
            match inner.state {
                ControllerState::Halted(existing) => {
                    tracing::warn!(kind = %record.kind, "Fatal failure after halt ignored");
                    return existing;
                }
                ControllerState::Evaluating(current) => {
                    tracing::warn!(
                        kind = %record.kind,
                        evaluating = %current,
                        "Fatal failure during evaluation ignored"
                    );
                    return inner.pending.unwrap_or(outcome);
                }
                ControllerState::Running => {
                    inner.state = ControllerState::Evaluating(record.kind);
                    inner.pending = Some(outcome);
                }
            }
        }

        tracing::error!(
            kind = %record.kind,
            disk_full = record.disk_full,
            "Fatal startup failure"
        );

        let underlying = record
            .error
            .as_deref()
            .map(|e| e as &(dyn Error + 'static));
        self.diagnostics
            .report(record.kind.event(), record.parameters.clone(), underlying);

        if record.kind == FailureKind::Unhandled {
            std::thread::sleep(self.config.unhandled_flush_delay);
        }

        {
            let mut inner = self.inner.lock();
            inner.state = ControllerState::Halted(outcome);
            inner.pending = None;
        }

        match outcome {
            TerminationOutcome::TerminateImmediately => {
                std::thread::sleep(self.config.abort_delay);
                let message = match &record.error {
                    Some(e) => format!("{}: {}", record.kind, e),
                    None => record.kind.to_string(),
                };
                self.terminator.terminate(&message);
            }
            TerminationOutcome::AlertThenHalt(reason) => {
                tracing::warn!(reason = ?reason, "Halting behind alert");
                self.presenter.show_blank_window();
                self.presenter.present(reason);
            }
        }

        outcome
    }
}
