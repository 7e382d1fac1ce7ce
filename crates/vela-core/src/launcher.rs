//! Startup launcher
//!
//! Opens the stores in order and restores the session. A store that cannot
//! be opened is never retried; its error goes straight to the termination
//! controller.

use std::sync::Arc;

use vela_diagnostics::{DiagnosticSink, TracingSink};
use vela_session::{Session, SessionStateStore};
use vela_storage::{Database, LegacyFileStore};
use vela_termination::{
    classify, AlertPresenter, BoxError, FailureRecord, HeadlessPresenter, ProcessAbort,
    ProcessTerminator, StartupError, TerminationController, TerminationOutcome,
};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// External collaborators handed to the launcher
#[derive(Clone)]
pub struct Collaborators {
    pub diagnostics: Arc<dyn DiagnosticSink>,
    pub presenter: Arc<dyn AlertPresenter>,
    pub terminator: Arc<dyn ProcessTerminator>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            diagnostics: Arc::new(TracingSink),
            presenter: Arc::new(HeadlessPresenter),
            terminator: Arc::new(ProcessAbort),
        }
    }
}

/// Everything a successful startup produces
pub struct Launched {
    /// App-wide key-value store
    pub settings: Database,
    pub sessions: SessionStateStore,
    /// Restored session, `None` on first launch or unreadable data
    pub session: Option<Session>,
}

pub struct Launcher {
    config: Config,
    diagnostics: Arc<dyn DiagnosticSink>,
    controller: TerminationController,
}

impl Launcher {
    pub fn new(config: Config, collaborators: Collaborators) -> Self {
        let controller = TerminationController::new(
            config.termination,
            Arc::clone(&collaborators.diagnostics),
            collaborators.presenter,
            collaborators.terminator,
        );

        Self {
            config,
            diagnostics: collaborators.diagnostics,
            controller,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn controller(&self) -> &TerminationController {
        &self.controller
    }

    pub fn launch(&self) -> Result<Launched> {
        let settings = Database::open_in_support_dir(&self.config.key_value_dir)
            .map_err(|e| self.escalate(StartupError::KeyValueStore(e)))?;

        let legacy = Arc::new(LegacyFileStore::new(&self.config.legacy_dir));
        let sessions = SessionStateStore::open(
            &self.config.tabs_dir,
            legacy,
            Arc::clone(&self.diagnostics),
        )
        .map_err(|e| self.escalate(StartupError::TabsPersistence(e)))?;

        let session = sessions.load();

        tracing::info!(
            data_dir = %self.config.data_dir.display(),
            restored_tabs = session.as_ref().map_or(0, Session::tab_count),
            "Startup complete"
        );

        Ok(Launched {
            settings,
            sessions,
            session,
        })
    }

    /// Route a fatal error from any subsystem to the termination controller
    pub fn fail<E: Into<BoxError>>(&self, error: E) -> TerminationOutcome {
        self.controller.fail(classify(error.into()))
    }

    fn escalate(&self, error: StartupError) -> CoreError {
        CoreError::Halted(self.controller.fail(FailureRecord::from(error)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::path::Path;
    use tempfile::TempDir;
    use vela_diagnostics::{DiagnosticEvent, MemorySink};
    use vela_session::{JsonSessionCodec, SessionCodec, TabEntry, LEGACY_SESSION_KEY};
    use vela_termination::{
        AlertReason, ApplicationState, ControllerState, LaunchContext, TerminationConfig,
    };

    #[derive(Default)]
    struct RecordingPresenter {
        alerts: Mutex<Vec<AlertReason>>,
    }

    impl AlertPresenter for RecordingPresenter {
        fn show_blank_window(&self) {}

        fn present(&self, reason: AlertReason) {
            self.alerts.lock().push(reason);
        }
    }

    #[derive(Default)]
    struct RecordingTerminator {
        calls: Mutex<usize>,
    }

    impl ProcessTerminator for RecordingTerminator {
        fn terminate(&self, _message: &str) {
            *self.calls.lock() += 1;
        }
    }

    struct Harness {
        sink: Arc<MemorySink>,
        presenter: Arc<RecordingPresenter>,
        terminator: Arc<RecordingTerminator>,
        launcher: Launcher,
    }

    fn harness(data_dir: &Path) -> Harness {
        let mut config = Config::new(data_dir.to_path_buf());
        config.termination = TerminationConfig::immediate();

        let sink = Arc::new(MemorySink::new());
        let presenter = Arc::new(RecordingPresenter::default());
        let terminator = Arc::new(RecordingTerminator::default());
        let launcher = Launcher::new(
            config,
            Collaborators {
                diagnostics: sink.clone(),
                presenter: presenter.clone(),
                terminator: terminator.clone(),
            },
        );

        Harness {
            sink,
            presenter,
            terminator,
            launcher,
        }
    }

    fn sample() -> Session {
        Session::new(vec![
            TabEntry::new(Some("https://example.com".to_string())),
            TabEntry::new(Some("https://docs.rs".to_string())).with_title("Docs.rs"),
        ])
    }

    #[test]
    fn test_first_launch_has_no_session() {
        let temp = TempDir::new().unwrap();
        let h = harness(temp.path());

        let launched = h.launcher.launch().unwrap();
        assert!(launched.session.is_none());
        assert_eq!(h.launcher.controller().state(), ControllerState::Running);
        assert!(h.sink.is_empty());
    }

    #[test]
    fn test_session_survives_relaunch() {
        let temp = TempDir::new().unwrap();
        let session = sample();

        {
            let h = harness(temp.path());
            let launched = h.launcher.launch().unwrap();
            launched.sessions.save(&session);
        }

        let h = harness(temp.path());
        let launched = h.launcher.launch().unwrap();
        assert_eq!(launched.session, Some(session));
    }

    #[test]
    fn test_legacy_session_is_migrated_on_launch() {
        let temp = TempDir::new().unwrap();
        let h = harness(temp.path());
        let session = sample();

        let legacy_dir = &h.launcher.config().legacy_dir;
        std::fs::create_dir_all(legacy_dir).unwrap();
        let legacy_file = legacy_dir.join(LEGACY_SESSION_KEY);
        std::fs::write(&legacy_file, JsonSessionCodec.encode(&session).unwrap()).unwrap();

        let launched = h.launcher.launch().unwrap();
        assert_eq!(launched.session, Some(session));
        assert!(!legacy_file.exists());
    }

    #[test]
    fn test_key_value_store_failure_terminates() {
        let temp = TempDir::new().unwrap();
        let h = harness(temp.path());
        std::fs::write(&h.launcher.config().key_value_dir, b"in the way").unwrap();

        let err = h.launcher.launch().err().unwrap();
        assert!(matches!(
            err,
            CoreError::Halted(TerminationOutcome::TerminateImmediately)
        ));
        assert_eq!(
            h.sink.events(),
            vec![DiagnosticEvent::KeyValueStoreDirectoryAccessFailed]
        );
        assert_eq!(*h.terminator.calls.lock(), 1);
        // Tab persistence was never touched
        assert!(!h.launcher.config().tabs_dir.exists());
    }

    #[test]
    fn test_tabs_persistence_failure_terminates() {
        let temp = TempDir::new().unwrap();
        let h = harness(temp.path());
        std::fs::write(&h.launcher.config().tabs_dir, b"in the way").unwrap();

        let err = h.launcher.launch().err().unwrap();
        assert!(matches!(
            err,
            CoreError::Halted(TerminationOutcome::TerminateImmediately)
        ));
        assert_eq!(
            h.sink.events(),
            vec![DiagnosticEvent::TabsPersistenceDirectoryAccessFailed]
        );
        assert_eq!(*h.terminator.calls.lock(), 1);
    }

    #[test]
    fn test_subsystem_failure_routes_through_controller() {
        let temp = TempDir::new().unwrap();
        let h = harness(temp.path());

        let outcome = h.launcher.fail(StartupError::HistoryDatabase(Box::new(
            std::io::Error::from_raw_os_error(vela_termination::ENOSPC),
        )));

        assert_eq!(
            outcome,
            TerminationOutcome::AlertThenHalt(AlertReason::InsufficientDiskSpace)
        );
        assert_eq!(
            *h.presenter.alerts.lock(),
            vec![AlertReason::InsufficientDiskSpace]
        );
        assert_eq!(*h.terminator.calls.lock(), 0);

        // Halted for good: a later failure changes nothing
        let later = h.launcher.fail(StartupError::DatabaseOther {
            context: LaunchContext {
                application_state: ApplicationState::Active,
                protected_data_available: true,
            },
            source: Box::new(std::io::Error::from(std::io::ErrorKind::Other)),
        });
        assert_eq!(later, outcome);
        assert_eq!(h.sink.len(), 1);
    }

    #[test]
    fn test_arbitrary_error_is_unhandled() {
        let temp = TempDir::new().unwrap();
        let h = harness(temp.path());

        let outcome = h.launcher.fail("unexpected startup state");
        assert_eq!(outcome, TerminationOutcome::TerminateImmediately);
        assert_eq!(h.sink.events(), vec![DiagnosticEvent::UnhandledStartupError]);
        assert_eq!(*h.terminator.calls.lock(), 1);
    }
}
