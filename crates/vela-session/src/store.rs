//! Session state store
//!
//! Owns the primary and legacy session keys. Data problems during normal
//! operation are reported and swallowed: a lost tab list is recoverable, a
//! crash at launch is not.

use std::path::Path;
use std::sync::Arc;

use vela_diagnostics::{DiagnosticEvent, DiagnosticSink, Parameters};
use vela_storage::{Database, KeyValueStore, LegacyStore, StoreInitError};

use crate::codec::{JsonSessionCodec, SessionCodec};
use crate::session::Session;
use crate::Result;

/// Key of the current-format session blob in the primary store
pub const PRIMARY_SESSION_KEY: &str = "tabs_model";

/// Key of the deprecated session blob in the legacy store
pub const LEGACY_SESSION_KEY: &str = "open_tabs";

pub struct SessionStateStore {
    store: Arc<dyn KeyValueStore>,
    legacy: Arc<dyn LegacyStore>,
    codec: Arc<dyn SessionCodec>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl SessionStateStore {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        legacy: Arc<dyn LegacyStore>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            store,
            legacy,
            codec: Arc::new(JsonSessionCodec),
            diagnostics,
        }
    }

    /// Open the primary store in `support_dir`.
    ///
    /// This is the only fatal entry point: the error is handed back untouched
    /// for the caller to escalate, and no half-built store is returned.
    pub fn open<P: AsRef<Path>>(
        support_dir: P,
        legacy: Arc<dyn LegacyStore>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> std::result::Result<Self, StoreInitError> {
        let db = Database::open_in_support_dir(support_dir)?;
        Ok(Self::new(Arc::new(db), legacy, diagnostics))
    }

    pub fn with_codec(mut self, codec: Arc<dyn SessionCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Restore the persisted session, migrating a legacy blob if that is all
    /// there is. Returns `None` for missing or unreadable data.
    pub fn load(&self) -> Option<Session> {
        let bytes = match self.store.get(PRIMARY_SESSION_KEY) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read primary session");
                self.report(DiagnosticEvent::SessionPrimaryReadFailed, PRIMARY_SESSION_KEY, &e);
                return None;
            }
        };

        match bytes {
            Some(bytes) => match self.codec.decode(&bytes) {
                Ok(session) => {
                    tracing::info!(tab_count = session.tab_count(), "Restored session");
                    Some(session)
                }
                Err(e) => {
                    // Left in place; the next save overwrites it
                    tracing::warn!(error = %e, "Discarding corrupt primary session");
                    self.report(DiagnosticEvent::SessionPrimaryCorrupt, PRIMARY_SESSION_KEY, &e);
                    None
                }
            },
            None => self.migrate_legacy(),
        }
    }

    fn migrate_legacy(&self) -> Option<Session> {
        let bytes = self.legacy.get(LEGACY_SESSION_KEY)?;

        let session = match self.codec.decode(&bytes) {
            Ok(session) => session,
            Err(e) => {
                // Unreadable legacy data is left untouched
                tracing::warn!(error = %e, "Legacy session could not be decoded");
                self.report(DiagnosticEvent::SessionLegacyCorrupt, LEGACY_SESSION_KEY, &e);
                return None;
            }
        };

        match self.store.set(PRIMARY_SESSION_KEY, &bytes) {
            Ok(()) => {
                self.legacy.remove(LEGACY_SESSION_KEY);
                tracing::info!(tab_count = session.tab_count(), "Migrated legacy session");
            }
            Err(e) => {
                // Legacy entry is kept so the next launch can retry
                tracing::error!(error = %e, "Failed to write migrated session");
                self.report(
                    DiagnosticEvent::SessionMigrationWriteFailed,
                    PRIMARY_SESSION_KEY,
                    &e,
                );
            }
        }

        Some(session)
    }

    /// Persist `session` under the primary key. Failures are reported and
    /// the persist cycle is dropped.
    pub fn save(&self, session: &Session) {
        if let Err(e) = self.try_save(session) {
            tracing::error!(error = %e, "Failed to save session");
            self.report(DiagnosticEvent::SessionSaveFailed, PRIMARY_SESSION_KEY, &e);
        }
    }

    fn try_save(&self, session: &Session) -> Result<()> {
        let bytes = self.codec.encode(session)?;
        self.store.set(PRIMARY_SESSION_KEY, &bytes)?;
        tracing::debug!(tab_count = session.tab_count(), "Saved session");
        Ok(())
    }

    /// Erase persisted session data from both locations
    pub fn clear(&self) {
        self.store.remove(PRIMARY_SESSION_KEY);
        self.legacy.remove(LEGACY_SESSION_KEY);
        tracing::info!("Cleared session state");
    }

    fn report(&self, event: DiagnosticEvent, key: &str, error: &(dyn std::error::Error + 'static)) {
        let mut parameters = Parameters::new();
        parameters.insert("key".to_string(), key.to_string());
        self.diagnostics.report(event, parameters, Some(error));
    }
}

impl Clone for SessionStateStore {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            legacy: Arc::clone(&self.legacy),
            codec: Arc::clone(&self.codec),
            diagnostics: Arc::clone(&self.diagnostics),
        }
    }
}
