//! Deprecated file-per-key store
//!
//! Older releases wrote each value to its own file. Reads are best-effort:
//! any I/O failure is indistinguishable from an absent key.

use std::path::{Path, PathBuf};

pub trait LegacyStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn remove(&self, key: &str);
}

#[derive(Debug, Clone)]
pub struct LegacyFileStore {
    root: PathBuf,
}

impl LegacyFileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl LegacyStore for LegacyFileStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "Legacy read failed, treating as absent");
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => tracing::debug!(key = %key, "Removed legacy entry"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(key = %key, error = %e, "Failed to remove legacy entry"),
        }
    }
}
