//! Startup configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use vela_termination::TerminationConfig;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Application support root
    pub data_dir: PathBuf,
    /// Support directory of the app-wide key-value store
    pub key_value_dir: PathBuf,
    /// Support directory of the tab persistence store
    pub tabs_dir: PathBuf,
    /// Directory of the deprecated file-per-key store
    pub legacy_dir: PathBuf,
    /// Flush delays before terminating
    #[serde(default)]
    pub termination: TerminationConfig,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            key_value_dir: data_dir.join("KeyValue"),
            tabs_dir: data_dir.join("Tabs"),
            legacy_dir: data_dir.join("Documents"),
            data_dir,
            termination: TerminationConfig::default(),
        }
    }

    /// Read a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Platform local data directory joined with `Vela`
    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .filter(|d| d.is_absolute())
            .map(|d| d.join("Vela"))
            .unwrap_or_else(|| PathBuf::from(".vela"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_paths_derive_from_data_dir() {
        let config = Config::new(PathBuf::from("/data/vela"));
        assert_eq!(config.key_value_dir, PathBuf::from("/data/vela/KeyValue"));
        assert_eq!(config.tabs_dir, PathBuf::from("/data/vela/Tabs"));
        assert_eq!(config.legacy_dir, PathBuf::from("/data/vela/Documents"));
        assert_eq!(config.termination, TerminationConfig::default());
    }

    #[test]
    fn test_load_json_without_termination_section() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "data_dir": "/d",
                "key_value_dir": "/d/kv",
                "tabs_dir": "/d/tabs",
                "legacy_dir": "/d/docs"
            }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.tabs_dir, PathBuf::from("/d/tabs"));
        assert_eq!(config.termination.abort_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = Config::load(temp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, crate::CoreError::Io(_)));
    }

    #[test]
    fn test_default_lives_under_data_dir() {
        let data_dir = Config::data_dir();
        assert!(data_dir.ends_with("Vela") || data_dir == PathBuf::from(".vela"));

        let config = Config::default();
        assert_eq!(config.data_dir, data_dir);
        assert_eq!(config.tabs_dir, data_dir.join("Tabs"));
    }

    #[test]
    fn test_data_dir_matches_platform_lookup() {
        match dirs::data_local_dir().filter(|d| d.is_absolute()) {
            Some(base) => assert_eq!(Config::data_dir(), base.join("Vela")),
            None => assert_eq!(Config::data_dir(), PathBuf::from(".vela")),
        }
    }
}
