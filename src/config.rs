use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StepifyError;

/// Contents of `.stepify/config.json`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_soft_delete")]
    pub soft_delete: bool,
    /// `tracing` filter directive, e.g. `info` or `stepify=debug`.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            soft_delete: default_soft_delete(),
            log_level: None,
        }
    }
}

fn default_soft_delete() -> bool {
    true
}

/// The part of the config the document store reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub soft_delete: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { soft_delete: true }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, StepifyError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| StepifyError::Config(format!("{}: {e}", path.display())))
    }

    /// Write the config unless a file is already there.
    pub fn write_if_missing(&self, path: &Path) -> Result<bool, StepifyError> {
        if path.exists() {
            return Ok(false);
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(true)
    }

    pub fn store(&self) -> StoreConfig {
        StoreConfig {
            soft_delete: self.soft_delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.store().soft_delete);
    }

    #[test]
    fn load_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code().as_str(), "CONFIG_ERROR");
    }

    #[test]
    fn load_reads_physical_delete_setting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"soft_delete": false, "log_level": "debug"}"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert!(!config.soft_delete);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }
}
