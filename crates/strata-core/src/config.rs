//! Workbench configuration.
//!
//! Read from `<project>/.strata/config.toml` when present. `REDIS_URL` and
//! `STRATA_RECORD_ID` override the file.

use crate::error::{StrataError, StrataResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Directory holding the local store and config, relative to the project.
pub const STATE_DIR: &str = ".strata";
/// Local database file name inside [`STATE_DIR`].
pub const DB_FILE: &str = "strata.db";
/// Config file name inside [`STATE_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrataConfig {
    /// Remote store URL.
    pub redis_url: String,
    /// Id of the singleton remote record.
    pub record_id: i64,
    /// Quiet period before an auto-save is written.
    pub autosave_debounce_ms: u64,
    /// Suggested name when choosing an export destination.
    pub export_file_name: String,
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.to_string(),
            record_id: 1,
            autosave_debounce_ms: 2000,
            export_file_name: "strategic-analysis.json".to_string(),
        }
    }
}

impl StrataConfig {
    /// Load config for `project_dir`, falling back to defaults.
    pub fn load(project_dir: &Path) -> StrataResult<Self> {
        let path = config_path(project_dir);
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            Self::from_toml(&raw)?
        } else {
            Self::default()
        };
        config.apply_env();
        debug!(path = %path.display(), record_id = config.record_id, "Configuration loaded");
        Ok(config)
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml(raw: &str) -> StrataResult<Self> {
        toml::from_str(raw).map_err(|e| StrataError::config(e.to_string()))
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("REDIS_URL") {
            self.redis_url = url;
        }
        if let Some(id) = std::env::var("STRATA_RECORD_ID")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.record_id = id;
        }
    }

    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }
}

pub fn state_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(STATE_DIR)
}

pub fn db_path(project_dir: &Path) -> PathBuf {
    state_dir(project_dir).join(DB_FILE)
}

pub fn config_path(project_dir: &Path) -> PathBuf {
    state_dir(project_dir).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StrataConfig::from_toml("record_id = 7\n").unwrap();
        assert_eq!(config.record_id, 7);
        assert_eq!(config.autosave_debounce(), Duration::from_secs(2));
        assert_eq!(config.export_file_name, "strategic-analysis.json");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = StrataConfig::from_toml("record_id = \"one\"").unwrap_err();
        assert!(matches!(err, StrataError::Config(_)));
    }

    #[test]
    fn test_paths() {
        let root = Path::new("/work/acme");
        assert_eq!(db_path(root), PathBuf::from("/work/acme/.strata/strata.db"));
        assert_eq!(config_path(root), PathBuf::from("/work/acme/.strata/config.toml"));
    }
}
