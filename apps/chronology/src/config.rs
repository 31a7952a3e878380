//! # Configuration
//!
//! Settings come from three layers, later ones winning:
//! 1. `chronology.toml` (or the file given with `--config`)
//! 2. Environment: `CHRONOLOGY_WORKERS`, `CHRONOLOGY_LOG_FORMAT`
//! 3. Command line flags (applied by the command itself)
//!
//! ```toml
//! [scan]
//! workers = 4      # 0 = one per available CPU
//! strict = false   # fail on records with an unknown type token
//!
//! [log]
//! format = "text"  # or "json"
//! ```

use chronology_core::ChronologyError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "chronology.toml";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scan: ScanConfig,
    pub log: LogConfig,
}

/// `[scan]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Worker count; 0 picks one per available CPU.
    pub workers: usize,
    /// Reject records whose type token is unknown.
    pub strict: bool,
}

/// `[log]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `json` selects JSON; anything else is text.
    #[must_use]
    pub fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ChronologyError> {
        toml::from_str(text).map_err(|e| ChronologyError::InvalidConfig(e.to_string()))
    }

    /// Load the config file.
    ///
    /// An explicit `path` must exist. Without one, `chronology.toml` is read
    /// if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ChronologyError> {
        let (path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(ChronologyError::InvalidConfig(format!(
                    "Config file '{}' not found",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| ChronologyError::IoError(format!("Cannot read config metadata: {}", e)))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ChronologyError::InvalidConfig(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path)
            .map_err(|e| ChronologyError::IoError(format!("Read config: {}", e)))?;
        Self::from_toml_str(&text)
    }

    /// Apply `CHRONOLOGY_*` environment overrides.
    pub fn apply_env(&mut self) -> Result<(), ChronologyError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ChronologyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(workers) = lookup("CHRONOLOGY_WORKERS") {
            self.scan.workers = workers.trim().parse().map_err(|_| {
                ChronologyError::InvalidConfig(format!(
                    "CHRONOLOGY_WORKERS must be a non-negative integer, got '{}'",
                    workers
                ))
            })?;
        }
        if let Some(format) = lookup("CHRONOLOGY_LOG_FORMAT") {
            self.log.format = LogFormat::from_env_value(&format);
        }
        Ok(())
    }
}

/// Resolve a requested worker count; 0 means one per CPU.
#[must_use]
pub fn resolve_workers(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_toml_str("").expect("parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn full_document() {
        let config = Config::from_toml_str(
            "[scan]\nworkers = 3\nstrict = true\n\n[log]\nformat = \"json\"\n",
        )
        .expect("parse");

        assert_eq!(config.scan.workers, 3);
        assert!(config.scan.strict);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn unknown_key_rejected() {
        let result = Config::from_toml_str("[scan]\nthreads = 2\n");
        assert!(matches!(result, Err(ChronologyError::InvalidConfig(_))));
    }

    #[test]
    fn env_overrides_file() {
        let mut config = Config::from_toml_str("[scan]\nworkers = 3\n").expect("parse");
        config
            .apply_overrides(|key| match key {
                "CHRONOLOGY_WORKERS" => Some("7".to_string()),
                "CHRONOLOGY_LOG_FORMAT" => Some("JSON".to_string()),
                _ => None,
            })
            .expect("overrides");

        assert_eq!(config.scan.workers, 7);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn bad_worker_env_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| {
            (key == "CHRONOLOGY_WORKERS").then(|| "many".to_string())
        });
        assert!(matches!(result, Err(ChronologyError::InvalidConfig(_))));
    }

    #[test]
    fn zero_workers_means_auto() {
        assert_eq!(resolve_workers(5), 5);
        assert!(resolve_workers(0) >= 1);
    }
}
