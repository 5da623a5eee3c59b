//! Runtime configuration for the tracker core.
//!
//! # Responsibility
//! - Collect log level, log directory and icon catalog in one value.
//! - Read overrides from the process environment.
//!
//! # Invariants
//! - `log_level` always holds a normalized level name.
//! - Blank environment values fall back to defaults.

use crate::logging::{default_log_level, init_logging, normalize_level};
use crate::model::icon::IconCatalog;
use std::path::PathBuf;

/// Environment variable that overrides the log level.
pub const LOG_LEVEL_ENV: &str = "HABITRACK_LOG_LEVEL";
/// Environment variable that selects a log directory (stderr when unset).
pub const LOG_DIR_ENV: &str = "HABITRACK_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
    pub icons: IconCatalog,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            icons: IconCatalog::builtin(),
        }
    }
}

impl TrackerConfig {
    /// Reads `HABITRACK_LOG_LEVEL` and `HABITRACK_LOG_DIR`.
    ///
    /// # Errors
    /// - Returns an error for an unsupported log level.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = non_blank(lookup(LOG_LEVEL_ENV)) {
            config.log_level = normalize_level(&level)?;
        }
        config.log_dir = non_blank(lookup(LOG_DIR_ENV)).map(PathBuf::from);

        Ok(config)
    }

    pub fn with_icons(mut self, icons: IconCatalog) -> Self {
        self.icons = icons;
        self
    }

    /// Starts logging with this config's level and directory.
    pub fn init_logging(&self) -> Result<(), String> {
        init_logging(self.log_level, self.log_dir.as_deref())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{TrackerConfig, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::model::icon::IconCatalog;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = TrackerConfig::from_lookup(lookup_from(&[])).expect("defaults are valid");
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.log_dir, None);
        assert_eq!(config.icons, IconCatalog::builtin());
    }

    #[test]
    fn reads_level_and_directory_overrides() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            (LOG_LEVEL_ENV, " Warning "),
            (LOG_DIR_ENV, "/var/log/habitrack"),
        ]))
        .expect("overrides are valid");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/habitrack")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            (LOG_LEVEL_ENV, "   "),
            (LOG_DIR_ENV, ""),
        ]))
        .expect("blank values fall back");
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = TrackerConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")]))
            .expect_err("unknown level");
        assert!(err.contains("unsupported log level"));
    }
}
