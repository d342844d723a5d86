//! Shared configuration sections.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults;
use crate::error::{ConfigError, CoreError};
use crate::utils::{fs as nova_fs, paths};

/// Log levels accepted in the `level` field, lowest first.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration settings for the logging subsystem.
///
/// ```
/// use novade_core::config::LoggingConfig;
///
/// let log_config: LoggingConfig = toml::from_str(r#"
/// level = "debug"
/// format = "json"
/// "#).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level to record: trace, debug, info, warn or error (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths resolve against the component's XDG state
    /// directory during [`LoggingConfig::validate`].
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// `text` or `json`.
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_log_level(),
            file_path: defaults::default_log_file_path(),
            format: defaults::default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Normalizes level and format, then resolves and prepares the log file path.
    ///
    /// `app` names the state directory a relative `file_path` is resolved against.
    pub fn validate(&mut self, app: &str) -> Result<(), CoreError> {
        let level = self.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                self.level
            ))
            .into());
        }
        self.level = level;

        let format = self.format.to_lowercase();
        if format != "text" && format != "json" {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log format: '{}'. Must be one of text, json.",
                self.format
            ))
            .into());
        }
        self.format = format;

        if let Some(path) = self.file_path.take() {
            let absolute = if path.is_absolute() {
                path
            } else {
                paths::app_state_dir(app)?.join(path)
            };
            nova_fs::ensure_parent_exists(&absolute)?;
            self.file_path = Some(absolute);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_console_text_at_info() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.file_path, None);
        assert_eq!(config.format, "text");
    }

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let config: LoggingConfig = serde_json::from_str(r#"{"level": "warn"}"#).unwrap();
        assert_eq!(
            config,
            LoggingConfig {
                level: "warn".to_string(),
                ..LoggingConfig::default()
            }
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = toml::from_str::<LoggingConfig>("level = \"info\"\ncolour = true");
        assert!(result.is_err());
    }

    #[test]
    fn validate_normalizes_case() {
        let mut config = LoggingConfig {
            level: "DEBUG".to_string(),
            file_path: None,
            format: "Json".to_string(),
        };
        config.validate("novade-test").unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, "json");
    }

    #[test]
    fn validate_rejects_unknown_level() {
        let mut config = LoggingConfig {
            level: "verbose".to_string(),
            ..LoggingConfig::default()
        };
        match config.validate("novade-test") {
            Err(CoreError::Config(ConfigError::ValidationError(msg))) => {
                assert!(msg.contains("verbose"))
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_unknown_format() {
        let mut config = LoggingConfig {
            format: "xml".to_string(),
            ..LoggingConfig::default()
        };
        assert!(config.validate("novade-test").is_err());
    }

    #[test]
    fn validate_creates_parent_of_absolute_log_file() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("logs").join("launcher.log");
        let mut config = LoggingConfig {
            file_path: Some(log.clone()),
            ..LoggingConfig::default()
        };

        config.validate("novade-test").unwrap();
        assert_eq!(config.file_path, Some(log));
        assert!(temp.path().join("logs").is_dir());
    }
}
