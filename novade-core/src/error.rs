//! Error handling for the NovaDE core layer.
//!
//! [`CoreError`] is the error returned by everything in this crate. It wraps the
//! more specific [`ConfigError`] and [`LoggingError`] so callers can match on the
//! failing subsystem while still propagating a single type with `?`.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for NovaDE shell components.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised while installing the global `tracing` subscriber.
    #[error("Logging Error: {0}")]
    Logging(#[from] LoggingError),

    /// Filesystem operations outside of configuration reading, such as creating
    /// the directory that will hold a log file.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for configuration-related operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or does not match the schema.
    #[error("Failed to parse configuration file {path:?}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration parsed but holds values the component cannot use.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found at expected locations: {locations:?}")]
    NotFound { locations: Vec<PathBuf> },

    /// A required base directory (e.g. XDG config/state home) could not be determined.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}

/// Error type for logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level string is not one of trace, debug, info, warn, error.
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// A global subscriber is already installed, or the registry refused the layers.
    #[error("Failed to initialize logging: {0}")]
    InitializationFailure(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn config_error_is_reachable_through_core_error_source() {
        let core_err: CoreError = ConfigError::ValidationError("no displays".to_string()).into();

        assert_eq!(
            core_err.to_string(),
            "Configuration Error: Configuration validation failed: no displays"
        );
        match core_err.source().and_then(|s| s.downcast_ref::<ConfigError>()) {
            Some(ConfigError::ValidationError(msg)) => assert_eq!(msg, "no displays"),
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn logging_error_converts_into_core_error() {
        let core_err: CoreError = LoggingError::InvalidLevel("loud".to_string()).into();
        assert_eq!(core_err.to_string(), "Logging Error: Invalid log level: loud");
    }

    #[test]
    fn filesystem_error_keeps_io_source() {
        let path = PathBuf::from("/var/log/launcher");
        let core_err = CoreError::Filesystem {
            message: "Failed to create directory".to_string(),
            path: path.clone(),
            source: IoError::new(ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(
            core_err.to_string(),
            format!("Filesystem Error: Failed to create directory (Path: {:?})", path)
        );
        let source = core_err.source().and_then(|s| s.downcast_ref::<IoError>());
        assert_eq!(source.map(IoError::kind), Some(ErrorKind::PermissionDenied));
    }

    #[test]
    fn parse_error_names_the_file() {
        let source = toml::from_str::<toml::Value>("this is not toml").unwrap_err();
        let err = ConfigError::ParseError {
            path: PathBuf::from("/etc/launcher.toml"),
            source,
        };

        assert!(err
            .to_string()
            .starts_with("Failed to parse configuration file \"/etc/launcher.toml\""));
        assert!(err.source().unwrap().is::<toml::de::Error>());
    }

    #[test]
    fn not_found_lists_locations() {
        let locations = vec![PathBuf::from("/a.toml"), PathBuf::from("/b.toml")];
        let err = ConfigError::NotFound { locations: locations.clone() };
        assert_eq!(
            err.to_string(),
            format!("Configuration file not found at expected locations: {:?}", locations)
        );
    }
}
