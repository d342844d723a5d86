//! Configuration Loading for NovaDE components.
//!
//! [`ConfigLoader`] turns a TOML file into a component configuration. A missing
//! file is not an error at this level: it yields `None` and the caller falls back
//! to its defaults. Validation stays with the component, which knows its schema.

use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ConfigError;

/// Namespace for configuration file reading.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads and parses `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist or contains only whitespace.
    pub fn read<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No configuration file, using defaults");
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Self::parse(path, &content).map(Some)
    }

    /// Reads `path`, failing with [`ConfigError::NotFound`] if it is absent.
    ///
    /// Used for files named explicitly on the command line.
    pub fn read_required<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                locations: vec![path.to_path_buf()],
            });
        }
        Ok(Self::read(path)?.unwrap_or_default())
    }

    fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        logging: LoggingConfig,
        #[serde(default)]
        name: String,
    }

    #[test]
    fn missing_file_yields_none() {
        let temp = TempDir::new().unwrap();
        let loaded: Option<Sample> = ConfigLoader::read(&temp.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn blank_file_yields_none() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blank.toml");
        fs::write(&path, "  \n").unwrap();
        assert!(ConfigLoader::read::<Sample>(&path).unwrap().is_none());
    }

    #[test]
    fn parses_nested_sections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "name = \"panel\"\n[logging]\nlevel = \"debug\"\n").unwrap();

        let loaded: Sample = ConfigLoader::read(&path).unwrap().unwrap();
        assert_eq!(loaded.name, "panel");
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn parse_failure_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.toml");
        fs::write(&path, "name = ").unwrap();

        match ConfigLoader::read::<Sample>(&path) {
            Err(ConfigError::ParseError { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn required_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        match ConfigLoader::read_required::<Sample>(&path) {
            Err(ConfigError::NotFound { locations }) => assert_eq!(locations, vec![path]),
            other => panic!("expected not found, got {:?}", other),
        }
    }
}
