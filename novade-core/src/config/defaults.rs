//! Default configuration values shared by NovaDE components.
//!
//! Used through `serde`'s `default` attribute so that a partial configuration file
//! only has to mention the values it changes.

use std::path::PathBuf;

/// Returns the default log level string (`"info"`).
pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

/// Returns the default log file path (`None`, console only).
pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None
}

/// Returns the default log format string (`"text"`).
pub(crate) fn default_log_format() -> String {
    "text".to_string()
}
