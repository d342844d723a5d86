//! XDG Base Directory and Application-Specific Path Resolution.
//!
//! Built on `directories-next`. Application directories are the XDG base directory
//! joined with the component's own name, e.g. `~/.config/cutefish-launcher`, which
//! matches where the rest of the desktop keeps per-component files.

use crate::error::{ConfigError, CoreError};
use directories_next::BaseDirs;
use std::path::PathBuf;

fn base_dirs(dir_type: &str) -> Result<BaseDirs, CoreError> {
    BaseDirs::new().ok_or_else(|| {
        CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: dir_type.to_string(),
        })
    })
}

/// Returns `$XDG_CONFIG_HOME` (usually `~/.config`).
pub fn config_base_dir() -> Result<PathBuf, CoreError> {
    base_dirs("Config Base").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns `$XDG_STATE_HOME` (usually `~/.local/state`).
///
/// An absolute `$XDG_STATE_HOME` wins; otherwise `~/.local/state` per the XDG
/// base directory defaults.
pub fn state_base_dir() -> Result<PathBuf, CoreError> {
    if let Some(dir) = std::env::var_os("XDG_STATE_HOME").map(PathBuf::from) {
        if dir.is_absolute() {
            return Ok(dir);
        }
    }
    base_dirs("State Base").map(|dirs| dirs.home_dir().join(".local").join("state"))
}

/// Returns the configuration directory of `app`, e.g. `~/.config/cutefish-launcher`.
pub fn app_config_dir(app: &str) -> Result<PathBuf, CoreError> {
    config_base_dir().map(|base| base.join(app))
}

/// Returns the state directory of `app`, used for log files.
pub fn app_state_dir(app: &str) -> Result<PathBuf, CoreError> {
    state_base_dir().map(|base| base.join(app))
}
