//! Launcher configuration, read from `~/.config/cutefish-launcher/config.toml`.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [launcher]
//! translations_dir = "/usr/share/cutefish-launcher/translations"
//! image_cache_limit_kb = 2048
//!
//! [[displays]]
//! name = "eDP-1"
//! width = 1920
//! height = 1080
//! primary = true
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use novade_core::utils::paths;
use novade_core::{ConfigError, ConfigLoader, CoreError, LoggingConfig};

use crate::types::Rect;

/// Name used for the configuration and state directories and the text domain.
pub const APP_NAME: &str = "cutefish-launcher";
pub const CONFIG_FILE_NAME: &str = "config.toml";

fn default_translations_dir() -> PathBuf {
    PathBuf::from("/usr/share/cutefish-launcher/translations")
}

fn default_image_cache_limit_kb() -> u32 {
    2048
}

fn default_displays() -> Vec<DisplaySeed> {
    vec![DisplaySeed::new("default", Rect::new(0, 0, 1920, 1080), true)]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherSection {
    #[serde(default = "default_translations_dir")]
    pub translations_dir: PathBuf,
    /// Budget for decoded icon images, in KiB.
    #[serde(default = "default_image_cache_limit_kb")]
    pub image_cache_limit_kb: u32,
}

impl Default for LauncherSection {
    fn default() -> Self {
        Self {
            translations_dir: default_translations_dir(),
            image_cache_limit_kb: default_image_cache_limit_kb(),
        }
    }
}

/// One display of the virtual display registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplaySeed {
    pub name: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub primary: bool,
}

impl DisplaySeed {
    pub fn new(name: &str, geometry: Rect, primary: bool) -> Self {
        Self {
            name: name.to_string(),
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            primary,
        }
    }

    pub fn geometry(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub launcher: LauncherSection,
    #[serde(default = "default_displays")]
    pub displays: Vec<DisplaySeed>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            launcher: LauncherSection::default(),
            displays: default_displays(),
        }
    }
}

impl LauncherConfig {
    /// Loads and validates the configuration.
    ///
    /// An explicit `path` must exist. Without one the per-user file is used if
    /// present, and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let mut config = match path {
            Some(path) => ConfigLoader::read_required::<LauncherConfig>(path)?,
            None => match default_config_path() {
                Some(path) => ConfigLoader::read::<LauncherConfig>(&path)?.unwrap_or_default(),
                None => LauncherConfig::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&mut self) -> Result<(), CoreError> {
        self.logging.validate(APP_NAME)?;

        if self.launcher.image_cache_limit_kb == 0 {
            return Err(invalid(
                "launcher.image_cache_limit_kb must be greater than zero".to_string(),
            ));
        }
        if self.displays.is_empty() {
            return Err(invalid("at least one [[displays]] entry is required".to_string()));
        }

        let mut names = HashSet::new();
        for display in &self.displays {
            if display.width <= 0 || display.height <= 0 {
                return Err(invalid(format!(
                    "display '{}' has non-positive size {}x{}",
                    display.name, display.width, display.height
                )));
            }
            if !names.insert(display.name.as_str()) {
                return Err(invalid(format!("display '{}' is listed twice", display.name)));
            }
        }

        let primaries = self.displays.iter().filter(|d| d.primary).count();
        if primaries > 1 {
            return Err(invalid(format!(
                "{} displays are marked primary, expected at most one",
                primaries
            )));
        }

        debug!(displays = self.displays.len(), "Launcher configuration validated");
        Ok(())
    }
}

fn invalid(message: String) -> CoreError {
    ConfigError::ValidationError(message).into()
}

fn default_config_path() -> Option<PathBuf> {
    match paths::app_config_dir(APP_NAME) {
        Ok(dir) => Some(dir.join(CONFIG_FILE_NAME)),
        Err(e) => {
            warn!(error = %e, "No configuration directory, using defaults");
            None
        }
    }
}
