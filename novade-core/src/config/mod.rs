//! Configuration Management for NovaDE Core.
//!
//! Components own their configuration schema; this module provides the pieces
//! they share:
//!
//! - [`types`]: the [`LoggingConfig`] section every component embeds.
//! - [`defaults`]: default value functions used by `serde(default = ...)`.
//! - [`loader`]: [`ConfigLoader`], which reads a TOML file into any
//!   deserializable type and treats a missing file as "use defaults".
//!
//! # Examples
//!
//! ```rust,ignore
//! use novade_core::config::{ConfigLoader, LoggingConfig};
//!
//! #[derive(serde::Deserialize, Default)]
//! struct PanelConfig {
//!     #[serde(default)]
//!     logging: LoggingConfig,
//! }
//!
//! let mut config: PanelConfig = ConfigLoader::read(path)?.unwrap_or_default();
//! config.logging.validate("novade-panel")?;
//! ```

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::LoggingConfig;
