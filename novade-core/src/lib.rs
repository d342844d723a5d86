//! # NovaDE Core Library (`novade-core`)
//!
//! `novade-core` holds the infrastructure every NovaDE shell component needs before
//! it can do anything useful:
//!
//! - **Error Handling**: [`CoreError`] with the more specific [`ConfigError`] and
//!   [`LoggingError`].
//! - **Configuration**: the shared [`LoggingConfig`] section and [`ConfigLoader`],
//!   which reads a TOML file into any component-specific configuration type.
//! - **Logging**: a `tracing` subscriber with console output and an optional daily
//!   rolled log file.
//! - **Utilities**: XDG directory resolution and small filesystem helpers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use novade_core::config::{ConfigLoader, LoggingConfig};
//! use novade_core::logging::init_logging;
//!
//! #[derive(serde::Deserialize, Default)]
//! struct MyConfig {
//!     #[serde(default)]
//!     logging: LoggingConfig,
//! }
//!
//! fn main() -> Result<(), novade_core::CoreError> {
//!     let path = novade_core::utils::paths::app_config_dir("my-component")?.join("config.toml");
//!     let config: MyConfig = ConfigLoader::read(&path)?.unwrap_or_default();
//!     init_logging(&config.logging, None)?;
//!     tracing::info!("component started");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

pub use config::{ConfigLoader, LoggingConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
