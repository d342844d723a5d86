//! General utilities for NovaDE Core.
//!
//! - [`fs`]: filesystem helpers mapped onto [`crate::error::CoreError`].
//! - [`paths`]: XDG base directory and per-application path resolution.

pub mod fs;
pub mod paths;

pub use fs::ensure_dir_exists;
