//! # Cutefish launcher (`novade-launcher`)
//!
//! Single-instance, full-screen application launcher. The process claims
//! `com.cutefish.Launcher` on the session bus, follows the primary display's
//! geometry, keeps clear of the dock and hides itself as soon as it loses focus.
//!
//! - [`window`]: the visibility state machine and its presentation surface.
//! - [`display`]: display registry abstraction and the primary-display tracker.
//! - [`dock`]: dock proxy, availability monitor and pinned-app queries.
//! - [`margins`]: dock geometry to screen-edge margins.
//! - [`bus`]: single-instance guard and the published launcher object.
//! - [`app`]: startup sequence and the event loop that owns the window.

pub mod app;
pub mod bus;
pub mod cli;
pub mod config;
pub mod display;
pub mod dock;
pub mod error;
pub mod event;
pub mod i18n;
pub mod margins;
pub mod observer;
pub mod types;
pub mod window;

pub use config::LauncherConfig;
pub use error::{DockError, LauncherError};
pub use event::LauncherEvent;
pub use margins::compute_margins;
pub use types::{DockDirection, DockSnapshot, DockStatus, Margins, Rect};
pub use window::{LauncherWindow, WindowNotification};
