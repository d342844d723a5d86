//! Session-bus surface of the launcher: the single-instance claim, the published
//! `com.cutefish.Launcher` object and the table mapping its members onto the window.

pub mod adapter;
pub mod instance;
pub mod service;

pub use adapter::{dispatch, BusReply, BusRequest, LauncherControl};
pub use instance::{InstanceBus, InstanceGuard, InstanceOutcome, SessionInstanceBus};
pub use service::{forward_notifications, publish, LauncherService};

pub const LAUNCHER_SERVICE: &str = "com.cutefish.Launcher";
pub const LAUNCHER_PATH: &str = "/Launcher";
pub const LAUNCHER_INTERFACE: &str = "com.cutefish.Launcher";
