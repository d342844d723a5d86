//! Client side of the companion dock process.

pub mod endpoint;
pub mod monitor;
pub mod proxy;

pub use endpoint::{
    current_status, is_pinned_dock, query_status, DockEndpoint, DockWatch, SessionDock,
};
pub use monitor::{DockMonitor, SNAPSHOT_RETRY_DELAY};
pub use proxy::DockProxy;

pub const DOCK_SERVICE: &str = "com.cutefish.Dock";
pub const DOCK_PATH: &str = "/Dock";
pub const DOCK_INTERFACE: &str = "com.cutefish.Dock";
