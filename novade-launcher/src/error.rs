//! Error types of the launcher.
//!
//! Only [`LauncherError`] reaches `main`; [`DockError`] is absorbed by the dock
//! monitor and endpoint, which degrade to "no dock" instead of failing.

use novade_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LauncherError {
    /// Configuration, logging or filesystem setup failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The session bus could not be reached, or a call on it failed.
    #[error("D-Bus error: {0}")]
    Bus(#[from] zbus::Error),

    /// `RequestName` failed for a reason other than the name being taken.
    #[error("Failed to request bus name {name}: {source}")]
    NameRequest {
        name: String,
        #[source]
        source: zbus::Error,
    },

    /// The launcher object could not be registered at its path.
    #[error("Failed to publish {interface} at {path}")]
    Publish {
        path: String,
        interface: String,
        #[source]
        source: Option<zbus::Error>,
    },

    /// The window's event loop is gone.
    #[error("Launcher event loop is not running")]
    EventLoopClosed,
}

#[derive(Debug, Error)]
pub enum DockError {
    /// Nobody owns `com.cutefish.Dock`.
    #[error("Dock service is not available")]
    Unavailable,

    /// A property read or method call on the dock failed.
    #[error("Dock call {member} failed: {source}")]
    Call {
        member: &'static str,
        #[source]
        source: zbus::Error,
    },
}

impl DockError {
    pub(crate) fn call(member: &'static str) -> impl FnOnce(zbus::Error) -> DockError {
        move |source| DockError::Call { member, source }
    }
}
