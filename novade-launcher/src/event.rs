//! Events consumed by the window's event loop.
//!
//! Everything that wants to change the window goes through this channel: bus
//! calls, dock updates, display changes and the presentation layer.

use tokio::sync::{mpsc, oneshot};

use crate::bus::adapter::{BusReply, BusRequest};
use crate::display::{DisplayChange, DisplayId};
use crate::types::{DockStatus, Rect};

#[derive(Debug)]
pub enum LauncherEvent {
    /// A call received on the bus. `reply` is `None` for fire-and-forget callers.
    Remote {
        request: BusRequest,
        reply: Option<oneshot::Sender<BusReply>>,
    },
    /// The surface gained or lost keyboard focus.
    ActiveChanged(bool),
    /// The windowing system asked to resize the surface.
    ResizeRequested(Rect),
    ClearImageCache,
    DisplayChanged {
        display: DisplayId,
        change: DisplayChange,
    },
    PrimaryDisplayChanged,
    Dock(DockStatus),
    Quit,
}

pub type EventSender = mpsc::UnboundedSender<LauncherEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<LauncherEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
