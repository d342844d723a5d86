//! The `com.cutefish.Launcher` object published at `/Launcher`.
//!
//! [`LauncherService`] owns no window state. Each call becomes a
//! [`LauncherEvent::Remote`] with a oneshot reply and waits for the window's event
//! loop to answer. `isPinnedDock` is the exception: it asks the dock directly.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use zbus::{dbus_interface, fdo, Connection};

use super::adapter::{BusReply, BusRequest};
use super::LAUNCHER_PATH;
use crate::dock::{is_pinned_dock, DockEndpoint};
use crate::error::LauncherError;
use crate::event::{EventSender, LauncherEvent};
use crate::types::Rect;
use crate::window::WindowNotification;

#[derive(Clone)]
pub struct LauncherService {
    events: EventSender,
    dock: Arc<dyn DockEndpoint>,
}

impl LauncherService {
    pub fn new(events: EventSender, dock: Arc<dyn DockEndpoint>) -> Self {
        Self { events, dock }
    }

    async fn request(&self, request: BusRequest) -> Result<BusReply, LauncherError> {
        let (reply, response) = oneshot::channel();
        self.events
            .send(LauncherEvent::Remote {
                request,
                reply: Some(reply),
            })
            .map_err(|_| LauncherError::EventLoopClosed)?;
        response.await.map_err(|_| LauncherError::EventLoopClosed)
    }

    async fn call(&self, request: BusRequest) -> fdo::Result<()> {
        debug!(member = request.member(), "Launcher method called");
        self.request(request)
            .await
            .map(|_| ())
            .map_err(|e| fdo::Error::Failed(e.to_string()))
    }

    async fn int_property(&self, request: BusRequest) -> i32 {
        match self.request(request).await {
            Ok(BusReply::Int(value)) => value,
            other => {
                warn!(member = request.member(), ?other, "Unexpected property reply");
                0
            }
        }
    }

    async fn bool_property(&self, request: BusRequest) -> bool {
        match self.request(request).await {
            Ok(BusReply::Bool(value)) => value,
            other => {
                warn!(member = request.member(), ?other, "Unexpected property reply");
                false
            }
        }
    }
}

#[dbus_interface(name = "com.cutefish.Launcher")]
impl LauncherService {
    #[dbus_interface(name = "toggle")]
    async fn toggle(&self) -> fdo::Result<()> {
        self.call(BusRequest::Toggle).await
    }

    #[dbus_interface(name = "show")]
    async fn show(&self) -> fdo::Result<()> {
        self.call(BusRequest::Show).await
    }

    #[dbus_interface(name = "hide")]
    async fn hide(&self) -> fdo::Result<()> {
        self.call(BusRequest::Hide).await
    }

    #[dbus_interface(name = "isPinnedDock")]
    async fn is_pinned_dock(&self, desktop_id: &str) -> bool {
        debug!(desktop_id, "Pinned query");
        is_pinned_dock(self.dock.as_ref(), desktop_id).await
    }

    #[dbus_interface(property, name = "leftMargin")]
    async fn left_margin(&self) -> i32 {
        self.int_property(BusRequest::LeftMargin).await
    }

    #[dbus_interface(property, name = "rightMargin")]
    async fn right_margin(&self) -> i32 {
        self.int_property(BusRequest::RightMargin).await
    }

    #[dbus_interface(property, name = "bottomMargin")]
    async fn bottom_margin(&self) -> i32 {
        self.int_property(BusRequest::BottomMargin).await
    }

    #[dbus_interface(property, name = "screenRect")]
    async fn screen_rect(&self) -> Rect {
        match self.request(BusRequest::ScreenRect).await {
            Ok(BusReply::Rect(rect)) => rect,
            other => {
                warn!(?other, "Unexpected screenRect reply");
                Rect::default()
            }
        }
    }

    #[dbus_interface(property, name = "showed")]
    async fn showed(&self) -> bool {
        self.bool_property(BusRequest::Showed).await
    }

    #[dbus_interface(property, name = "dockAvailable")]
    async fn dock_available(&self) -> bool {
        self.bool_property(BusRequest::DockAvailable).await
    }
}

/// Publishes `service` at `/Launcher`.
pub async fn publish(
    connection: &Connection,
    service: LauncherService,
) -> Result<(), LauncherError> {
    let publish_error = |source| LauncherError::Publish {
        path: LAUNCHER_PATH.to_string(),
        interface: super::LAUNCHER_INTERFACE.to_string(),
        source,
    };

    let added = connection
        .object_server()
        .at(LAUNCHER_PATH, service)
        .await
        .map_err(|e| publish_error(Some(e)))?;
    if !added {
        return Err(publish_error(None));
    }
    Ok(())
}

/// Turns window notifications into `PropertiesChanged` signals on the published
/// object. Runs until the window drops its sender.
pub async fn forward_notifications(
    connection: Connection,
    mut notifications: mpsc::UnboundedReceiver<WindowNotification>,
) -> Result<(), LauncherError> {
    let iface_ref = connection
        .object_server()
        .interface::<_, LauncherService>(LAUNCHER_PATH)
        .await?;
    let ctxt = iface_ref.signal_context();

    while let Some(notification) = notifications.recv().await {
        let iface = iface_ref.get().await;
        let result = match notification {
            WindowNotification::ShowedChanged(_) => iface.showed_changed(ctxt).await,
            WindowNotification::ScreenRectChanged(_) => iface.screen_rect_changed(ctxt).await,
            WindowNotification::DockAvailabilityChanged(_) => {
                iface.dock_available_changed(ctxt).await
            }
            WindowNotification::MarginsChanged(_) => {
                let left = iface.left_margin_changed(ctxt).await;
                let right = iface.right_margin_changed(ctxt).await;
                let bottom = iface.bottom_margin_changed(ctxt).await;
                left.and(right).and(bottom)
            }
        };
        if let Err(e) = result {
            warn!(?notification, error = %e, "Failed to emit property change");
        }
    }
    debug!("Window notifications closed, stopping signal forwarding");
    Ok(())
}
