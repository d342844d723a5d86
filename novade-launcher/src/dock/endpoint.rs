use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use tracing::{debug, warn};
use zbus::fdo::DBusProxy;
use zbus::names::BusName;
use zbus::Connection;

use super::proxy::{dock_proxy, read_snapshot};
use super::DOCK_SERVICE;
use crate::error::DockError;
use crate::types::{DockSnapshot, DockStatus};

/// Request/response access to the dock.
#[async_trait]
pub trait DockEndpoint: Send + Sync {
    /// Whether somebody currently owns the dock's bus name.
    async fn is_available(&self) -> bool;

    async fn snapshot(&self) -> Result<DockSnapshot, DockError>;

    async fn pinned(&self, desktop_id: &str) -> Result<bool, DockError>;
}

/// Where the dock's comings, goings and change announcements come from.
#[async_trait]
pub trait DockWatch: Send + Sync {
    /// Ownership changes of the dock's bus name: `true` when the dock registers,
    /// `false` when it leaves.
    async fn owner_changes(&self) -> Result<BoxStream<'static, bool>, DockError>;

    /// One item per `primaryGeometryChanged` or `directionChanged` signal of the
    /// dock currently on the bus.
    async fn announcements(&self) -> Result<BoxStream<'static, ()>, DockError>;
}

/// The dock on the session bus. Builds a fresh proxy for every call.
#[derive(Debug, Clone)]
pub struct SessionDock {
    connection: Connection,
}

impl SessionDock {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    async fn name_has_owner(&self) -> zbus::Result<bool> {
        let dbus = DBusProxy::new(&self.connection).await?;
        dbus.name_has_owner(BusName::try_from(DOCK_SERVICE)?).await.map_err(Into::into)
    }
}

#[async_trait]
impl DockEndpoint for SessionDock {
    async fn is_available(&self) -> bool {
        match self.name_has_owner().await {
            Ok(owned) => owned,
            Err(e) => {
                debug!(error = %e, "NameHasOwner failed, treating dock as absent");
                false
            }
        }
    }

    async fn snapshot(&self) -> Result<DockSnapshot, DockError> {
        let proxy = dock_proxy(&self.connection).await?;
        read_snapshot(&proxy).await
    }

    async fn pinned(&self, desktop_id: &str) -> Result<bool, DockError> {
        if !self.is_available().await {
            return Err(DockError::Unavailable);
        }
        let proxy = dock_proxy(&self.connection).await?;
        proxy.pinned(desktop_id).await.map_err(DockError::call("pinned"))
    }
}

#[async_trait]
impl DockWatch for SessionDock {
    async fn owner_changes(&self) -> Result<BoxStream<'static, bool>, DockError> {
        let dbus = DBusProxy::new(&self.connection)
            .await
            .map_err(DockError::call("DBusProxy"))?;
        let changes = dbus
            .receive_name_owner_changed_with_args(&[(0, DOCK_SERVICE)])
            .await
            .map_err(DockError::call("NameOwnerChanged"))?;

        Ok(changes
            .filter_map(|change| async move {
                match change.args() {
                    Ok(args) if args.name().as_str() == DOCK_SERVICE => {
                        Some(args.new_owner().is_some())
                    }
                    Ok(_) => None,
                    Err(e) => {
                        debug!(error = %e, "Malformed NameOwnerChanged signal");
                        None
                    }
                }
            })
            .boxed())
    }

    async fn announcements(&self) -> Result<BoxStream<'static, ()>, DockError> {
        let proxy = dock_proxy(&self.connection).await?;
        let geometry = proxy
            .receive_geometry_announced()
            .await
            .map_err(DockError::call("primaryGeometryChanged"))?;
        let direction = proxy
            .receive_direction_announced()
            .await
            .map_err(DockError::call("directionChanged"))?;

        Ok(stream::select(geometry.map(|_| ()), direction.map(|_| ())).boxed())
    }
}

/// Whether `desktop_id` is pinned to the dock. An absent dock or a failed call
/// answers `false`.
pub async fn is_pinned_dock(endpoint: &dyn DockEndpoint, desktop_id: &str) -> bool {
    match endpoint.pinned(desktop_id).await {
        Ok(pinned) => pinned,
        Err(DockError::Unavailable) => false,
        Err(e) => {
            debug!(desktop_id, error = %e, "Dock pinned query failed");
            false
        }
    }
}

/// Reads the dock's status. `Err` means the dock owns its name but did not
/// answer.
pub async fn query_status(endpoint: &dyn DockEndpoint) -> Result<DockStatus, DockError> {
    if !endpoint.is_available().await {
        return Ok(DockStatus::Unavailable);
    }
    match endpoint.snapshot().await {
        Ok(snapshot) => {
            debug!(
                geometry = %snapshot.geometry,
                direction = snapshot.direction.raw(),
                "Dock snapshot read"
            );
            Ok(DockStatus::Available(snapshot))
        }
        Err(DockError::Unavailable) => Ok(DockStatus::Unavailable),
        Err(e) => Err(e),
    }
}

/// Current dock status as the window should see it.
///
/// A dock that owns its name but fails to answer is still reported available,
/// with an empty snapshot that reserves no space.
pub async fn current_status(endpoint: &dyn DockEndpoint) -> DockStatus {
    query_status(endpoint).await.unwrap_or_else(|e| {
        warn!(error = %e, "Dock is present but its geometry could not be read");
        DockStatus::Available(DockSnapshot::default())
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{DockDirection, Rect};
    use parking_lot::Mutex;
    use std::collections::HashSet;

    /// In-memory dock. `None` means the dock owns no name.
    #[derive(Debug, Default)]
    pub(crate) struct FakeDock {
        pub snapshot: Mutex<Option<DockSnapshot>>,
        pub pinned: Mutex<HashSet<String>>,
        pub broken: Mutex<bool>,
    }

    impl FakeDock {
        pub fn present(snapshot: DockSnapshot) -> Self {
            let dock = Self::default();
            *dock.snapshot.lock() = Some(snapshot);
            dock
        }
    }

    #[async_trait]
    impl DockEndpoint for FakeDock {
        async fn is_available(&self) -> bool {
            self.snapshot.lock().is_some()
        }

        async fn snapshot(&self) -> Result<DockSnapshot, DockError> {
            if *self.broken.lock() {
                return Err(DockError::call("primaryGeometry")(zbus::Error::Unsupported));
            }
            (*self.snapshot.lock()).ok_or(DockError::Unavailable)
        }

        async fn pinned(&self, desktop_id: &str) -> Result<bool, DockError> {
            if self.snapshot.lock().is_none() {
                return Err(DockError::Unavailable);
            }
            if *self.broken.lock() {
                return Err(DockError::call("pinned")(zbus::Error::Unsupported));
            }
            Ok(self.pinned.lock().contains(desktop_id))
        }
    }

    fn bottom_dock() -> DockSnapshot {
        DockSnapshot {
            geometry: Rect::new(0, 1040, 1920, 40),
            direction: DockDirection::Bottom,
        }
    }

    #[tokio::test]
    async fn pinned_is_false_without_a_dock() {
        let dock = FakeDock::default();
        assert!(!is_pinned_dock(&dock, "app.desktop").await);
    }

    #[tokio::test]
    async fn pinned_reflects_the_dock_answer() {
        let dock = FakeDock::present(bottom_dock());
        dock.pinned.lock().insert("org.cutefish.Files.desktop".to_string());

        assert!(is_pinned_dock(&dock, "org.cutefish.Files.desktop").await);
        assert!(!is_pinned_dock(&dock, "app.desktop").await);
    }

    #[tokio::test]
    async fn pinned_is_false_when_the_call_fails() {
        let dock = FakeDock::present(bottom_dock());
        dock.pinned.lock().insert("app.desktop".to_string());
        *dock.broken.lock() = true;

        assert!(!is_pinned_dock(&dock, "app.desktop").await);
    }

    #[tokio::test]
    async fn status_follows_dock_presence() {
        let dock = FakeDock::default();
        assert_eq!(current_status(&dock).await, DockStatus::Unavailable);

        *dock.snapshot.lock() = Some(bottom_dock());
        assert_eq!(current_status(&dock).await, DockStatus::Available(bottom_dock()));
    }

    #[tokio::test]
    async fn query_separates_an_unreadable_dock_from_an_absent_one() {
        let dock = FakeDock::present(bottom_dock());
        *dock.broken.lock() = true;
        assert!(matches!(query_status(&dock).await, Err(DockError::Call { .. })));

        *dock.snapshot.lock() = None;
        assert_eq!(query_status(&dock).await.unwrap(), DockStatus::Unavailable);
    }

    #[tokio::test]
    async fn unreadable_dock_is_available_with_no_margins() {
        let dock = FakeDock::present(bottom_dock());
        *dock.broken.lock() = true;

        assert_eq!(
            current_status(&dock).await,
            DockStatus::Available(DockSnapshot::default())
        );
    }
}
