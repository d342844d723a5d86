//! Proxy for the dock's `com.cutefish.Dock` object.
//!
//! The dock announces changes through its own argument-less signals rather than
//! `PropertiesChanged`, so proxies are built with property caching disabled and
//! every read goes to the bus.

use zbus::{dbus_proxy, CacheProperties, Connection};

use super::{DOCK_INTERFACE, DOCK_PATH, DOCK_SERVICE};
use crate::error::DockError;
use crate::types::{DockDirection, DockSnapshot, Rect};

#[dbus_proxy(
    interface = "com.cutefish.Dock",
    default_service = "com.cutefish.Dock",
    default_path = "/Dock",
    gen_blocking = false
)]
pub trait Dock {
    /// Whether `desktop` is pinned to the dock.
    #[dbus_proxy(name = "pinned")]
    fn pinned(&self, desktop: &str) -> zbus::Result<bool>;

    #[dbus_proxy(property, name = "primaryGeometry")]
    fn primary_geometry(&self) -> zbus::Result<Rect>;

    #[dbus_proxy(property, name = "direction")]
    fn direction(&self) -> zbus::Result<i32>;

    // Named apart from the properties: zbus already derives
    // `receive_<property>_changed` for each of them.
    #[dbus_proxy(signal, name = "primaryGeometryChanged")]
    fn geometry_announced(&self) -> zbus::Result<()>;

    #[dbus_proxy(signal, name = "directionChanged")]
    fn direction_announced(&self) -> zbus::Result<()>;
}

/// Builds an uncached dock proxy on `connection`.
pub async fn dock_proxy(connection: &Connection) -> Result<DockProxy<'static>, DockError> {
    build_proxy(connection).await.map_err(DockError::call("proxy"))
}

async fn build_proxy(connection: &Connection) -> zbus::Result<DockProxy<'static>> {
    DockProxy::builder(connection)
        .destination(DOCK_SERVICE)?
        .path(DOCK_PATH)?
        .interface(DOCK_INTERFACE)?
        .cache_properties(CacheProperties::No)
        .build()
        .await
}

/// Reads geometry and direction in one go.
pub async fn read_snapshot(proxy: &DockProxy<'_>) -> Result<DockSnapshot, DockError> {
    let geometry = proxy
        .primary_geometry()
        .await
        .map_err(DockError::call("primaryGeometry"))?;
    let direction = proxy.direction().await.map_err(DockError::call("direction"))?;

    Ok(DockSnapshot {
        geometry,
        direction: DockDirection::from(direction),
    })
}
