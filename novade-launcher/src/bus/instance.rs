//! Single-instance coordination through the `com.cutefish.Launcher` bus name.
//!
//! The first process to claim the name becomes the launcher. Every later process
//! asks the owner to `toggle()` and exits with status `-1`.

use async_trait::async_trait;
use tracing::{debug, info};
use zbus::{dbus_proxy, CacheProperties, Connection};

use super::LAUNCHER_SERVICE;
use crate::error::LauncherError;

#[dbus_proxy(
    interface = "com.cutefish.Launcher",
    default_service = "com.cutefish.Launcher",
    default_path = "/Launcher",
    gen_blocking = false
)]
trait RunningLauncher {
    #[dbus_proxy(name = "toggle")]
    fn toggle(&self) -> zbus::Result<()>;
}

/// The two bus operations the guard needs.
#[async_trait]
pub trait InstanceBus: Send + Sync {
    /// Claims `name` without queueing. `Ok(false)` means another connection owns it.
    async fn claim(&self, name: &str) -> Result<bool, LauncherError>;

    /// Calls `toggle()` on the current owner of `name`.
    async fn forward_toggle(&self, name: &str) -> Result<(), LauncherError>;
}

#[derive(Debug, Clone)]
pub struct SessionInstanceBus {
    connection: Connection,
}

impl SessionInstanceBus {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl InstanceBus for SessionInstanceBus {
    async fn claim(&self, name: &str) -> Result<bool, LauncherError> {
        match self.connection.request_name(name).await {
            Ok(()) => Ok(true),
            Err(zbus::Error::NameTaken) => Ok(false),
            Err(source) => Err(LauncherError::NameRequest {
                name: name.to_string(),
                source,
            }),
        }
    }

    async fn forward_toggle(&self, name: &str) -> Result<(), LauncherError> {
        let proxy = RunningLauncherProxy::builder(&self.connection)
            .destination(name)?
            .cache_properties(CacheProperties::No)
            .build()
            .await?;
        proxy.toggle().await?;
        Ok(())
    }
}

/// Proof that this process owns the launcher name. Held for the process lifetime.
#[derive(Debug)]
#[must_use]
pub struct InstanceGuard {
    name: &'static str,
}

#[derive(Debug)]
pub enum InstanceOutcome {
    /// This process is the launcher.
    Primary(InstanceGuard),
    /// Another launcher was running and has been asked to toggle.
    Forwarded,
}

impl InstanceOutcome {
    /// Process exit status for a run that ends with this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            InstanceOutcome::Primary(_) => 0,
            InstanceOutcome::Forwarded => -1,
        }
    }
}

impl InstanceGuard {
    /// Claims the launcher name once, with no retries.
    ///
    /// Losing the race is not an error: the owner is asked to toggle, any failure
    /// of that call is only logged, and [`InstanceOutcome::Forwarded`] is returned.
    pub async fn acquire(bus: &dyn InstanceBus) -> Result<InstanceOutcome, LauncherError> {
        if bus.claim(LAUNCHER_SERVICE).await? {
            info!(name = LAUNCHER_SERVICE, "Acquired launcher bus name");
            return Ok(InstanceOutcome::Primary(InstanceGuard {
                name: LAUNCHER_SERVICE,
            }));
        }

        info!(name = LAUNCHER_SERVICE, "Launcher already running, forwarding toggle");
        if let Err(e) = bus.forward_toggle(LAUNCHER_SERVICE).await {
            debug!(error = %e, "Forwarded toggle failed");
        }
        Ok(InstanceOutcome::Forwarded)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
