//! Keeps the window's view of the dock current.
//!
//! The monitor follows the ownership of `com.cutefish.Dock`. While the dock
//! owns its name the monitor listens to `primaryGeometryChanged` and
//! `directionChanged` and re-reads the snapshot on each; when the name goes away
//! it drops those streams and reports the dock unavailable. Every result reaches
//! the window as a [`LauncherEvent::Dock`].
//!
//! A dock may claim its name before its object is exported. When the read that
//! follows a registration fails, the monitor reads once more after
//! [`SNAPSHOT_RETRY_DELAY`].

use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Sleep;
use tracing::{debug, info, warn};

use super::endpoint::{query_status, DockEndpoint, DockWatch};
use crate::error::DockError;
use crate::event::{EventSender, LauncherEvent};
use crate::types::{DockSnapshot, DockStatus};

pub const SNAPSHOT_RETRY_DELAY: Duration = Duration::from_millis(500);

type Announcements = BoxStream<'static, ()>;

pub struct DockMonitor {
    endpoint: Arc<dyn DockEndpoint>,
    watch: Arc<dyn DockWatch>,
    events: EventSender,
    retry_delay: Duration,
}

impl DockMonitor {
    pub fn new(
        endpoint: Arc<dyn DockEndpoint>,
        watch: Arc<dyn DockWatch>,
        events: EventSender,
    ) -> Self {
        Self {
            endpoint,
            watch,
            events,
            retry_delay: SNAPSHOT_RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Runs until the owner-change stream ends or the event loop goes away.
    pub async fn run(self) -> Result<(), DockError> {
        let mut owner_changes = self.watch.owner_changes().await?;
        let mut retry = None;

        let mut announcements = if self.endpoint.is_available().await {
            info!("Dock present at startup");
            self.attach(&mut retry).await
        } else {
            debug!("Dock not running yet");
            self.publish(DockStatus::Unavailable);
            None
        };

        loop {
            if self.events.is_closed() {
                debug!("Event loop closed, dock monitor exiting");
                return Ok(());
            }

            tokio::select! {
                change = owner_changes.next() => match change {
                    None => {
                        warn!("NameOwnerChanged stream ended, dock monitor exiting");
                        return Ok(());
                    }
                    Some(true) => {
                        info!("Dock registered on the bus");
                        announcements = self.attach(&mut retry).await;
                    }
                    Some(false) => {
                        info!("Dock left the bus");
                        announcements = None;
                        retry = None;
                        self.publish(DockStatus::Unavailable);
                    }
                },
                announced = next_announcement(&mut announcements) => {
                    if announced {
                        debug!("Dock announced a geometry or direction change");
                        retry = None;
                        self.refresh().await;
                    } else {
                        debug!("Dock signal streams ended");
                        announcements = None;
                    }
                }
                () = retry_elapsed(&mut retry) => {
                    debug!("Re-reading the dock snapshot");
                    retry = None;
                    self.refresh().await;
                }
            }
        }
    }

    /// Subscribes to the dock's announcements, then publishes a fresh snapshot.
    /// Subscribing first means no change can slip between the read and the watch.
    async fn attach(&self, retry: &mut Option<Pin<Box<Sleep>>>) -> Option<Announcements> {
        let announcements = match self.watch.announcements().await {
            Ok(announcements) => Some(announcements),
            Err(e) => {
                warn!(error = %e, "Could not subscribe to dock signals");
                None
            }
        };
        *retry = if self.refresh().await {
            None
        } else {
            Some(Box::pin(tokio::time::sleep(self.retry_delay)))
        };
        announcements
    }

    /// Publishes the dock's current status. Returns `false` when the dock owns
    /// its name but could not be read.
    async fn refresh(&self) -> bool {
        match query_status(self.endpoint.as_ref()).await {
            Ok(status) => {
                self.publish(status);
                true
            }
            Err(e) => {
                warn!(error = %e, "Dock is present but its geometry could not be read");
                self.publish(DockStatus::Available(DockSnapshot::default()));
                false
            }
        }
    }

    fn publish(&self, status: DockStatus) {
        if self.events.send(LauncherEvent::Dock(status)).is_err() {
            debug!("Event loop gone, dropping dock status");
        }
    }
}

/// Resolves when the dock announces a change (`true`) or its stream ends
/// (`false`). Never resolves while detached.
async fn next_announcement(announcements: &mut Option<Announcements>) -> bool {
    match announcements {
        Some(announcements) => announcements.next().await.is_some(),
        None => std::future::pending().await,
    }
}

async fn retry_elapsed(retry: &mut Option<Pin<Box<Sleep>>>) {
    match retry {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::dock::endpoint::tests::FakeDock;
    use crate::event::{self, EventReceiver};
    use crate::types::{DockDirection, Rect};
    use futures_util::stream;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;

    fn receiver_stream<T>(rx: mpsc::UnboundedReceiver<T>) -> BoxStream<'static, T>
    where
        T: Send + 'static,
    {
        stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|item| (item, rx)) }).boxed()
    }

    /// Bus side of the dock: name ownership and change signals, driven by hand.
    struct FakeWatch {
        owner_tx: Mutex<Option<mpsc::UnboundedSender<bool>>>,
        owner_rx: Mutex<Option<mpsc::UnboundedReceiver<bool>>>,
        announcers: Mutex<Vec<mpsc::UnboundedSender<()>>>,
    }

    impl FakeWatch {
        fn new() -> Self {
            let (owner_tx, owner_rx) = mpsc::unbounded_channel();
            Self {
                owner_tx: Mutex::new(Some(owner_tx)),
                owner_rx: Mutex::new(Some(owner_rx)),
                announcers: Mutex::new(Vec::new()),
            }
        }

        fn set_owner(&self, registered: bool) {
            self.owner_tx.lock().as_ref().unwrap().send(registered).unwrap();
        }

        fn end_owner_changes(&self) {
            self.owner_tx.lock().take();
        }

        fn announce(&self) {
            let announcers = self.announcers.lock();
            announcers.last().unwrap().send(()).unwrap();
        }
    }

    #[async_trait]
    impl DockWatch for FakeWatch {
        async fn owner_changes(&self) -> Result<BoxStream<'static, bool>, DockError> {
            let rx = self.owner_rx.lock().take().ok_or(DockError::Unavailable)?;
            Ok(receiver_stream(rx))
        }

        async fn announcements(&self) -> Result<BoxStream<'static, ()>, DockError> {
            let (tx, rx) = mpsc::unbounded_channel();
            self.announcers.lock().push(tx);
            Ok(receiver_stream(rx))
        }
    }

    fn left_dock() -> DockSnapshot {
        DockSnapshot {
            geometry: Rect::new(0, 0, 72, 1080),
            direction: DockDirection::Left,
        }
    }

    fn bottom_dock() -> DockSnapshot {
        DockSnapshot {
            geometry: Rect::new(0, 1040, 1920, 40),
            direction: DockDirection::Bottom,
        }
    }

    fn start(dock: &Arc<FakeDock>, watch: &Arc<FakeWatch>) -> (JoinHandle<()>, EventReceiver) {
        let (events, receiver) = event::channel();
        let monitor = DockMonitor::new(dock.clone(), watch.clone(), events)
            .with_retry_delay(Duration::from_millis(50));
        let task = tokio::spawn(async move {
            monitor.run().await.unwrap();
        });
        (task, receiver)
    }

    async fn next_status(receiver: &mut EventReceiver) -> DockStatus {
        let wait = tokio::time::timeout(Duration::from_secs(5), receiver.recv());
        match wait.await {
            Ok(Some(LauncherEvent::Dock(status))) => status,
            other => panic!("expected a dock status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn dock_registering_after_startup_becomes_available() {
        let dock = Arc::new(FakeDock::default());
        let watch = Arc::new(FakeWatch::new());
        let (task, mut receiver) = start(&dock, &watch);

        assert_eq!(next_status(&mut receiver).await, DockStatus::Unavailable);

        *dock.snapshot.lock() = Some(bottom_dock());
        watch.set_owner(true);
        assert_eq!(next_status(&mut receiver).await, DockStatus::Available(bottom_dock()));

        task.abort();
    }

    #[tokio::test]
    async fn dock_leaving_the_bus_becomes_unavailable() {
        let dock = Arc::new(FakeDock::present(left_dock()));
        let watch = Arc::new(FakeWatch::new());
        let (task, mut receiver) = start(&dock, &watch);

        assert_eq!(next_status(&mut receiver).await, DockStatus::Available(left_dock()));

        *dock.snapshot.lock() = None;
        watch.set_owner(false);
        assert_eq!(next_status(&mut receiver).await, DockStatus::Unavailable);

        task.abort();
    }

    #[tokio::test]
    async fn announced_change_is_read_back() {
        let dock = Arc::new(FakeDock::present(bottom_dock()));
        let watch = Arc::new(FakeWatch::new());
        let (task, mut receiver) = start(&dock, &watch);

        assert_eq!(next_status(&mut receiver).await, DockStatus::Available(bottom_dock()));

        *dock.snapshot.lock() = Some(left_dock());
        watch.announce();
        assert_eq!(next_status(&mut receiver).await, DockStatus::Available(left_dock()));

        task.abort();
    }

    #[tokio::test]
    async fn failed_read_after_registration_is_retried() {
        let dock = Arc::new(FakeDock::default());
        let watch = Arc::new(FakeWatch::new());
        let (task, mut receiver) = start(&dock, &watch);
        assert_eq!(next_status(&mut receiver).await, DockStatus::Unavailable);

        *dock.snapshot.lock() = Some(bottom_dock());
        *dock.broken.lock() = true;
        watch.set_owner(true);
        assert_eq!(
            next_status(&mut receiver).await,
            DockStatus::Available(DockSnapshot::default())
        );

        *dock.broken.lock() = false;
        assert_eq!(next_status(&mut receiver).await, DockStatus::Available(bottom_dock()));

        task.abort();
    }

    #[tokio::test]
    async fn monitor_stops_when_the_owner_stream_ends() {
        let dock = Arc::new(FakeDock::default());
        let watch = Arc::new(FakeWatch::new());
        let (events, mut receiver) = event::channel();
        let monitor = DockMonitor::new(dock, watch.clone(), events);

        let task = tokio::spawn(monitor.run());
        assert_eq!(next_status(&mut receiver).await, DockStatus::Unavailable);
        watch.end_owner_changes();

        let finished = tokio::time::timeout(Duration::from_secs(5), task).await;
        assert!(matches!(finished, Ok(Ok(Ok(())))));
    }
}
