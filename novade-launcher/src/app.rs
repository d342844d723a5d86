//! Process startup and the window's event loop.

use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use zbus::Connection;

use novade_core::{init_logging, init_minimal_logging};

use crate::bus::{self, InstanceGuard, InstanceOutcome, LauncherService, SessionInstanceBus};
use crate::cli::Args;
use crate::config::LauncherConfig;
use crate::display::{DisplayRegistry, ScreenTracker, VirtualDisplayRegistry};
use crate::dock::{DockMonitor, SessionDock};
use crate::error::LauncherError;
use crate::event::{self, EventReceiver, EventSender, LauncherEvent};
use crate::i18n;
use crate::window::{HeadlessSurface, LauncherWindow, Surface, SurfaceHints};

/// Exit status for a second instance and for fatal startup failures.
pub const EXIT_FAILURE: i32 = -1;

/// Runs the launcher and returns the process exit status.
pub async fn run(args: Args) -> i32 {
    let config = match LauncherConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_minimal_logging();
            error!(error = %e, "Failed to load configuration");
            return EXIT_FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging, args.log_level.as_deref()) {
        init_minimal_logging();
        warn!(error = %e, "Falling back to minimal logging");
    }

    match launch(&args, &config).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Launcher failed");
            EXIT_FAILURE
        }
    }
}

async fn launch(args: &Args, config: &LauncherConfig) -> Result<i32, LauncherError> {
    let connection = Connection::session().await?;

    let guard = match InstanceGuard::acquire(&SessionInstanceBus::new(connection.clone())).await? {
        InstanceOutcome::Primary(guard) => guard,
        outcome @ InstanceOutcome::Forwarded => return Ok(outcome.exit_code()),
    };

    i18n::load_translations(&config.launcher.translations_dir);

    let (events, receiver) = event::channel();
    let registry: Arc<dyn DisplayRegistry> =
        Arc::new(VirtualDisplayRegistry::from_seeds(&config.displays));
    let tracker = ScreenTracker::new(registry, events.clone());
    let window = LauncherWindow::new(
        args.show,
        HeadlessSurface::new(),
        tracker,
        &i18n::tr("Launcher"),
        SurfaceHints::launcher(config.launcher.image_cache_limit_kb),
    );

    let (notify_tx, notify_rx) = mpsc::unbounded_channel();
    let _notifications = window.subscribe(move |notification| {
        let _ = notify_tx.send(*notification);
    });

    let dock = Arc::new(SessionDock::new(connection.clone()));
    bus::publish(&connection, LauncherService::new(events.clone(), dock.clone())).await?;
    info!(name = guard.name(), path = bus::LAUNCHER_PATH, "Launcher published on the session bus");

    let signal_connection = connection.clone();
    tokio::spawn(async move {
        if let Err(e) = bus::forward_notifications(signal_connection, notify_rx).await {
            warn!(error = %e, "Property change forwarding stopped");
        }
    });

    let monitor = DockMonitor::new(dock.clone(), dock, events.clone());
    tokio::spawn(async move {
        if let Err(e) = monitor.run().await {
            warn!(error = %e, "Dock monitor stopped, margins stay at their last value");
        }
    });

    spawn_shutdown_listener(events);
    run_event_loop(window, receiver).await;

    info!("Launcher exiting");
    Ok(0)
}

/// Feeds events to `window` until [`LauncherEvent::Quit`] or until every sender
/// is gone, then hands the window back.
pub async fn run_event_loop<S: Surface>(
    mut window: LauncherWindow<S>,
    mut receiver: EventReceiver,
) -> LauncherWindow<S> {
    while let Some(event) = receiver.recv().await {
        if window.handle_event(event).is_break() {
            break;
        }
    }
    window
}

fn spawn_shutdown_listener(events: EventSender) {
    tokio::spawn(async move {
        let terminate = async {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    warn!(error = %e, "Cannot listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        let interrupt = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Cannot listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            _ = interrupt => info!("Interrupted"),
            _ = terminate => info!("Terminated"),
        }

        if events.send(LauncherEvent::Quit).is_err() {
            debug!("Event loop already stopped");
        }
    });
}
