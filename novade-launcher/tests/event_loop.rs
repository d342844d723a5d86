//! Drives the launcher's event loop end to end with in-memory collaborators.

use std::sync::Arc;
use tokio::sync::oneshot;

use novade_launcher::app::run_event_loop;
use novade_launcher::bus::{BusReply, BusRequest, LauncherControl};
use novade_launcher::display::{DisplayRegistry, ScreenTracker, VirtualDisplayRegistry};
use novade_launcher::event::{self, EventSender};
use novade_launcher::window::{HeadlessSurface, SurfaceHints};
use novade_launcher::{
    DockDirection, DockSnapshot, DockStatus, LauncherEvent, LauncherWindow, Margins, Rect,
};

fn remote(events: &EventSender, request: BusRequest) -> oneshot::Receiver<BusReply> {
    let (reply, response) = oneshot::channel();
    events
        .send(LauncherEvent::Remote {
            request,
            reply: Some(reply),
        })
        .unwrap();
    response
}

fn launcher(
    first_show: bool,
) -> (Arc<VirtualDisplayRegistry>, LauncherWindow, EventSender, event::EventReceiver) {
    let registry = Arc::new(VirtualDisplayRegistry::new());
    registry.add_display("eDP-1", Rect::new(0, 0, 1920, 1080), true);
    let (events, receiver) = event::channel();
    let shared: Arc<dyn DisplayRegistry> = registry.clone();
    let window = LauncherWindow::new(
        first_show,
        HeadlessSurface::new(),
        ScreenTracker::new(shared, events.clone()),
        "Launcher",
        SurfaceHints::launcher(2048),
    );
    (registry, window, events, receiver)
}

#[tokio::test]
async fn remote_toggle_and_property_reads() {
    let (_registry, window, events, receiver) = launcher(false);

    let toggled = remote(&events, BusRequest::Toggle);
    let showed = remote(&events, BusRequest::Showed);
    let screen = remote(&events, BusRequest::ScreenRect);
    events.send(LauncherEvent::Quit).unwrap();

    let window = run_event_loop(window, receiver).await;

    assert_eq!(toggled.await.unwrap(), BusReply::Done);
    assert_eq!(showed.await.unwrap(), BusReply::Bool(true));
    assert_eq!(screen.await.unwrap(), BusReply::Rect(Rect::new(0, 0, 1920, 1080)));
    assert!(window.is_visible());
}

#[tokio::test]
async fn dock_and_display_updates_flow_through_the_loop() {
    let (registry, window, events, receiver) = launcher(true);
    let primary = registry.primary().unwrap();

    events
        .send(LauncherEvent::Dock(DockStatus::Available(DockSnapshot {
            geometry: Rect::new(0, 1040, 1920, 40),
            direction: DockDirection::from(1),
        })))
        .unwrap();
    registry.set_geometry(primary, Rect::new(0, 0, 2560, 1440));
    let bottom = remote(&events, BusRequest::BottomMargin);
    events.send(LauncherEvent::Quit).unwrap();

    let window = run_event_loop(window, receiver).await;

    assert_eq!(bottom.await.unwrap(), BusReply::Int(40));
    assert!(window.dock_available());
    assert_eq!(window.surface().geometry(), Rect::new(0, 0, 2560, 1440));
    assert_eq!(window.screen_rect(), Rect::new(0, 0, 2560, 1440));
}

#[tokio::test]
async fn dock_leaving_clears_margins() {
    let (_registry, window, events, receiver) = launcher(false);

    events
        .send(LauncherEvent::Dock(DockStatus::Available(DockSnapshot {
            geometry: Rect::new(0, 0, 72, 1080),
            direction: DockDirection::Left,
        })))
        .unwrap();
    events.send(LauncherEvent::Dock(DockStatus::Unavailable)).unwrap();
    events.send(LauncherEvent::Quit).unwrap();

    let window = run_event_loop(window, receiver).await;
    assert_eq!(window.margins(), Margins::default());
    assert!(!window.dock_available());
}

#[tokio::test]
async fn focus_loss_hides_a_shown_launcher() {
    let (_registry, window, events, receiver) = launcher(false);

    let _ = remote(&events, BusRequest::Show);
    events.send(LauncherEvent::ActiveChanged(true)).unwrap();
    events.send(LauncherEvent::ActiveChanged(false)).unwrap();
    let showed = remote(&events, BusRequest::Showed);
    events.send(LauncherEvent::Quit).unwrap();

    let window = run_event_loop(window, receiver).await;
    assert_eq!(showed.await.unwrap(), BusReply::Bool(false));
    assert!(!window.is_visible());
}

#[tokio::test]
async fn loop_ends_when_every_sender_is_gone() {
    let registry = Arc::new(VirtualDisplayRegistry::new());
    registry.add_display("eDP-1", Rect::new(0, 0, 1280, 800), true);
    let (events, receiver) = event::channel();
    let (tracker_events, _unused) = event::channel();
    let window = LauncherWindow::new(
        false,
        HeadlessSurface::new(),
        ScreenTracker::new(registry, tracker_events),
        "Launcher",
        SurfaceHints::launcher(2048),
    );

    events.send(LauncherEvent::ResizeRequested(Rect::new(0, 0, 640, 480))).unwrap();
    drop(events);

    let window = run_event_loop(window, receiver).await;
    assert_eq!(window.surface().geometry(), Rect::new(0, 0, 1280, 800));
}
