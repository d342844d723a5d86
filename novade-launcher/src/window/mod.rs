//! The launcher window: visibility state machine, screen geometry and dock margins.
//!
//! A [`LauncherWindow`] is owned by exactly one task. Other components never hold
//! a reference to it; they send [`LauncherEvent`]s and the owning task feeds them
//! to [`LauncherWindow::handle_event`].

pub mod state;
pub mod surface;

use std::ops::ControlFlow;
use tracing::{debug, info, trace};

pub use state::WindowState;
pub use surface::{HeadlessSurface, Surface, SurfaceHints};

use crate::bus::adapter::{self, LauncherControl};
use crate::display::ScreenTracker;
use crate::event::LauncherEvent;
use crate::margins::margins_for;
use crate::observer::{Observers, Subscription};
use crate::types::{DockStatus, Margins, Rect};

/// Property changes published to the presentation layer and the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowNotification {
    ShowedChanged(bool),
    MarginsChanged(Margins),
    ScreenRectChanged(Rect),
    DockAvailabilityChanged(bool),
}

pub struct LauncherWindow<S: Surface = HeadlessSurface> {
    surface: S,
    state: WindowState,
    tracker: ScreenTracker,
    dock_available: bool,
    margins: Margins,
    notifications: Observers<WindowNotification>,
}

impl<S: Surface> LauncherWindow<S> {
    /// Builds the window, attaches the tracker to the primary display and sets the
    /// initial visibility. `first_show` only makes the surface visible; `showed`
    /// stays `false` until an explicit [`show`](Self::show).
    pub fn new(
        first_show: bool,
        mut surface: S,
        tracker: ScreenTracker,
        title: &str,
        hints: SurfaceHints,
    ) -> Self {
        surface.set_hints(hints);
        surface.set_title(title);

        let mut window = Self {
            surface,
            state: WindowState::new(first_show),
            tracker,
            dock_available: false,
            margins: Margins::default(),
            notifications: Observers::new(),
        };
        window.reinitialize_screen();
        window.surface.set_visible(first_show);
        info!(first_show, screen = %window.screen_rect(), "Launcher window created");
        window
    }

    /// Registers an observer for property changes.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&WindowNotification) + Send + Sync + 'static,
    {
        self.notifications.subscribe(observer)
    }

    pub fn show(&mut self) {
        self.state.mark_shown();
        self.notify(WindowNotification::ShowedChanged(true));
        self.surface.set_visible(true);
        debug!("Launcher shown");
    }

    pub fn hide(&mut self) {
        self.surface.set_visible(false);
        self.state.mark_hidden();
        self.notify(WindowNotification::ShowedChanged(false));
        debug!("Launcher hidden");
    }

    pub fn toggle(&mut self) {
        if self.is_visible() {
            self.hide();
        } else {
            self.show();
        }
    }

    /// Focus notification from the windowing system. Losing focus hides the launcher.
    pub fn set_active(&mut self, active: bool) {
        if active {
            if !self.state.set_active(true) {
                trace!("Ignoring focus gain while hidden");
            }
        } else if self.is_visible() {
            debug!("Launcher lost focus");
            self.hide();
        } else {
            self.state.set_active(false);
        }
    }

    /// Applies a dock update: availability and the margins derived from it.
    pub fn apply_dock(&mut self, status: DockStatus) {
        let available = matches!(status, DockStatus::Available(_));
        if available != self.dock_available {
            self.dock_available = available;
            info!(available, "Dock availability changed");
            self.notify(WindowNotification::DockAvailabilityChanged(available));
        }

        let margins = margins_for(&status);
        if margins != self.margins {
            self.margins = margins;
            debug!(?margins, "Dock margins updated");
            self.notify(WindowNotification::MarginsChanged(margins));
        }
    }

    /// Re-attaches to the current primary display and resizes to it.
    pub fn reinitialize_screen(&mut self) {
        if let Some(rect) = self.tracker.reinitialize() {
            self.apply_screen_rect(rect);
        }
    }

    /// Re-reads the tracked display's geometry.
    pub fn refresh_screen(&mut self) {
        if let Some(rect) = self.tracker.refresh() {
            self.apply_screen_rect(rect);
        }
    }

    /// Resize requests from the windowing system are not honored; geometry only
    /// follows the primary display. Always returns `false` (not handled).
    pub fn handle_resize_request(&mut self, requested: Rect) -> bool {
        trace!(%requested, "Ignoring resize request");
        false
    }

    pub fn clear_image_cache(&mut self) {
        self.surface.clear_image_cache();
    }

    pub fn is_visible(&self) -> bool {
        self.surface.is_visible()
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Feeds one event into the window. Returns `Break` when the loop should stop.
    pub fn handle_event(&mut self, event: LauncherEvent) -> ControlFlow<()> {
        match event {
            LauncherEvent::Remote { request, reply } => {
                let result = adapter::dispatch(self, request);
                trace!(member = request.member(), ?result, "Handled bus request");
                if let Some(reply) = reply {
                    if reply.send(result).is_err() {
                        debug!(member = request.member(), "Bus caller went away before the reply");
                    }
                }
            }
            LauncherEvent::ActiveChanged(active) => self.set_active(active),
            LauncherEvent::ResizeRequested(rect) => {
                self.handle_resize_request(rect);
            }
            LauncherEvent::ClearImageCache => self.clear_image_cache(),
            LauncherEvent::DisplayChanged { display, change } => {
                if self.tracker.tracked() == Some(display) {
                    let display_id = display;
                    trace!(display = display_id, ?change, "Tracked display changed");
                    self.refresh_screen();
                }
            }
            LauncherEvent::PrimaryDisplayChanged => self.reinitialize_screen(),
            LauncherEvent::Dock(status) => self.apply_dock(status),
            LauncherEvent::Quit => {
                info!("Launcher event loop stopping");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn apply_screen_rect(&mut self, rect: Rect) {
        self.surface.set_geometry(rect);
        self.notify(WindowNotification::ScreenRectChanged(rect));
    }

    fn notify(&self, notification: WindowNotification) {
        self.notifications.notify(&notification);
    }
}

impl<S: Surface> LauncherControl for LauncherWindow<S> {
    fn show(&mut self) {
        LauncherWindow::show(self)
    }

    fn hide(&mut self) {
        LauncherWindow::hide(self)
    }

    fn toggle(&mut self) {
        LauncherWindow::toggle(self)
    }

    fn left_margin(&self) -> i32 {
        self.margins.left
    }

    fn right_margin(&self) -> i32 {
        self.margins.right
    }

    fn bottom_margin(&self) -> i32 {
        self.margins.bottom
    }

    fn screen_rect(&self) -> Rect {
        self.tracker.rect()
    }

    fn showed(&self) -> bool {
        self.state.ever_shown
    }

    fn dock_available(&self) -> bool {
        self.dock_available
    }
}

impl<S: Surface> std::fmt::Debug for LauncherWindow<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LauncherWindow")
            .field("state", &self.state)
            .field("tracker", &self.tracker)
            .field("dock_available", &self.dock_available)
            .field("margins", &self.margins)
            .finish()
    }
}
