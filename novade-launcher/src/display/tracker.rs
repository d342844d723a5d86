//! Follows the primary display's geometry.
//!
//! The tracker never touches the window: registry callbacks are turned into
//! [`LauncherEvent`]s, and the event loop calls back into [`ScreenTracker::refresh`]
//! or [`ScreenTracker::reinitialize`] from the task that owns the window.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::registry::{DisplayChange, DisplayId, DisplayRegistry};
use crate::event::{EventSender, LauncherEvent};
use crate::observer::Subscription;
use crate::types::Rect;

pub struct ScreenTracker {
    registry: Arc<dyn DisplayRegistry>,
    events: EventSender,
    tracked: Option<DisplayId>,
    display_watch: Option<Subscription>,
    _primary_watch: Subscription,
    rect: Rect,
}

impl ScreenTracker {
    /// Creates a tracker that is not yet attached to any display.
    ///
    /// Primary switches are reported as [`LauncherEvent::PrimaryDisplayChanged`]
    /// from now on; call [`reinitialize`](Self::reinitialize) to attach.
    pub fn new(registry: Arc<dyn DisplayRegistry>, events: EventSender) -> Self {
        let primary_events = events.clone();
        let primary_watch = registry.watch_primary(Box::new(move |primary: Option<DisplayId>| {
            debug!(?primary, "Primary display switched");
            if primary_events.send(LauncherEvent::PrimaryDisplayChanged).is_err() {
                debug!("Event loop gone, dropping primary display change");
            }
        }));

        Self {
            registry,
            events,
            tracked: None,
            display_watch: None,
            _primary_watch: primary_watch,
            rect: Rect::default(),
        }
    }

    /// Drops the watch on the previous display, attaches to the current primary
    /// and refreshes. Returns the new rectangle if it differs from the cached one.
    pub fn reinitialize(&mut self) -> Option<Rect> {
        self.display_watch = None;
        self.tracked = self.registry.primary();

        match self.tracked {
            Some(display) => {
                let events = self.events.clone();
                self.display_watch = Some(self.registry.watch_display(
                    display,
                    Box::new(move |change: DisplayChange| {
                        if events.send(LauncherEvent::DisplayChanged { display, change }).is_err() {
                            let display_id = display;
                            debug!(display = display_id, "Event loop gone, dropping display change");
                        }
                    }),
                ));
                let display_id = display;
                info!(display = display_id, "Tracking primary display");
            }
            None => warn!("No primary display, keeping last known screen geometry"),
        }

        self.refresh()
    }

    /// Re-reads the primary display's geometry.
    ///
    /// Returns `Some(rect)` only when it changed; an identical geometry or a
    /// missing primary display leaves the cache alone.
    pub fn refresh(&mut self) -> Option<Rect> {
        let current = self.registry.primary_geometry()?;
        if current == self.rect {
            return None;
        }
        debug!(from = %self.rect, to = %current, "Screen geometry changed");
        self.rect = current;
        Some(current)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Display the tracker is attached to.
    pub fn tracked(&self) -> Option<DisplayId> {
        self.tracked
    }
}

impl std::fmt::Debug for ScreenTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenTracker")
            .field("tracked", &self.tracked)
            .field("rect", &self.rect)
            .finish()
    }
}
