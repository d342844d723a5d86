//! In-process display registry.
//!
//! Seeded from the `[[displays]]` configuration section and mutated through its
//! own methods; every mutation fans out to the registered observers the same way
//! an output hot-plug would. The launcher binary runs on it until a compositor
//! backend feeds real outputs, and the tests drive it directly.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::registry::{DisplayChange, DisplayId, DisplayRegistry};
use crate::config::DisplaySeed;
use crate::observer::{Observers, Subscription};
use crate::types::Rect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualDisplay {
    pub name: String,
    pub geometry: Rect,
}

#[derive(Debug, Default)]
struct RegistryState {
    next_id: DisplayId,
    displays: BTreeMap<DisplayId, VirtualDisplay>,
    primary: Option<DisplayId>,
}

impl RegistryState {
    fn virtual_geometry(&self) -> Rect {
        self.displays
            .values()
            .fold(Rect::default(), |acc, display| acc.union(&display.geometry))
    }
}

/// Pending notifications, collected under the lock and delivered after it.
#[derive(Default)]
struct Fanout {
    display: Vec<(DisplayId, DisplayChange)>,
    primary: Option<Option<DisplayId>>,
}

#[derive(Debug, Default)]
pub struct VirtualDisplayRegistry {
    state: Mutex<RegistryState>,
    display_observers: Observers<(DisplayId, DisplayChange)>,
    primary_observers: Observers<Option<DisplayId>>,
}

impl VirtualDisplayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from configuration. The first seed marked `primary` wins;
    /// without one the first display becomes primary.
    pub fn from_seeds(seeds: &[DisplaySeed]) -> Self {
        let registry = Self::new();
        for seed in seeds {
            registry.add_display(&seed.name, seed.geometry(), seed.primary);
        }
        registry
    }

    /// Connects a display. It becomes primary if asked to or if it is the only one.
    pub fn add_display(&self, name: &str, geometry: Rect, make_primary: bool) -> DisplayId {
        let mut fanout = Fanout::default();
        let id = {
            let mut state = self.state.lock();
            let before = state.virtual_geometry();
            let id = state.next_id;
            state.next_id += 1;
            state.displays.insert(
                id,
                VirtualDisplay {
                    name: name.to_string(),
                    geometry,
                },
            );
            if make_primary || state.primary.is_none() {
                state.primary = Some(id);
                fanout.primary = Some(Some(id));
            }
            Self::collect_virtual_change(&state, before, &mut fanout);
            id
        };
        info!(display = id, name, %geometry, "Display connected");
        self.deliver(fanout);
        id
    }

    /// Disconnects a display. If it was primary, the lowest remaining id takes over.
    pub fn remove_display(&self, display: DisplayId) -> bool {
        let mut fanout = Fanout::default();
        {
            let mut state = self.state.lock();
            let before = state.virtual_geometry();
            if state.displays.remove(&display).is_none() {
                return false;
            }
            if state.primary == Some(display) {
                state.primary = state.displays.keys().next().copied();
                fanout.primary = Some(state.primary);
            }
            Self::collect_virtual_change(&state, before, &mut fanout);
        }
        let display_id = display;
        info!(display = display_id, "Display disconnected");
        self.deliver(fanout);
        true
    }

    /// Moves or resizes a display. Unchanged geometry notifies nobody.
    pub fn set_geometry(&self, display: DisplayId, geometry: Rect) -> bool {
        let mut fanout = Fanout::default();
        {
            let mut state = self.state.lock();
            let before = state.virtual_geometry();
            match state.displays.get_mut(&display) {
                Some(entry) if entry.geometry == geometry => return true,
                Some(entry) => entry.geometry = geometry,
                None => return false,
            }
            fanout.display.push((display, DisplayChange::Geometry(geometry)));
            Self::collect_virtual_change(&state, before, &mut fanout);
        }
        let display_id = display;
        debug!(display = display_id, %geometry, "Display geometry changed");
        self.deliver(fanout);
        true
    }

    /// Designates `display` as primary.
    pub fn set_primary(&self, display: DisplayId) -> bool {
        {
            let mut state = self.state.lock();
            if !state.displays.contains_key(&display) {
                return false;
            }
            if state.primary == Some(display) {
                return true;
            }
            state.primary = Some(display);
        }
        let display_id = display;
        info!(display = display_id, "Primary display changed");
        self.primary_observers.notify(&Some(display));
        true
    }

    /// Bounding box of all connected displays.
    pub fn virtual_geometry(&self) -> Rect {
        self.state.lock().virtual_geometry()
    }

    /// Number of live per-display observers, across all displays.
    pub fn display_watch_count(&self) -> usize {
        self.display_observers.len()
    }

    fn collect_virtual_change(state: &RegistryState, before: Rect, fanout: &mut Fanout) {
        let after = state.virtual_geometry();
        if after != before {
            fanout.display.extend(
                state
                    .displays
                    .keys()
                    .map(|id| (*id, DisplayChange::VirtualGeometry(after))),
            );
        }
    }

    fn deliver(&self, fanout: Fanout) {
        for change in &fanout.display {
            self.display_observers.notify(change);
        }
        if let Some(primary) = fanout.primary {
            self.primary_observers.notify(&primary);
        }
    }
}

impl DisplayRegistry for VirtualDisplayRegistry {
    fn primary(&self) -> Option<DisplayId> {
        self.state.lock().primary
    }

    fn geometry(&self, display: DisplayId) -> Option<Rect> {
        self.state.lock().displays.get(&display).map(|d| d.geometry)
    }

    fn watch_display(
        &self,
        display: DisplayId,
        observer: Box<dyn Fn(DisplayChange) + Send + Sync>,
    ) -> Subscription {
        self.display_observers.subscribe(move |(id, change)| {
            if *id == display {
                observer(*change);
            }
        })
    }

    fn watch_primary(
        &self,
        observer: Box<dyn Fn(Option<DisplayId>) + Send + Sync>,
    ) -> Subscription {
        self.primary_observers.subscribe(move |primary| observer(*primary))
    }
}
