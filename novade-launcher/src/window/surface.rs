//! The presentation surface the window drives.
//!
//! Rendering lives outside this crate. [`Surface`] is the narrow set of calls the
//! state machine makes on it; [`HeadlessSurface`] records them and logs, which is
//! what the binary runs until a toolkit backend is plugged in.

use tracing::{debug, trace};

use crate::types::Rect;

/// Window hints set once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceHints {
    pub frameless: bool,
    pub skip_taskbar: bool,
    pub transparent: bool,
    /// Budget for decoded icon images, in KiB.
    pub image_cache_limit_kb: u32,
}

impl SurfaceHints {
    /// Hints of the launcher overlay: frameless, off the taskbar, translucent.
    pub fn launcher(image_cache_limit_kb: u32) -> Self {
        Self {
            frameless: true,
            skip_taskbar: true,
            transparent: true,
            image_cache_limit_kb,
        }
    }
}

pub trait Surface: Send {
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
    fn set_geometry(&mut self, rect: Rect);
    fn set_title(&mut self, title: &str);
    fn set_hints(&mut self, hints: SurfaceHints);
    fn clear_image_cache(&mut self);
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    visible: bool,
    geometry: Rect,
    title: String,
    hints: Option<SurfaceHints>,
    geometry_updates: usize,
    cache_clears: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn hints(&self) -> Option<SurfaceHints> {
        self.hints
    }

    /// How many times the geometry was set.
    pub fn geometry_updates(&self) -> usize {
        self.geometry_updates
    }

    pub fn cache_clears(&self) -> usize {
        self.cache_clears
    }
}

impl Surface for HeadlessSurface {
    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            debug!(visible, "Surface visibility changed");
        }
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_geometry(&mut self, rect: Rect) {
        trace!(%rect, "Surface geometry set");
        self.geometry = rect;
        self.geometry_updates += 1;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_hints(&mut self, hints: SurfaceHints) {
        debug!(?hints, "Surface hints set");
        self.hints = Some(hints);
    }

    fn clear_image_cache(&mut self) {
        debug!("Image cache cleared");
        self.cache_clears += 1;
    }
}
