use crate::observer::Subscription;
use crate::types::Rect;

/// Opaque identifier of a connected display.
pub type DisplayId = u32;

/// Change reported for a single display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayChange {
    /// The display's own rectangle moved or resized.
    Geometry(Rect),
    /// The bounding box of all displays changed.
    VirtualGeometry(Rect),
}

/// The windowing system's set of displays.
///
/// Observers are held for as long as the returned [`Subscription`] lives.
pub trait DisplayRegistry: Send + Sync {
    /// Display currently designated primary, if any is connected.
    fn primary(&self) -> Option<DisplayId>;

    /// Current geometry of `display`, or `None` once it is gone.
    fn geometry(&self, display: DisplayId) -> Option<Rect>;

    /// Watches geometry and virtual-geometry changes of one display.
    fn watch_display(
        &self,
        display: DisplayId,
        observer: Box<dyn Fn(DisplayChange) + Send + Sync>,
    ) -> Subscription;

    /// Watches changes of the primary designation, including hot-plug.
    fn watch_primary(&self, observer: Box<dyn Fn(Option<DisplayId>) + Send + Sync>) -> Subscription;

    /// Geometry of the primary display.
    fn primary_geometry(&self) -> Option<Rect> {
        self.primary().and_then(|id| self.geometry(id))
    }
}
