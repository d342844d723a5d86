//! Display discovery and screen geometry tracking.
//!
//! [`DisplayRegistry`] is the injected view of the windowing system's outputs;
//! [`ScreenTracker`] keeps the launcher glued to whichever output is primary.

pub mod registry;
pub mod tracker;
pub mod virtual_registry;

pub use registry::{DisplayChange, DisplayId, DisplayRegistry};
pub use tracker::ScreenTracker;
pub use virtual_registry::VirtualDisplayRegistry;
