//! Margin calculation from the dock's geometry and direction.

use crate::types::{DockDirection, DockSnapshot, DockStatus, Margins};

/// Computes the space the launcher must leave free for the dock.
///
/// Exactly one margin is non-zero for a known direction; every field is
/// recomputed so a direction change never leaves a stale edge behind. Negative
/// dimensions reported by the dock are clamped to zero.
pub fn compute_margins(dock: &DockSnapshot) -> Margins {
    let width = dock.geometry.width.max(0);
    let height = dock.geometry.height.max(0);

    match dock.direction {
        DockDirection::Left => Margins { left: width, ..Margins::default() },
        DockDirection::Bottom => Margins { bottom: height, ..Margins::default() },
        DockDirection::Right => Margins { right: width, ..Margins::default() },
        DockDirection::Unknown(_) => Margins::default(),
    }
}

/// Margins for the current dock state; an absent dock reserves nothing.
pub fn margins_for(status: &DockStatus) -> Margins {
    match status {
        DockStatus::Available(snapshot) => compute_margins(snapshot),
        DockStatus::Unavailable => Margins::default(),
    }
}
