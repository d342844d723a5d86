//! Geometry and dock value types shared by the window, the tracker and the bus.

use serde::{Deserialize, Serialize};
use zvariant::{OwnedValue, Type, Value};

/// An integer rectangle in global screen coordinates.
///
/// Marshalled on D-Bus as `(iiii)` in x, y, width, height order, which is how the
/// dock publishes `primaryGeometry`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Type,
    Value,
    OwnedValue,
)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Smallest rectangle containing both. Empty rectangles are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect::new(left, top, right - left, bottom - top)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Screen edge the dock is attached to, as published by its `direction` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockDirection {
    Left,
    Bottom,
    Right,
    /// Any raw value the dock may add later. Reserves no space.
    Unknown(i32),
}

impl From<i32> for DockDirection {
    fn from(raw: i32) -> Self {
        match raw {
            0 => DockDirection::Left,
            1 => DockDirection::Bottom,
            2 => DockDirection::Right,
            other => DockDirection::Unknown(other),
        }
    }
}

impl DockDirection {
    pub fn raw(self) -> i32 {
        match self {
            DockDirection::Left => 0,
            DockDirection::Bottom => 1,
            DockDirection::Right => 2,
            DockDirection::Unknown(raw) => raw,
        }
    }
}

impl Default for DockDirection {
    fn default() -> Self {
        DockDirection::Unknown(-1)
    }
}

/// Cached copy of the dock's geometry and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DockSnapshot {
    pub geometry: Rect,
    pub direction: DockDirection,
}

/// Whether the dock currently owns its bus name, and what it last reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockStatus {
    Available(DockSnapshot),
    Unavailable,
}

/// Screen-edge space reserved for the dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Margins {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}
