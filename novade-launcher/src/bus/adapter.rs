//! Method table between the bus and the window.
//!
//! The zbus object in [`super::service`] only turns calls into [`BusRequest`]s;
//! what each member does is decided here, against [`LauncherControl`], so the
//! table can be exercised without a bus.

use crate::types::Rect;

/// What the bus is allowed to do with the launcher window.
pub trait LauncherControl {
    fn show(&mut self);
    fn hide(&mut self);
    fn toggle(&mut self);
    fn left_margin(&self) -> i32;
    fn right_margin(&self) -> i32;
    fn bottom_margin(&self) -> i32;
    fn screen_rect(&self) -> Rect;
    fn showed(&self) -> bool;
    fn dock_available(&self) -> bool;
}

/// A member of `com.cutefish.Launcher`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusRequest {
    Toggle,
    Show,
    Hide,
    LeftMargin,
    RightMargin,
    BottomMargin,
    ScreenRect,
    Showed,
    DockAvailable,
}

impl BusRequest {
    /// Member name as it appears on the bus.
    pub fn member(self) -> &'static str {
        match self {
            BusRequest::Toggle => "toggle",
            BusRequest::Show => "show",
            BusRequest::Hide => "hide",
            BusRequest::LeftMargin => "leftMargin",
            BusRequest::RightMargin => "rightMargin",
            BusRequest::BottomMargin => "bottomMargin",
            BusRequest::ScreenRect => "screenRect",
            BusRequest::Showed => "showed",
            BusRequest::DockAvailable => "dockAvailable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusReply {
    Done,
    Int(i32),
    Rect(Rect),
    Bool(bool),
}

pub fn dispatch<C: LauncherControl + ?Sized>(control: &mut C, request: BusRequest) -> BusReply {
    match request {
        BusRequest::Toggle => {
            control.toggle();
            BusReply::Done
        }
        BusRequest::Show => {
            control.show();
            BusReply::Done
        }
        BusRequest::Hide => {
            control.hide();
            BusReply::Done
        }
        BusRequest::LeftMargin => BusReply::Int(control.left_margin()),
        BusRequest::RightMargin => BusReply::Int(control.right_margin()),
        BusRequest::BottomMargin => BusReply::Int(control.bottom_margin()),
        BusRequest::ScreenRect => BusReply::Rect(control.screen_rect()),
        BusRequest::Showed => BusReply::Bool(control.showed()),
        BusRequest::DockAvailable => BusReply::Bool(control.dock_available()),
    }
}
