/// Visibility flags of the launcher window.
///
/// `active` implies `visible`; [`WindowState::set_active`] refuses to break that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    pub visible: bool,
    /// Whether the last explicit transition was a show. Backs the `showed` property.
    pub ever_shown: bool,
    pub active: bool,
}

impl WindowState {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            ever_shown: false,
            active: false,
        }
    }

    /// Records focus. Returns `false` if focus was claimed while hidden.
    pub fn set_active(&mut self, active: bool) -> bool {
        if active && !self.visible {
            return false;
        }
        self.active = active;
        true
    }

    pub fn mark_shown(&mut self) {
        self.visible = true;
        self.ever_shown = true;
    }

    pub fn mark_hidden(&mut self) {
        self.visible = false;
        self.active = false;
        self.ever_shown = false;
    }
}
