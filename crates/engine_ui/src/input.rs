//! Pointer input state.

use engine_math::Vec2;

/// Pointer position and the edge-triggered click flag, installed as a world
/// resource.
///
/// The platform layer calls [`Pointer::press`] / [`Pointer::release`] from
/// its button events and [`Pointer::move_to`] from motion events. A pending
/// click is delivered to at most one UI element, which consumes it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    /// Position in window pixels, origin top-left.
    pub position: Vec2,
    click_pending: bool,
}

impl Pointer {
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    /// A button went down at `position`.
    pub fn press(&mut self, position: Vec2) {
        self.position = position;
        self.click_pending = true;
    }

    /// A button went up.
    pub fn release(&mut self) {
        self.click_pending = false;
    }

    #[must_use]
    pub fn click_pending(&self) -> bool {
        self.click_pending
    }

    /// Take the pending click. Returns whether there was one.
    pub fn consume(&mut self) -> bool {
        std::mem::take(&mut self.click_pending)
    }
}
