//! Hotkey toggle state

use std::cell::Cell;
use std::rc::Rc;

/// Process-lifetime on/off flag flipped by the toggle hotkey.
///
/// Clones share the same flag. Single-threaded: the hotkey callback and the
/// update tick both run on the host's update thread.
#[derive(Debug, Clone, Default)]
pub struct ToggleState {
    toggled: Rc<Cell<bool>>,
}

impl ToggleState {
    /// New flag, initially off
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value
    pub fn get(&self) -> bool {
        self.toggled.get()
    }

    /// Flip the flag and return the new value
    pub fn flip(&self) -> bool {
        let next = !self.toggled.get();
        self.toggled.set(next);
        next
    }
}
