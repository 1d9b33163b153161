//! Focus trap arithmetic for an open dialog.

#[cfg(test)]
#[path = "focus_test.rs"]
mod focus_test;

use crate::input::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Forward,
    Backward,
}

impl TabDirection {
    #[must_use]
    pub fn from_shift(shift: bool) -> Self {
        if shift { Self::Backward } else { Self::Forward }
    }
}

/// Element that should receive focus when Tab is pressed inside a trap.
///
/// Cycles through `focusables` in order, wrapping at both ends. Focus outside
/// the set enters at the first element (or the last, going backward). Returns
/// `None` only when the set is empty.
#[must_use]
pub fn next_in_trap(focusables: &[ElementId], active: Option<ElementId>, direction: TabDirection) -> Option<ElementId> {
    let len = focusables.len();
    if len == 0 {
        return None;
    }
    let position = active.and_then(|id| focusables.iter().position(|f| *f == id));
    let index = match (position, direction) {
        (Some(i), TabDirection::Forward) => (i + 1) % len,
        (Some(i), TabDirection::Backward) => (i + len - 1) % len,
        (None, TabDirection::Forward) => 0,
        (None, TabDirection::Backward) => len - 1,
    };
    focusables.get(index).copied()
}
