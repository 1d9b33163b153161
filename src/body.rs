//! Body scroll lock shared by every overlay that freezes page scroll.
//!
//! The lock is reference-counted by holder: the first locking overlay to open
//! captures the body's inline style and hides overflow, padding the body by the
//! scrollbar width so content does not shift. The last holder to release it
//! restores the captured style exactly.

#[cfg(test)]
#[path = "body_test.rs"]
mod body_test;

use std::collections::BTreeSet;

use crate::action::Action;
use crate::consts::LOCKED_OVERFLOW;
use crate::disclosure::DisclosureId;

/// Inline style values on `<body>` that the scroll lock manages.
///
/// An empty string means "no inline value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyStyle {
    pub overflow: String,
    pub padding_right: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    current: BodyStyle,
    saved: Option<BodyStyle>,
    holders: BTreeSet<DisclosureId>,
    scrollbar_width: f64,
}

impl ScrollLock {
    #[must_use]
    pub fn new(initial: BodyStyle, scrollbar_width: f64) -> Self {
        Self { current: initial, saved: None, holders: BTreeSet::new(), scrollbar_width: scrollbar_width.max(0.0) }
    }

    /// Record a new scrollbar width (e.g. after a resize). Takes effect on the next lock.
    ///
    /// Ignored while locked: with `overflow: hidden` the scrollbar is gone and
    /// any measurement reads zero.
    pub fn set_scrollbar_width(&mut self, width: f64) {
        if self.is_locked() {
            log::debug!("ignoring scrollbar width {width} measured while locked");
            return;
        }
        self.scrollbar_width = width.max(0.0);
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    #[must_use]
    pub fn holds(&self, holder: DisclosureId) -> bool {
        self.holders.contains(&holder)
    }

    /// The body style as last written by the lock (or the initial style).
    #[must_use]
    pub fn current(&self) -> &BodyStyle {
        &self.current
    }

    /// Add `holder` to the lock. Only the first holder changes the body.
    pub fn acquire(&mut self, holder: DisclosureId) -> Option<Action> {
        let was_locked = self.is_locked();
        if !self.holders.insert(holder) || was_locked {
            return None;
        }

        self.saved = Some(self.current.clone());
        let existing = self.current.padding_right.trim();
        let padding_right = if self.scrollbar_width <= 0.0 {
            self.current.padding_right.clone()
        } else if existing.is_empty() {
            format!("{}px", self.scrollbar_width)
        } else {
            format!("calc({existing} + {}px)", self.scrollbar_width)
        };
        self.current = BodyStyle { overflow: LOCKED_OVERFLOW.to_owned(), padding_right };
        Some(Action::SetBodyStyle(self.current.clone()))
    }

    /// Remove `holder` from the lock. Only the last holder restores the body.
    pub fn release(&mut self, holder: DisclosureId) -> Option<Action> {
        if !self.holders.remove(&holder) || self.is_locked() {
            return None;
        }
        let restored = self.saved.take()?;
        self.current = restored;
        Some(Action::SetBodyStyle(self.current.clone()))
    }
}
