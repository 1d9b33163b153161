//! Open/close state for dismissible overlays.
//!
//! A [`Disclosure`] keeps its marker class, `aria-hidden`, optional body class,
//! and scroll-lock membership in step with a single `open` flag. Both
//! transitions are idempotent, so racing timers or doubled listeners can call
//! them freely.

#[cfg(test)]
#[path = "disclosure_test.rs"]
mod disclosure_test;

use crate::action::{Action, Target};
use crate::body::ScrollLock;
use crate::consts::{CLASS_MENU_OPEN, CLASS_OPEN, CLASS_VISIBLE};
use crate::input::ElementId;

/// Every overlay on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisclosureId {
    /// Full-screen navigation menu.
    Menu,
    /// Project detail dialog.
    Modal,
    /// Cookie-consent banner.
    ConsentBanner,
    /// Cookie-consent settings dialog.
    ConsentDialog,
}

impl DisclosureId {
    /// Overlays closed by Escape, topmost first. The banner requires a choice.
    pub const ESCAPE_ORDER: [Self; 3] = [Self::Modal, Self::ConsentDialog, Self::Menu];

    #[must_use]
    pub fn open_class(self) -> &'static str {
        match self {
            Self::ConsentBanner => CLASS_VISIBLE,
            Self::Menu | Self::Modal | Self::ConsentDialog => CLASS_OPEN,
        }
    }

    #[must_use]
    pub fn locks_scroll(self) -> bool {
        matches!(self, Self::Menu | Self::Modal)
    }

    #[must_use]
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Menu => Some(CLASS_MENU_OPEN),
            Self::Modal | Self::ConsentBanner | Self::ConsentDialog => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Disclosure {
    id: DisclosureId,
    mounted: bool,
    open: bool,
    trigger: Option<ElementId>,
}

impl Disclosure {
    /// `mounted` is false when the overlay's element was not found; such a
    /// disclosure ignores every request.
    #[must_use]
    pub fn new(id: DisclosureId, mounted: bool) -> Self {
        Self { id, mounted, open: false, trigger: None }
    }

    #[must_use]
    pub fn id(&self) -> DisclosureId {
        self.id
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Element that opened this disclosure, if one was recorded.
    #[must_use]
    pub fn trigger(&self) -> Option<ElementId> {
        self.trigger
    }

    pub fn open(&mut self, trigger: Option<ElementId>, lock: &mut ScrollLock) -> Vec<Action> {
        if !self.mounted || self.open {
            return Vec::new();
        }
        self.open = true;
        self.trigger = trigger;

        let target = Target::Disclosure(self.id);
        let mut actions = vec![Action::add_class(target, self.id.open_class()), Action::aria_hidden(target, false)];
        if let Some(class) = self.id.body_class() {
            actions.push(Action::add_class(Target::Body, class));
        }
        if self.id.locks_scroll() {
            actions.extend(lock.acquire(self.id));
        }
        log::debug!("{:?} opened", self.id);
        actions
    }

    pub fn close(&mut self, lock: &mut ScrollLock) -> Vec<Action> {
        if !self.mounted || !self.open {
            return Vec::new();
        }
        self.hide(lock)
    }

    /// Hide the overlay even if it is not tracked as open.
    ///
    /// Used where markup may render an overlay visible before the core knows
    /// about it. Focus is only restored when a trigger had been recorded.
    pub fn force_close(&mut self, lock: &mut ScrollLock) -> Vec<Action> {
        if !self.mounted {
            return Vec::new();
        }
        self.hide(lock)
    }

    fn hide(&mut self, lock: &mut ScrollLock) -> Vec<Action> {
        self.open = false;
        let target = Target::Disclosure(self.id);
        let mut actions = vec![Action::remove_class(target, self.id.open_class()), Action::aria_hidden(target, true)];
        if let Some(class) = self.id.body_class() {
            actions.push(Action::remove_class(Target::Body, class));
        }
        actions.extend(lock.release(self.id));
        if let Some(trigger) = self.trigger.take() {
            actions.push(Action::Focus(Target::Element(trigger)));
        }
        log::debug!("{:?} closed", self.id);
        actions
    }
}
