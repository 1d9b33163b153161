//! Input model: element handles, keys, semantic triggers, and observation entries.
//!
//! The host resolves raw DOM events into these types before handing them to
//! [`crate::engine::PageCore`]. Nothing here touches the browser; an element is
//! only ever referred to through an [`ElementId`] issued by the host's registry.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// Opaque handle to an element registered with the host.
///
/// Handles are never reused within a page lifetime, so a stored handle acts as
/// a weak reference: if the element is gone the host simply resolves nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

/// A keyboard key as reported by the browser (e.g. `"Escape"`, `"Tab"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }

    #[must_use]
    pub fn is_tab(&self) -> bool {
        self.0 == "Tab"
    }

    /// Enter or Space, the keys that activate a button-like element.
    #[must_use]
    pub fn is_activation(&self) -> bool {
        self.0 == "Enter" || self.0 == " "
    }
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// What a clicked (or keyboard-activated) element asks the page to do.
///
/// The host derives a trigger from the element's data-attributes when it binds
/// listeners, so the core never inspects markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// `[data-menu-open]`
    MenuOpen,
    /// `[data-menu-close]`
    MenuClose,
    /// A `[data-scroll]` link or any anchor inside the menu.
    ScrollLink { href: String },
    /// `[data-modal="<key>"]`
    ModalOpen { key: String },
    /// `[data-modal-close]`
    ModalClose,
    /// `[data-cookie-accept]`
    ConsentAccept,
    /// `[data-cookie-reject]`
    ConsentReject,
    /// `[data-cookie-config]`
    ConsentConfigure,
    /// `[data-cookie-save]`, carrying the toggle states at click time.
    ConsentSave { analytics: bool, marketing: bool },
    /// `[data-cookie-close]`
    ConsentClose,
}

/// Snapshot of keyboard focus inside the open dialog, gathered by the host
/// only when [`crate::engine::PageCore::traps_focus`] is true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusScope {
    /// Focusable descendants in document order.
    pub focusables: Vec<ElementId>,
    /// The element that currently has focus, if it is registered.
    pub active: Option<ElementId>,
}

/// One entry of an intersection observer callback batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the target, `0.0..=1.0`.
    pub ratio: f64,
}

impl IntersectionEntry {
    #[must_use]
    pub fn new(target: ElementId, is_intersecting: bool, ratio: f64) -> Self {
        Self { target, is_intersecting, ratio }
    }
}
