//! Actions returned from the page core for the host to apply to the DOM.

use crate::body::BodyStyle;
use crate::consent::ConsentCategory;
use crate::disclosure::DisclosureId;
use crate::input::ElementId;
use crate::modal::ModalSlot;

/// An element the host can resolve.
///
/// Fixed page landmarks are named; everything else goes through the host's
/// element registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The document `<body>`.
    Body,
    /// The container element of a disclosure.
    Disclosure(DisclosureId),
    /// A content node inside the project modal.
    Modal(ModalSlot),
    /// A consent toggle checkbox in the settings dialog.
    ConsentToggle(ConsentCategory),
    /// Any registered element.
    Element(ElementId),
}

/// Scroll behavior for a deferred scroll navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMotion {
    Smooth,
    Instant,
}

/// DOM mutation requested by the core.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddClass { target: Target, class: String },
    RemoveClass { target: Target, class: String },
    SetAttribute { target: Target, name: &'static str, value: String },
    SetText { target: Target, text: String },
    SetHtml { target: Target, html: String },
    SetStyle { target: Target, property: &'static str, value: String },
    /// Remove an inline style once the element's next transition has finished.
    ClearStyleAfterTransition { target: Target, property: &'static str },
    /// Replace the body's inline `overflow` and `padding-right`.
    SetBodyStyle(BodyStyle),
    SetDataset { target: Target, key: &'static str, value: &'static str },
    SetChecked { target: Target, checked: bool },
    Focus(Target),
    /// Build a fresh video element inside the modal's media slot.
    MountMedia { src: String },
    /// Empty the modal's media slot.
    ClearMedia,
    /// Play the media owned by `target`, optionally from time zero.
    PlayMedia { target: Target, from_start: bool },
    /// Pause every media element owned by `target`.
    PauseMedia { target: Target, rewind: bool },
    Observe { target: ElementId },
    Unobserve { target: ElementId },
    /// Swap the body theme: remove every class in `clear`, then add `theme`.
    ApplyTheme { theme: String, clear: Vec<String>, immediate: bool },
    /// Scroll the element selected by `href` into view after `delay_ms`.
    ScrollTo { href: String, motion: ScrollMotion, delay_ms: u32 },
    /// Suppress the browser's default handling of the current event.
    PreventDefault,
}

impl Action {
    pub(crate) fn add_class(target: Target, class: impl Into<String>) -> Self {
        Self::AddClass { target, class: class.into() }
    }

    pub(crate) fn remove_class(target: Target, class: impl Into<String>) -> Self {
        Self::RemoveClass { target, class: class.into() }
    }

    pub(crate) fn aria_hidden(target: Target, hidden: bool) -> Self {
        Self::SetAttribute {
            target,
            name: crate::consts::ATTR_ARIA_HIDDEN,
            value: if hidden { "true" } else { "false" }.to_owned(),
        }
    }
}
