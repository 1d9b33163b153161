//! Project detail dialog: content binding, focus trap, and media lifecycle.
//!
//! DESIGN
//! ======
//! There is exactly one modal. Opening an entry while it is already open
//! rebinds the content in place and keeps the trigger recorded by the first
//! open, so Escape still returns focus to where the user started.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

use crate::action::{Action, Target};
use crate::body::ScrollLock;
use crate::consts::DEFAULT_MODAL_LABEL;
use crate::content::ContentMap;
use crate::disclosure::{Disclosure, DisclosureId};
use crate::focus::{TabDirection, next_in_trap};
use crate::input::{ElementId, FocusScope};

/// Content nodes inside the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalSlot {
    Label,
    Title,
    Synopsis,
    Details,
    /// Container that receives the embedded video.
    Media,
    /// First close control; receives focus on open.
    Close,
}

/// Which modal elements were found in markup.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ModalMount {
    pub dialog: bool,
    pub label: bool,
    pub title: bool,
    pub synopsis: bool,
    pub details: bool,
    pub media: bool,
    pub close: bool,
}

impl ModalMount {
    /// Every slot present.
    #[must_use]
    pub fn all() -> Self {
        Self { dialog: true, label: true, title: true, synopsis: true, details: true, media: true, close: true }
    }

    /// The dialog, title, and synopsis are required to show anything.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.dialog && self.title && self.synopsis
    }
}

#[derive(Debug, Clone)]
pub struct ModalController {
    disclosure: Disclosure,
    mount: ModalMount,
    active_key: Option<String>,
}

impl ModalController {
    #[must_use]
    pub fn new(mount: ModalMount) -> Self {
        Self { disclosure: Disclosure::new(DisclosureId::Modal, mount.is_usable()), mount, active_key: None }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.disclosure.is_open()
    }

    /// Key of the entry currently shown.
    #[must_use]
    pub fn active_key(&self) -> Option<&str> {
        self.active_key.as_deref()
    }

    #[must_use]
    pub fn trigger(&self) -> Option<ElementId> {
        self.disclosure.trigger()
    }

    /// Bind the entry for `key` and show the dialog.
    ///
    /// Unknown keys and a modal missing its required slots leave everything
    /// untouched.
    pub fn open_with_content(
        &mut self,
        key: &str,
        content: &ContentMap,
        trigger: Option<ElementId>,
        lock: &mut ScrollLock,
    ) -> Vec<Action> {
        if !self.mount.is_usable() {
            log::debug!("modal markup incomplete; ignoring open of '{key}'");
            return Vec::new();
        }
        let Some(entry) = content.get(key) else {
            log::debug!("no modal content for '{key}'");
            return Vec::new();
        };

        let mut actions = Vec::new();
        if self.mount.label {
            let label = entry.label.as_deref().unwrap_or(DEFAULT_MODAL_LABEL);
            actions.push(Action::SetText { target: Target::Modal(ModalSlot::Label), text: label.to_owned() });
        }
        actions.push(Action::SetText { target: Target::Modal(ModalSlot::Title), text: entry.title.clone() });
        actions.push(Action::SetText { target: Target::Modal(ModalSlot::Synopsis), text: entry.synopsis.clone() });
        if self.mount.details {
            actions.push(Action::SetHtml {
                target: Target::Modal(ModalSlot::Details),
                html: entry.details_html.clone().unwrap_or_default(),
            });
        }
        if self.mount.media {
            match &entry.media {
                Some(src) => actions.push(Action::MountMedia { src: src.clone() }),
                None => actions.push(Action::ClearMedia),
            }
        }

        actions.extend(self.disclosure.open(trigger, lock));
        if self.mount.close {
            actions.push(Action::Focus(Target::Modal(ModalSlot::Close)));
        }
        self.active_key = Some(key.to_owned());
        actions
    }

    /// Hide the dialog, stop its media, and hand focus back to the trigger.
    pub fn close(&mut self, lock: &mut ScrollLock) -> Vec<Action> {
        if !self.is_open() {
            return Vec::new();
        }
        self.active_key = None;
        let mut actions = vec![Action::PauseMedia { target: Target::Disclosure(DisclosureId::Modal), rewind: true }];
        actions.extend(self.disclosure.close(lock));
        actions
    }

    /// Keep Tab / Shift+Tab cycling inside the dialog.
    pub fn trap_tab(&self, scope: &FocusScope, direction: TabDirection) -> Vec<Action> {
        if !self.is_open() {
            return Vec::new();
        }
        let mut actions = vec![Action::PreventDefault];
        if let Some(next) = next_in_trap(&scope.focusables, scope.active, direction) {
            actions.push(Action::Focus(Target::Element(next)));
        }
        actions
    }
}
