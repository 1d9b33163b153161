//! Page core: owns every controller and turns input events into [`Action`]s.
//!
//! `PageCore` is deliberately free of browser types so the whole interaction
//! model can be exercised natively. The `dom` host (behind the `hydrate`
//! feature) is the only place that resolves markup and applies actions.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::action::{Action, ScrollMotion};
use crate::body::{BodyStyle, ScrollLock};
use crate::cards::CardController;
use crate::config::PageConfig;
use crate::consent::{ConsentController, ConsentFlags, ConsentMount, ConsentPreferences, ConsentStore, PreferenceStorage};
use crate::content::ContentMap;
use crate::disclosure::{Disclosure, DisclosureId};
use crate::focus::TabDirection;
use crate::input::{ElementId, FocusScope, IntersectionEntry, Key, Modifiers, Trigger};
use crate::modal::{ModalController, ModalMount};
use crate::visibility::{ObserveSpec, VisibilityAdapter};

/// Facts about the browsing environment captured at startup.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// `prefers-reduced-motion: reduce` matched.
    pub reduced_motion: bool,
    /// Width of the vertical scrollbar in CSS pixels.
    pub scrollbar_width: f64,
    /// Inline body style before any overlay opened.
    pub body: BodyStyle,
}

/// Which page landmarks were found in markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mounted {
    pub menu: bool,
    pub modal: ModalMount,
    pub consent: ConsentMount,
}

impl Mounted {
    #[must_use]
    pub fn all() -> Self {
        Self { menu: true, modal: ModalMount::all(), consent: ConsentMount::all() }
    }
}

pub struct PageCore<S> {
    config: PageConfig,
    content: ContentMap,
    reduced_motion: bool,
    lock: ScrollLock,
    menu: Disclosure,
    modal: ModalController,
    consent: ConsentController<S>,
    visibility: VisibilityAdapter,
    cards: CardController,
}

impl<S: PreferenceStorage> PageCore<S> {
    pub fn new(config: PageConfig, content: ContentMap, env: Environment, mounted: Mounted, storage: S) -> Self {
        let store = ConsentStore::new(storage, config.consent_storage_key.clone());
        let visibility = VisibilityAdapter::new(env.reduced_motion, config.reveal_stagger_ms, config.theme_classes.clone());
        Self {
            content,
            reduced_motion: env.reduced_motion,
            lock: ScrollLock::new(env.body, env.scrollbar_width),
            menu: Disclosure::new(DisclosureId::Menu, mounted.menu),
            modal: ModalController::new(mounted.modal),
            consent: ConsentController::new(store, mounted.consent),
            visibility,
            cards: CardController::new(env.reduced_motion),
            config,
        }
    }

    // --- Setup ---

    /// Startup work that does not depend on registered elements.
    pub fn start(&mut self) -> Vec<Action> {
        self.consent.start(&mut self.lock)
    }

    pub fn register_section(&mut self, target: ElementId, spec: ObserveSpec) -> Vec<Action> {
        self.visibility.register(target, spec)
    }

    pub fn register_card(&mut self, card: ElementId, has_video: bool) {
        self.cards.register(card, has_video);
    }

    pub fn set_scrollbar_width(&mut self, width: f64) {
        self.lock.set_scrollbar_width(width);
    }

    // --- Input events ---

    /// A bound element was clicked.
    pub fn on_trigger(&mut self, trigger: Trigger, source: ElementId) -> Vec<Action> {
        match trigger {
            Trigger::MenuOpen => self.menu.open(Some(source), &mut self.lock),
            Trigger::MenuClose => self.menu.close(&mut self.lock),
            Trigger::ScrollLink { href } => self.scroll_link(&href),
            Trigger::ModalOpen { key } => self.modal.open_with_content(&key, &self.content, Some(source), &mut self.lock),
            Trigger::ModalClose => self.modal.close(&mut self.lock),
            Trigger::ConsentAccept => self.consent.accept(&mut self.lock),
            Trigger::ConsentReject => self.consent.reject(&mut self.lock),
            Trigger::ConsentConfigure => self.consent.open_settings(Some(source), &mut self.lock),
            Trigger::ConsentSave { analytics, marketing } => {
                self.consent.save(ConsentPreferences::new(analytics, marketing), &mut self.lock)
            }
            Trigger::ConsentClose => self.consent.close_settings(&mut self.lock),
        }
    }

    /// Key pressed on a non-button element bound to `trigger` (card articles).
    pub fn on_trigger_key(&mut self, trigger: Trigger, source: ElementId, key: &Key) -> Vec<Action> {
        if !key.is_activation() {
            return Vec::new();
        }
        let mut actions = vec![Action::PreventDefault];
        actions.extend(self.on_trigger(trigger, source));
        actions
    }

    /// Window-level key handling: Escape closes the topmost overlay, Tab is
    /// trapped inside the open modal.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers, scope: &FocusScope) -> Vec<Action> {
        if key.is_escape() {
            return self.close_topmost();
        }
        if key.is_tab() {
            return self.modal.trap_tab(scope, TabDirection::from_shift(modifiers.shift));
        }
        Vec::new()
    }

    pub fn on_card_enter(&mut self, card: ElementId) -> Vec<Action> {
        self.cards.on_enter(card)
    }

    pub fn on_card_leave(&mut self, card: ElementId) -> Vec<Action> {
        self.cards.on_leave(card)
    }

    pub fn on_card_metadata(&mut self, card: ElementId) -> Vec<Action> {
        self.cards.on_metadata(card)
    }

    pub fn on_intersections(&mut self, batch: &[IntersectionEntry]) -> Vec<Action> {
        self.visibility.on_intersections(batch)
    }

    /// A `play()` promise rejected with the `DOMException` named `error`.
    pub fn on_play_rejected(&mut self, target: ElementId, error: &str) {
        self.visibility.on_play_rejected(target, error);
    }

    /// Click, touch, scroll, or key anywhere on the page.
    pub fn on_user_gesture(&mut self) -> Vec<Action> {
        self.visibility.on_user_gesture()
    }

    // --- Queries ---

    /// Whether Tab presses need a [`FocusScope`] from the host.
    #[must_use]
    pub fn traps_focus(&self) -> bool {
        self.modal.is_open()
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.modal.is_open()
    }

    #[must_use]
    pub fn active_modal(&self) -> Option<&str> {
        self.modal.active_key()
    }

    #[must_use]
    pub fn is_consent_banner_visible(&self) -> bool {
        self.consent.is_banner_visible()
    }

    #[must_use]
    pub fn is_consent_dialog_open(&self) -> bool {
        self.consent.is_dialog_open()
    }

    #[must_use]
    pub fn consent_flags(&self) -> Option<ConsentFlags> {
        self.consent.flags()
    }

    #[must_use]
    pub fn consent_store(&self) -> &ConsentStore<S> {
        self.consent.store()
    }

    #[must_use]
    pub fn body_style(&self) -> &BodyStyle {
        self.lock.current()
    }

    #[must_use]
    pub fn current_theme(&self) -> Option<&str> {
        self.visibility.current_theme()
    }

    #[must_use]
    pub fn is_card_hovered(&self, card: ElementId) -> bool {
        self.cards.is_hovered(card)
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    // --- Internals ---

    fn close_topmost(&mut self) -> Vec<Action> {
        for id in DisclosureId::ESCAPE_ORDER {
            let actions = match id {
                DisclosureId::Modal if self.modal.is_open() => self.modal.close(&mut self.lock),
                DisclosureId::ConsentDialog if self.consent.is_dialog_open() => {
                    self.consent.close_settings(&mut self.lock)
                }
                DisclosureId::Menu if self.menu.is_open() => self.menu.close(&mut self.lock),
                _ => continue,
            };
            return actions;
        }
        Vec::new()
    }

    /// Close the menu if needed, then scroll to the hash target once the
    /// menu's close transition has finished.
    fn scroll_link(&mut self, href: &str) -> Vec<Action> {
        if !href.starts_with('#') {
            return Vec::new();
        }
        let menu_was_open = self.menu.is_open();
        let mut actions = vec![Action::PreventDefault];
        actions.extend(self.menu.close(&mut self.lock));
        if href.len() == 1 {
            return actions;
        }

        let delay_ms = if menu_was_open && !self.reduced_motion { self.config.menu_close_delay_ms } else { 0 };
        let motion = if self.reduced_motion { ScrollMotion::Instant } else { ScrollMotion::Smooth };
        actions.push(Action::ScrollTo { href: href.to_owned(), motion, delay_ms });
        actions
    }
}
