//! Fixed page elements, resolved once at startup.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, NodeList};

use crate::action::Target;
use crate::consent::{ConsentCategory, ConsentMount};
use crate::disclosure::DisclosureId;
use crate::engine::Mounted;
use crate::modal::{ModalMount, ModalSlot};

// ── Selectors ───────────────────────────────────────────────────

pub const SEL_MENU: &str = "[data-menu]";
pub const SEL_MENU_OPEN: &str = "[data-menu-open]";
pub const SEL_MENU_CLOSE: &str = "[data-menu-close]";
pub const SEL_SCROLL: &str = "[data-scroll]";

pub const ID_MODAL: &str = "modal";
const SEL_MODAL_LABEL: &str = "#modal-label";
const SEL_MODAL_TITLE: &str = "#modal-title";
const SEL_MODAL_SYNOPSIS: &str = ".modal__synopsis";
const SEL_MODAL_DETAILS: &str = "#modal-details";
const SEL_MODAL_MEDIA: &str = "[data-modal-media]";
pub const SEL_MODAL_CLOSE: &str = "[data-modal-close]";
pub const SEL_MODAL_TRIGGER: &str = "[data-modal]";
pub const ATTR_MODAL_KEY: &str = "data-modal";

pub const SEL_CARD: &str = ".work-card";

const SEL_COOKIE_BANNER: &str = "[data-cookie-banner]";
const SEL_COOKIE_DIALOG: &str = "[data-cookie-modal]";
pub const SEL_COOKIE_ACCEPT: &str = "[data-cookie-accept]";
pub const SEL_COOKIE_REJECT: &str = "[data-cookie-reject]";
pub const SEL_COOKIE_CONFIG: &str = "[data-cookie-config]";
pub const SEL_COOKIE_SAVE: &str = "[data-cookie-save]";
pub const SEL_COOKIE_CLOSE: &str = "[data-cookie-close]";
const SEL_COOKIE_ANALYTICS: &str = "[data-cookie-analytics]";
const SEL_COOKIE_MARKETING: &str = "[data-cookie-marketing]";

/// Keyboard-reachable descendants of the open modal.
pub const SEL_FOCUSABLE: &str = "a[href], area[href], button:not([disabled]), input:not([disabled]), \
     select:not([disabled]), textarea:not([disabled]), iframe, [contenteditable], \
     [tabindex]:not([tabindex=\"-1\"])";

// ── Query helpers ───────────────────────────────────────────────

/// First element under `document` matching `selector`.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    match document.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            log::debug!("bad selector {selector}: {err:?}");
            None
        }
    }
}

/// First descendant of `root` matching `selector`.
pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    match root.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            log::debug!("bad selector {selector}: {err:?}");
            None
        }
    }
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(list) => elements(&list),
        Err(err) => {
            log::debug!("bad selector {selector}: {err:?}");
            Vec::new()
        }
    }
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => elements(&list),
        Err(err) => {
            log::debug!("bad selector {selector}: {err:?}");
            Vec::new()
        }
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length()).filter_map(|idx| list.get(idx)).filter_map(|node| node.dyn_ref::<Element>().cloned()).collect()
}

// ── Landmarks ───────────────────────────────────────────────────

/// Optional handles for every named [`Target`]. A missing handle disables the
/// feature that needs it.
#[derive(Debug, Clone)]
pub struct Landmarks {
    pub body: Element,
    pub menu: Option<Element>,
    pub modal: Option<Element>,
    modal_label: Option<Element>,
    modal_title: Option<Element>,
    modal_synopsis: Option<Element>,
    modal_details: Option<Element>,
    pub modal_media: Option<Element>,
    modal_close: Option<Element>,
    cookie_banner: Option<Element>,
    cookie_dialog: Option<Element>,
    analytics_toggle: Option<Element>,
    marketing_toggle: Option<Element>,
}

impl Landmarks {
    pub fn resolve(document: &Document, body: &HtmlElement) -> Self {
        let modal = document.get_element_by_id(ID_MODAL);
        let in_modal = |selector: &str| modal.as_ref().and_then(|m| query_in(m, selector));
        Self {
            body: body.clone().into(),
            menu: query(document, SEL_MENU),
            modal_label: in_modal(SEL_MODAL_LABEL),
            modal_title: in_modal(SEL_MODAL_TITLE),
            modal_synopsis: in_modal(SEL_MODAL_SYNOPSIS),
            modal_details: in_modal(SEL_MODAL_DETAILS),
            modal_media: in_modal(SEL_MODAL_MEDIA),
            modal_close: in_modal(SEL_MODAL_CLOSE),
            modal,
            cookie_banner: query(document, SEL_COOKIE_BANNER),
            cookie_dialog: query(document, SEL_COOKIE_DIALOG),
            analytics_toggle: query(document, SEL_COOKIE_ANALYTICS),
            marketing_toggle: query(document, SEL_COOKIE_MARKETING),
        }
    }

    pub fn mounted(&self) -> Mounted {
        Mounted {
            menu: self.menu.is_some(),
            modal: ModalMount {
                dialog: self.modal.is_some(),
                label: self.modal_label.is_some(),
                title: self.modal_title.is_some(),
                synopsis: self.modal_synopsis.is_some(),
                details: self.modal_details.is_some(),
                media: self.modal_media.is_some(),
                close: self.modal_close.is_some(),
            },
            consent: ConsentMount {
                banner: self.cookie_banner.is_some(),
                dialog: self.cookie_dialog.is_some(),
                analytics_toggle: self.analytics_toggle.is_some(),
                marketing_toggle: self.marketing_toggle.is_some(),
            },
        }
    }

    /// Resolve a named target. [`Target::Element`] goes through the registry.
    pub fn get(&self, target: Target) -> Option<&Element> {
        match target {
            Target::Body => Some(&self.body),
            Target::Disclosure(DisclosureId::Menu) => self.menu.as_ref(),
            Target::Disclosure(DisclosureId::Modal) => self.modal.as_ref(),
            Target::Disclosure(DisclosureId::ConsentBanner) => self.cookie_banner.as_ref(),
            Target::Disclosure(DisclosureId::ConsentDialog) => self.cookie_dialog.as_ref(),
            Target::Modal(slot) => match slot {
                ModalSlot::Label => self.modal_label.as_ref(),
                ModalSlot::Title => self.modal_title.as_ref(),
                ModalSlot::Synopsis => self.modal_synopsis.as_ref(),
                ModalSlot::Details => self.modal_details.as_ref(),
                ModalSlot::Media => self.modal_media.as_ref(),
                ModalSlot::Close => self.modal_close.as_ref(),
            },
            Target::ConsentToggle(ConsentCategory::Analytics) => self.analytics_toggle.as_ref(),
            Target::ConsentToggle(ConsentCategory::Marketing) => self.marketing_toggle.as_ref(),
            Target::Element(_) => None,
        }
    }

    /// Current checkbox state of a consent toggle; unchecked when missing.
    pub fn is_checked(&self, category: ConsentCategory) -> bool {
        self.get(Target::ConsentToggle(category))
            .and_then(|el| el.dyn_ref::<HtmlInputElement>())
            .is_some_and(HtmlInputElement::checked)
    }
}
