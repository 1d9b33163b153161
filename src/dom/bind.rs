//! Listener wiring. Each binding registers its element, then forwards the
//! browser event to the matching core method.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlMediaElement, KeyboardEvent, Window};

use super::landmarks::*;
use super::{Shared, dispatch, scrollbar_width};
use crate::consent::ConsentCategory;
use crate::engine::PageCore;
use crate::input::{ElementId, FocusScope, Key, Modifiers, Trigger};

/// `HAVE_METADATA` ready state.
const READY_METADATA: u16 = 1;

pub(super) fn bind_all(page: &Shared, window: &Window, document: &Document) {
    bind_menu(page, document);
    bind_scroll_links(page, document);
    bind_modal(page, document);
    bind_consent(page, document);
    bind_cards(page, document);
    bind_window(page, window);
}

// =============================================================
// Helpers
// =============================================================

fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref()) {
        log::warn!("failed to bind {kind}: {err:?}");
    }
    callback.forget();
}

fn listen_passive(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        log::warn!("failed to bind {kind}: {err:?}");
    }
    callback.forget();
}

fn register(page: &Shared, element: &Element) -> ElementId {
    page.borrow_mut().registry.register(element)
}

fn set_attribute(element: &Element, name: &str, value: &str) {
    if let Err(err) = element.set_attribute(name, value) {
        log::debug!("set {name}: {err:?}");
    }
}

/// Forward clicks on `element` as `trigger`.
fn on_click(page: &Shared, element: &Element, trigger: Trigger) {
    let source = register(page, element);
    let page = Rc::clone(page);
    listen(element, "click", move |event| {
        dispatch(&page, Some(&event), |core| core.on_trigger(trigger.clone(), source));
    });
}

/// Forward clicks on a hash link. The href is read at click time.
fn on_scroll_link(page: &Shared, link: &Element) {
    let source = register(page, link);
    let page = Rc::clone(page);
    let anchor = link.clone();
    listen(link, "click", move |event| {
        let href = anchor.get_attribute("href").unwrap_or_default();
        dispatch(&page, Some(&event), |core| core.on_trigger(Trigger::ScrollLink { href }, source));
    });
}

// =============================================================
// Menu and scroll links
// =============================================================

fn bind_menu(page: &Shared, document: &Document) {
    if let Some(button) = query(document, SEL_MENU_OPEN) {
        on_click(page, &button, Trigger::MenuOpen);
    }
    for button in query_all(document, SEL_MENU_CLOSE) {
        on_click(page, &button, Trigger::MenuClose);
    }
    let menu = page.borrow().landmarks.menu.clone();
    if let Some(menu) = menu {
        for link in query_all_in(&menu, "a") {
            on_scroll_link(page, &link);
        }
    }
}

/// `[data-scroll]` anchors outside the menu; menu anchors are already bound.
fn bind_scroll_links(page: &Shared, document: &Document) {
    let menu = page.borrow().landmarks.menu.clone();
    for link in query_all(document, SEL_SCROLL) {
        if link.tag_name() != "A" {
            continue;
        }
        if menu.as_ref().is_some_and(|m| m.contains(Some(link.as_ref()))) {
            continue;
        }
        on_scroll_link(page, &link);
    }
}

// =============================================================
// Project modal
// =============================================================

fn bind_modal(page: &Shared, document: &Document) {
    for element in query_all(document, SEL_MODAL_TRIGGER) {
        let Some(key) = element.get_attribute(ATTR_MODAL_KEY) else {
            continue;
        };
        let trigger = Trigger::ModalOpen { key };
        if element.tag_name() == "ARTICLE" {
            make_activatable(page, &element, trigger.clone());
        }
        on_click(page, &element, trigger);
    }

    let modal = page.borrow().landmarks.modal.clone();
    if let Some(modal) = modal {
        for button in query_all_in(&modal, SEL_MODAL_CLOSE) {
            on_click(page, &button, Trigger::ModalClose);
        }
    }
}

/// Let a non-button trigger be focused and activated from the keyboard.
fn make_activatable(page: &Shared, element: &Element, trigger: Trigger) {
    set_attribute(element, "tabindex", "0");
    set_attribute(element, "role", "button");
    let source = register(page, element);
    let page = Rc::clone(page);
    listen(element, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        let key = Key::new(key);
        dispatch(&page, Some(&event), |core| core.on_trigger_key(trigger.clone(), source, &key));
    });
}

/// Register the open modal's focusable descendants for the Tab trap.
fn focus_scope(page: &Shared) -> FocusScope {
    let mut page = page.borrow_mut();
    if !page.core.traps_focus() {
        return FocusScope::default();
    }
    let Some(modal) = page.landmarks.modal.clone() else {
        return FocusScope::default();
    };
    let focusables = query_all_in(&modal, SEL_FOCUSABLE).iter().map(|el| page.registry.register(el)).collect();
    let active = modal.owner_document().and_then(|doc| doc.active_element()).and_then(|el| page.registry.find(&el));
    FocusScope { focusables, active }
}

// =============================================================
// Consent
// =============================================================

fn bind_consent(page: &Shared, document: &Document) {
    let buttons = [
        (SEL_COOKIE_ACCEPT, Trigger::ConsentAccept),
        (SEL_COOKIE_REJECT, Trigger::ConsentReject),
        (SEL_COOKIE_CONFIG, Trigger::ConsentConfigure),
    ];
    for (selector, trigger) in buttons {
        if let Some(button) = query(document, selector) {
            on_click(page, &button, trigger);
        }
    }
    for button in query_all(document, SEL_COOKIE_CLOSE) {
        on_click(page, &button, Trigger::ConsentClose);
    }

    let Some(save) = query(document, SEL_COOKIE_SAVE) else {
        return;
    };
    let source = register(page, &save);
    let page = Rc::clone(page);
    listen(&save, "click", move |event| {
        let (analytics, marketing) = {
            let page = page.borrow();
            (
                page.landmarks.is_checked(ConsentCategory::Analytics),
                page.landmarks.is_checked(ConsentCategory::Marketing),
            )
        };
        let trigger = Trigger::ConsentSave { analytics, marketing };
        dispatch(&page, Some(&event), |core| core.on_trigger(trigger, source));
    });
}

// =============================================================
// Cards
// =============================================================

fn bind_cards(page: &Shared, document: &Document) {
    for card in query_all(document, SEL_CARD) {
        let video = query_in(&card, "video");
        let id = register(page, &card);
        page.borrow_mut().core.register_card(id, video.is_some());

        for kind in ["pointerenter", "focusin"] {
            let page = Rc::clone(page);
            listen(&card, kind, move |_| dispatch(&page, None, |core| core.on_card_enter(id)));
        }
        for kind in ["pointerleave", "focusout"] {
            let page = Rc::clone(page);
            listen(&card, kind, move |_| dispatch(&page, None, |core| core.on_card_leave(id)));
        }

        let Some(video) = video else {
            continue;
        };
        if let Some(media) = video.dyn_ref::<HtmlMediaElement>() {
            media.set_muted(true);
            if media.ready_state() >= READY_METADATA {
                dispatch(page, None, |core| core.on_card_metadata(id));
            }
        }
        let page = Rc::clone(page);
        listen(&video, "loadedmetadata", move |_| dispatch(&page, None, |core| core.on_card_metadata(id)));
    }
}

// =============================================================
// Window
// =============================================================

fn bind_window(page: &Shared, window: &Window) {
    let keys = Rc::clone(page);
    listen(window, "keydown", move |event| {
        let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = Key::new(keyboard.key());
        let modifiers = Modifiers {
            shift: keyboard.shift_key(),
            ctrl: keyboard.ctrl_key(),
            alt: keyboard.alt_key(),
            meta: keyboard.meta_key(),
        };
        let scope = if key.is_tab() { focus_scope(&keys) } else { FocusScope::default() };
        dispatch(&keys, Some(&event), |core| core.on_key_down(&key, modifiers, &scope));
    });

    for kind in ["click", "touchstart", "scroll", "keydown"] {
        let page = Rc::clone(page);
        listen_passive(window, kind, move |_| dispatch(&page, None, PageCore::on_user_gesture));
    }

    let page = Rc::clone(page);
    let win = window.clone();
    listen(window, "resize", move |_| {
        let Some(document) = win.document() else {
            return;
        };
        let width = scrollbar_width(&win, &document);
        page.borrow_mut().core.set_scrollbar_width(width);
    });
}
