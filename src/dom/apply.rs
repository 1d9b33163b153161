//! Applying core actions to the live document.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, DomException, Element, Event, HtmlElement, HtmlInputElement, HtmlMediaElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use super::Shared;
use super::landmarks::{query, query_all_in};
use crate::action::{Action, ScrollMotion, Target};
use crate::consts::CLASS_NO_TRANSITION;
use crate::input::ElementId;
use crate::modal::ModalSlot;

pub(super) fn apply_all(page: &Shared, event: Option<&Event>, actions: &[Action]) {
    for action in actions {
        apply(page, event, action);
    }
}

fn apply(page: &Shared, event: Option<&Event>, action: &Action) {
    match action {
        Action::PreventDefault => {
            if let Some(event) = event {
                event.prevent_default();
            }
        }
        Action::AddClass { target, class } => with_element(page, *target, |el| {
            if let Err(err) = el.class_list().add_1(class) {
                log::debug!("add class {class}: {err:?}");
            }
        }),
        Action::RemoveClass { target, class } => with_element(page, *target, |el| {
            if let Err(err) = el.class_list().remove_1(class) {
                log::debug!("remove class {class}: {err:?}");
            }
        }),
        Action::SetAttribute { target, name, value } => with_element(page, *target, |el| {
            if let Err(err) = el.set_attribute(name, value) {
                log::debug!("set {name}: {err:?}");
            }
        }),
        Action::SetText { target, text } => with_element(page, *target, |el| el.set_text_content(Some(text))),
        Action::SetHtml { target, html } => with_element(page, *target, |el| el.set_inner_html(html)),
        Action::SetStyle { target, property, value } => with_element(page, *target, |el| {
            set_style(el, property, value);
        }),
        Action::ClearStyleAfterTransition { target, property } => with_element(page, *target, |el| {
            clear_style_after_transition(el, *property);
        }),
        Action::SetBodyStyle(style) => with_element(page, Target::Body, |el| {
            set_style(el, "overflow", &style.overflow);
            set_style(el, "padding-right", &style.padding_right);
        }),
        Action::SetDataset { target, key, value } => with_element(page, *target, |el| {
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                if let Err(err) = html.dataset().set(key, value) {
                    log::debug!("set data-{key}: {err:?}");
                }
            }
        }),
        Action::SetChecked { target, checked } => with_element(page, *target, |el| {
            if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                input.set_checked(*checked);
            }
        }),
        Action::Focus(target) => with_element(page, *target, |el| {
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                if let Err(err) = html.focus() {
                    log::debug!("focus: {err:?}");
                }
            }
        }),
        Action::MountMedia { src } => with_element(page, Target::Modal(ModalSlot::Media), |slot| {
            mount_video(slot, src);
        }),
        Action::ClearMedia => {
            with_element(page, Target::Modal(ModalSlot::Media), |slot| slot.set_inner_html(""));
        }
        Action::PlayMedia { target, from_start } => play(page, *target, *from_start),
        Action::PauseMedia { target, rewind } => with_element(page, *target, |el| {
            for media in media_of(el) {
                if let Err(err) = media.pause() {
                    log::debug!("pause: {err:?}");
                }
                if *rewind {
                    media.set_current_time(0.0);
                }
            }
        }),
        Action::Observe { target } => observe(page, *target, true),
        Action::Unobserve { target } => observe(page, *target, false),
        Action::ApplyTheme { theme, clear, immediate } => with_element(page, Target::Body, |body| {
            apply_theme(body, theme, clear, *immediate);
        }),
        Action::ScrollTo { href, motion, delay_ms } => scroll_to(href, *motion, *delay_ms),
    }
}

/// Resolve `target` with a short borrow, then run `f` with the borrow released.
fn with_element(page: &Shared, target: Target, f: impl FnOnce(&Element)) {
    let element = page.borrow().resolve(target);
    match element {
        Some(el) => f(&el),
        None => log::debug!("no element for {target:?}"),
    }
}

fn set_style(el: &Element, property: &str, value: &str) {
    let Some(html) = el.dyn_ref::<HtmlElement>() else {
        return;
    };
    if let Err(err) = html.style().set_property(property, value) {
        log::debug!("set style {property}: {err:?}");
    }
}

/// Drop `property` from the inline style on the first `transitionend`.
fn clear_style_after_transition(el: &Element, property: &'static str) {
    let Some(html) = el.dyn_ref::<HtmlElement>().cloned() else {
        return;
    };
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let callback = Closure::once_into_js(move || {
        if let Err(err) = html.style().remove_property(property) {
            log::debug!("clear style {property}: {err:?}");
        }
    });
    if let Err(err) =
        el.add_event_listener_with_callback_and_add_event_listener_options("transitionend", callback.unchecked_ref(), &options)
    {
        log::debug!("failed to bind transitionend: {err:?}");
    }
}

/// The element itself if it is media, else every video or audio inside it.
fn media_of(el: &Element) -> Vec<HtmlMediaElement> {
    if let Some(media) = el.dyn_ref::<HtmlMediaElement>() {
        return vec![media.clone()];
    }
    query_all_in(el, "video, audio").iter().filter_map(|e| e.dyn_ref::<HtmlMediaElement>().cloned()).collect()
}

fn play(page: &Shared, target: Target, from_start: bool) {
    let Some(el) = page.borrow().resolve(target) else {
        return;
    };
    for media in media_of(&el) {
        if from_start {
            media.set_current_time(0.0);
        }
        let promise = match media.play() {
            Ok(promise) => promise,
            Err(err) => {
                log::debug!("play: {err:?}");
                continue;
            }
        };
        let page = page.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::debug!("play rejected: {err:?}");
                let name = err.dyn_ref::<DomException>().map(DomException::name).unwrap_or_default();
                if let Target::Element(id) = target {
                    page.borrow_mut().core.on_play_rejected(id, &name);
                }
            }
        });
    }
}

fn observe(page: &Shared, target: ElementId, start: bool) {
    let (observer, element) = {
        let page = page.borrow();
        (page.observer.clone(), page.registry.get(target).cloned())
    };
    let (Some(observer), Some(element)) = (observer, element) else {
        return;
    };
    if start {
        observer.observe(&element);
    } else {
        observer.unobserve(&element);
    }
}

fn apply_theme(body: &Element, theme: &str, clear: &[String], immediate: bool) {
    let classes = body.class_list();
    if immediate {
        if let Err(err) = classes.add_1(CLASS_NO_TRANSITION) {
            log::debug!("add {CLASS_NO_TRANSITION}: {err:?}");
        }
    }
    for class in clear {
        if let Err(err) = classes.remove_1(class) {
            log::debug!("remove theme {class}: {err:?}");
        }
    }
    if let Err(err) = classes.add_1(theme) {
        log::debug!("add theme {theme}: {err:?}");
    }
    if !immediate {
        return;
    }

    let restore = Closure::once_into_js(move || {
        if let Err(err) = classes.remove_1(CLASS_NO_TRANSITION) {
            log::debug!("remove {CLASS_NO_TRANSITION}: {err:?}");
        }
    });
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.request_animation_frame(restore.unchecked_ref()) {
        log::debug!("requestAnimationFrame: {err:?}");
    }
}

fn mount_video(slot: &Element, src: &str) {
    slot.set_inner_html("");
    let Some(document) = slot.owner_document() else {
        return;
    };
    let video = match document.create_element("video") {
        Ok(el) => el,
        Err(err) => {
            log::debug!("create video: {err:?}");
            return;
        }
    };
    for (name, value) in [("src", src), ("controls", ""), ("playsinline", ""), ("preload", "metadata")] {
        if let Err(err) = video.set_attribute(name, value) {
            log::debug!("video {name}: {err:?}");
        }
    }
    if let Err(err) = slot.append_child(&video) {
        log::debug!("mount video: {err:?}");
    }
}

fn scroll_to(href: &str, motion: ScrollMotion, delay_ms: u32) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(target) = query(&document, href) else {
        log::debug!("scroll target {href} not found");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(match motion {
        ScrollMotion::Smooth => ScrollBehavior::Smooth,
        ScrollMotion::Instant => ScrollBehavior::Auto,
    });
    options.set_block(ScrollLogicalPosition::Start);

    if delay_ms == 0 {
        target.scroll_into_view_with_scroll_into_view_options(&options);
        return;
    }
    Timeout::new(delay_ms, move || {
        target.scroll_into_view_with_scroll_into_view_options(&options);
    })
    .forget();
}
