//! One shared intersection observer for every configured section.

use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::landmarks::query_all;
use super::{Shared, apply, dispatch};
use crate::input::IntersectionEntry;

/// Create the observer, then register every element matched by a configured
/// section. The observer carries the union of all section thresholds; the
/// core evaluates each section against its own.
pub(super) fn observe_sections(page: &Shared, document: &Document) {
    let (sections, thresholds) = {
        let page = page.borrow();
        (page.core.config().sections.clone(), page.core.config().thresholds())
    };
    if sections.is_empty() {
        return;
    }
    let observer = create_observer(page, &thresholds);
    page.borrow_mut().observer = observer;

    let mut actions = Vec::new();
    for section in &sections {
        let elements = query_all(document, &section.selector);
        if elements.is_empty() {
            log::debug!("no elements for section {}", section.selector);
        }
        for element in elements {
            let mut page = page.borrow_mut();
            let id = page.registry.register(&element);
            actions.extend(page.core.register_section(id, section.spec()));
        }
    }
    apply::apply_all(page, None, &actions);
}

fn create_observer(page: &Shared, thresholds: &[f64]) -> Option<IntersectionObserver> {
    let page = Rc::clone(page);
    let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
        let batch: Vec<IntersectionEntry> = {
            let page = page.borrow();
            entries
                .iter()
                .filter_map(|value| {
                    let entry = value.dyn_ref::<IntersectionObserverEntry>()?;
                    let target = page.registry.find(&entry.target())?;
                    Some(IntersectionEntry::new(target, entry.is_intersecting(), entry.intersection_ratio()))
                })
                .collect()
        };
        dispatch(&page, None, |core| core.on_intersections(&batch));
    });

    let init = IntersectionObserverInit::new();
    let list: Array = thresholds.iter().map(|t| JsValue::from_f64(*t)).collect();
    init.set_threshold(&list);

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            callback.forget();
            Some(observer)
        }
        Err(err) => {
            log::warn!("intersection observer unavailable: {err:?}");
            None
        }
    }
}
