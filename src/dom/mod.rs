//! Browser host: resolves markup, wires listeners, and applies [`Action`]s.
//!
//! ARCHITECTURE
//! ============
//! [`PageCore`] owns all interaction state; this module only translates. Every
//! listener follows the same shape: borrow the shared [`Page`], call one core
//! method, drop the borrow, then apply the returned actions. Applying an
//! action can fire listeners synchronously (`focus()` raises `focusin`), so
//! the borrow must never be held across DOM calls.

mod apply;
mod bind;
mod landmarks;
mod observer;
mod registry;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Event, IntersectionObserver, Window};

use crate::action::{Action, Target};
use crate::body::BodyStyle;
use crate::config::PageConfig;
use crate::content::ContentMap;
use crate::engine::{Environment, PageCore};

use landmarks::Landmarks;
use registry::ElementRegistry;
pub use storage::LocalStorage;

const ID_PAGE_CONFIG: &str = "page-config";
const ID_MODAL_CONTENT: &str = "modal-content";
const QUERY_REDUCED_MOTION: &str = "(prefers-reduced-motion: reduce)";

/// Host-side page state shared by every listener.
struct Page {
    core: PageCore<LocalStorage>,
    registry: ElementRegistry,
    landmarks: Landmarks,
    observer: Option<IntersectionObserver>,
}

type Shared = Rc<RefCell<Page>>;

impl Page {
    fn resolve(&self, target: Target) -> Option<web_sys::Element> {
        match target {
            Target::Element(id) => self.registry.get(id).cloned(),
            named => self.landmarks.get(named).cloned(),
        }
    }
}

/// Run `f` against the core and apply what it returns. `event` receives
/// `preventDefault` when asked.
fn dispatch(page: &Shared, event: Option<&Event>, f: impl FnOnce(&mut PageCore<LocalStorage>) -> Vec<Action>) {
    let actions = f(&mut page.borrow_mut().core);
    apply::apply_all(page, event, &actions);
}

/// Hydrate the current document.
pub fn start() {
    let Some(window) = web_sys::window() else {
        log::warn!("no window; page scripts disabled");
        return;
    };
    let Some(document) = window.document() else {
        log::warn!("no document; page scripts disabled");
        return;
    };
    let Some(body) = document.body() else {
        log::warn!("no body; page scripts disabled");
        return;
    };

    let config = PageConfig::from_json_or_default(script_text(&document, ID_PAGE_CONFIG).as_deref());
    let content = load_content(&document);
    let style = body.style();
    let env = Environment {
        reduced_motion: prefers_reduced_motion(&window),
        scrollbar_width: scrollbar_width(&window, &document),
        body: BodyStyle {
            overflow: style.get_property_value("overflow").unwrap_or_default(),
            padding_right: style.get_property_value("padding-right").unwrap_or_default(),
        },
    };
    log::debug!("hydrating: reduced_motion={} entries={}", env.reduced_motion, content.len());

    let landmarks = Landmarks::resolve(&document, &body);
    let core = PageCore::new(config, content, env, landmarks.mounted(), LocalStorage::from_window(&window));
    let page: Shared =
        Rc::new(RefCell::new(Page { core, registry: ElementRegistry::default(), landmarks, observer: None }));

    bind::bind_all(&page, &window, &document);
    observer::observe_sections(&page, &document);
    dispatch(&page, None, PageCore::start);
}

fn script_text(document: &Document, id: &str) -> Option<String> {
    document.get_element_by_id(id).and_then(|el| el.text_content())
}

fn load_content(document: &Document) -> ContentMap {
    let Some(raw) = script_text(document, ID_MODAL_CONTENT) else {
        return ContentMap::builtin();
    };
    match ContentMap::from_json(&raw) {
        Ok(content) => content,
        Err(err) => {
            log::warn!("using built-in modal content: {err}");
            ContentMap::builtin()
        }
    }
}

fn prefers_reduced_motion(window: &Window) -> bool {
    matches!(window.match_media(QUERY_REDUCED_MOTION), Ok(Some(mq)) if mq.matches())
}

/// Width the vertical scrollbar takes from the layout viewport.
fn scrollbar_width(window: &Window, document: &Document) -> f64 {
    let Some(inner) = window.inner_width().unwrap_or_default().as_f64() else {
        return 0.0;
    };
    let client = document.document_element().map_or(inner, |el| f64::from(el.client_width()));
    (inner - client).max(0.0)
}
