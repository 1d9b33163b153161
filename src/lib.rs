//! Interaction scripts for the portfolio page.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns every
//! interactive behavior on the page: the navigation menu, the project detail
//! modal and its focus trap, scroll-driven reveals and background themes,
//! hover previews on project cards, and the cookie-consent banner. The
//! interaction model lives in a headless [`engine::PageCore`] that turns input
//! events into [`action::Action`]s; the `dom` module (behind the `hydrate`
//! feature) is the only code that touches the document.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::PageCore`], the testable orchestrator |
//! | [`action`] | DOM mutations returned by the core |
//! | [`input`] | Element handles, keys, triggers, intersection entries |
//! | [`disclosure`] | Open/close state shared by every overlay |
//! | [`body`] | Reference-counted body scroll lock |
//! | [`modal`] | Project modal content binding and focus trap |
//! | [`focus`] | Tab-cycling within a focus set |
//! | [`content`] | Modal content map |
//! | [`visibility`] | Reveal, theme, and autoplay observation |
//! | [`cards`] | Hover/focus preview playback |
//! | [`consent`] | Consent preferences, storage, and banner flow |
//! | [`config`] | Page configuration and defaults |
//! | [`consts`] | Marker classes and attribute names |

pub mod action;
pub mod body;
pub mod cards;
pub mod config;
pub mod consent;
pub mod consts;
pub mod content;
pub mod disclosure;
#[cfg(feature = "hydrate")]
pub mod dom;
pub mod engine;
pub mod focus;
pub mod input;
pub mod modal;
pub mod visibility;

/// WASM entry point: install logging and hydrate the document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger not installed: {err}").into());
    }
    dom::start();
}
