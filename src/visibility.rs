//! Viewport-intersection policies: one-shot reveals, sticky theme switches,
//! and visibility-gated autoplay.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host runs a single intersection observer whose threshold list is the
//! union of every registered section's threshold, and forwards each callback
//! batch here. Each section is evaluated against its own threshold and only
//! reacts on a crossing, so a section fires at most once per entry into view.
//!
//! An element can carry several sections (the work grid is both a theme
//! section and a one-shot activation). It stays observed until every one-shot
//! section on it has fired and nothing persistent remains.

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::action::{Action, Target};
use crate::consts::{PLAY_NOT_ALLOWED, STYLE_TRANSITION_DELAY};
use crate::input::{ElementId, IntersectionEntry};

/// How a section reacts to entering the viewport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ObserveMode {
    /// Add `class` on first entry, then stop observing.
    OneShot {
        class: String,
        /// Delay each reveal in a batch by its position times the stagger step.
        #[serde(default)]
        stagger: bool,
    },
    /// Switch the body theme to `theme` on every entry.
    Persistent {
        theme: String,
        /// Swap without the CSS transition.
        #[serde(default)]
        immediate: bool,
    },
    /// Play the element's video while visible; pause when it leaves.
    Autoplay,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserveSpec {
    pub mode: ObserveMode,
    pub threshold: f64,
}

impl ObserveSpec {
    #[must_use]
    pub fn one_shot(class: &str, threshold: f64, stagger: bool) -> Self {
        Self { mode: ObserveMode::OneShot { class: class.to_owned(), stagger }, threshold }
    }

    #[must_use]
    pub fn persistent(theme: &str, threshold: f64, immediate: bool) -> Self {
        Self { mode: ObserveMode::Persistent { theme: theme.to_owned(), immediate }, threshold }
    }

    #[must_use]
    pub fn autoplay(threshold: f64) -> Self {
        Self { mode: ObserveMode::Autoplay, threshold }
    }
}

#[derive(Debug, Clone)]
struct Section {
    target: ElementId,
    spec: ObserveSpec,
    inside: bool,
    done: bool,
}

impl Section {
    fn is_live(&self) -> bool {
        !self.done
    }
}

/// Single gesture-triggered retry for rejected autoplay.
#[derive(Debug, Clone, Default)]
struct AutoplayRetry {
    pending: Option<ElementId>,
    spent: BTreeSet<ElementId>,
}

#[derive(Debug, Clone)]
pub struct VisibilityAdapter {
    reduced_motion: bool,
    stagger_ms: u32,
    theme_classes: Vec<String>,
    sections: Vec<Section>,
    observed: BTreeSet<ElementId>,
    theme: Option<String>,
    retry: AutoplayRetry,
}

impl VisibilityAdapter {
    #[must_use]
    pub fn new(reduced_motion: bool, stagger_ms: u32, theme_classes: Vec<String>) -> Self {
        Self {
            reduced_motion,
            stagger_ms,
            theme_classes,
            sections: Vec::new(),
            observed: BTreeSet::new(),
            theme: None,
            retry: AutoplayRetry::default(),
        }
    }

    /// Start tracking `target` under `spec`.
    ///
    /// With reduced motion, one-shot sections are revealed immediately and
    /// autoplay sections are dropped; neither is observed.
    pub fn register(&mut self, target: ElementId, spec: ObserveSpec) -> Vec<Action> {
        if self.reduced_motion {
            match &spec.mode {
                ObserveMode::OneShot { class, .. } => {
                    return vec![Action::add_class(Target::Element(target), class.clone())];
                }
                ObserveMode::Autoplay => return Vec::new(),
                ObserveMode::Persistent { .. } => {}
            }
        }

        self.sections.push(Section { target, spec, inside: false, done: false });
        if self.observed.insert(target) {
            vec![Action::Observe { target }]
        } else {
            Vec::new()
        }
    }

    #[must_use]
    pub fn is_observed(&self, target: ElementId) -> bool {
        self.observed.contains(&target)
    }

    /// Theme class currently applied to the body by this adapter.
    #[must_use]
    pub fn current_theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Process one observer callback batch.
    pub fn on_intersections(&mut self, batch: &[IntersectionEntry]) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut reveal_index: u32 = 0;
        let mut best_theme: Option<(f64, usize)> = None;

        for entry in batch {
            let mut fired_one_shot = false;
            for idx in 0..self.sections.len() {
                let section = &mut self.sections[idx];
                if section.target != entry.target || !section.is_live() {
                    continue;
                }
                let qualifies = entry.is_intersecting && entry.ratio >= section.spec.threshold;
                let crossed_in = qualifies && !section.inside;
                let crossed_out = !qualifies && section.inside;
                section.inside = qualifies;

                match &section.spec.mode {
                    ObserveMode::OneShot { class, stagger } if crossed_in => {
                        let target = Target::Element(entry.target);
                        if *stagger {
                            let delay = reveal_index.saturating_mul(self.stagger_ms);
                            if delay > 0 {
                                actions.push(Action::SetStyle {
                                    target,
                                    property: STYLE_TRANSITION_DELAY,
                                    value: format!("{delay}ms"),
                                });
                                actions.push(Action::ClearStyleAfterTransition {
                                    target,
                                    property: STYLE_TRANSITION_DELAY,
                                });
                            }
                            reveal_index += 1;
                        }
                        actions.push(Action::add_class(target, class.clone()));
                        section.done = true;
                        fired_one_shot = true;
                    }
                    ObserveMode::Persistent { .. } if crossed_in => {
                        if best_theme.is_none_or(|(ratio, _)| entry.ratio > ratio) {
                            best_theme = Some((entry.ratio, idx));
                        }
                    }
                    ObserveMode::Autoplay if crossed_in => {
                        actions.push(Action::PlayMedia { target: Target::Element(entry.target), from_start: false });
                    }
                    ObserveMode::Autoplay if crossed_out => {
                        if self.retry.pending == Some(entry.target) {
                            self.retry.pending = None;
                        }
                        actions.push(Action::PauseMedia { target: Target::Element(entry.target), rewind: false });
                    }
                    _ => {}
                }
            }

            if fired_one_shot && !self.has_live_section(entry.target) && self.observed.remove(&entry.target) {
                actions.push(Action::Unobserve { target: entry.target });
            }
        }

        if let Some((_, idx)) = best_theme {
            actions.extend(self.apply_theme(idx));
        }
        actions
    }

    /// Record a rejected play attempt. Returns `true` when a retry was queued.
    ///
    /// Only autoplay sections blocked by policy (`NotAllowedError`) get a
    /// retry, and only one per element. Other errors, such as the
    /// `AbortError` from a pause racing the play, leave the retry unspent.
    pub fn on_play_rejected(&mut self, target: ElementId, error: &str) -> bool {
        if error != PLAY_NOT_ALLOWED {
            log::debug!("play for {target:?} failed with {error:?}; not a policy block");
            return false;
        }
        let is_autoplay = self
            .sections
            .iter()
            .any(|s| s.target == target && matches!(s.spec.mode, ObserveMode::Autoplay));
        if !is_autoplay || self.retry.spent.contains(&target) {
            log::debug!("play rejected for {target:?}; not retrying");
            return false;
        }
        self.retry.pending = Some(target);
        true
    }

    /// A qualifying user gesture happened (click, touch, scroll, key).
    pub fn on_user_gesture(&mut self) -> Vec<Action> {
        let Some(target) = self.retry.pending.take() else {
            return Vec::new();
        };
        self.retry.spent.insert(target);
        let still_visible = self
            .sections
            .iter()
            .any(|s| s.target == target && matches!(s.spec.mode, ObserveMode::Autoplay) && s.inside);
        if !still_visible {
            return Vec::new();
        }
        vec![Action::PlayMedia { target: Target::Element(target), from_start: false }]
    }

    fn has_live_section(&self, target: ElementId) -> bool {
        self.sections.iter().any(|s| s.target == target && s.is_live())
    }

    fn apply_theme(&mut self, idx: usize) -> Option<Action> {
        let ObserveMode::Persistent { theme, immediate } = &self.sections.get(idx)?.spec.mode else {
            return None;
        };
        if self.theme.as_deref() == Some(theme.as_str()) {
            return None;
        }
        self.theme = Some(theme.clone());
        log::debug!("theme -> {theme}");
        Some(Action::ApplyTheme { theme: theme.clone(), clear: self.theme_classes.clone(), immediate: *immediate })
    }
}
