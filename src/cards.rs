//! Hover/focus preview playback on project cards.
//!
//! Each card is tracked on its own; several cards may be hovered at once
//! (pointer on one, keyboard focus on another).

#[cfg(test)]
#[path = "cards_test.rs"]
mod cards_test;

use std::collections::BTreeMap;

use crate::action::{Action, Target};
use crate::consts::CLASS_HOVERED;
use crate::input::ElementId;

#[derive(Debug, Clone, Copy, Default)]
struct CardState {
    hovered: bool,
    has_video: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CardController {
    reduced_motion: bool,
    cards: BTreeMap<ElementId, CardState>,
}

impl CardController {
    #[must_use]
    pub fn new(reduced_motion: bool) -> Self {
        Self { reduced_motion, cards: BTreeMap::new() }
    }

    /// Track `card`. `has_video` is true when it owns a muted preview video.
    pub fn register(&mut self, card: ElementId, has_video: bool) {
        self.cards.insert(card, CardState { hovered: false, has_video });
    }

    #[must_use]
    pub fn is_hovered(&self, card: ElementId) -> bool {
        self.cards.get(&card).is_some_and(|c| c.hovered)
    }

    /// Pointer enter or focus in.
    pub fn on_enter(&mut self, card: ElementId) -> Vec<Action> {
        let reduced_motion = self.reduced_motion;
        let Some(state) = self.cards.get_mut(&card) else {
            return Vec::new();
        };
        if state.hovered {
            return Vec::new();
        }
        state.hovered = true;

        let target = Target::Element(card);
        let mut actions = vec![Action::add_class(target, CLASS_HOVERED)];
        if state.has_video && !reduced_motion {
            actions.push(Action::PlayMedia { target, from_start: true });
        }
        actions
    }

    /// Pointer leave or focus out.
    pub fn on_leave(&mut self, card: ElementId) -> Vec<Action> {
        let Some(state) = self.cards.get_mut(&card) else {
            return Vec::new();
        };
        if !state.hovered {
            return Vec::new();
        }
        state.hovered = false;

        let target = Target::Element(card);
        let mut actions = vec![Action::remove_class(target, CLASS_HOVERED)];
        if state.has_video {
            actions.push(Action::PauseMedia { target, rewind: true });
        }
        actions
    }

    /// The card's video finished loading metadata; park it at frame zero
    /// unless the card is already being previewed.
    pub fn on_metadata(&mut self, card: ElementId) -> Vec<Action> {
        match self.cards.get(&card) {
            Some(state) if state.has_video && !state.hovered => {
                vec![Action::PauseMedia { target: Target::Element(card), rewind: true }]
            }
            _ => Vec::new(),
        }
    }
}
