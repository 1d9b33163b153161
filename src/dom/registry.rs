//! Element handles issued to the core.

use web_sys::Element;

use crate::input::ElementId;

/// Maps [`ElementId`]s to live elements. Registering the same element twice
/// returns the same handle, so a card that is also a modal trigger is one id.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: Vec<Element>,
}

impl ElementRegistry {
    #[allow(clippy::cast_possible_truncation)]
    pub fn register(&mut self, element: &Element) -> ElementId {
        if let Some(id) = self.find(element) {
            return id;
        }
        self.elements.push(element.clone());
        ElementId((self.elements.len() - 1) as u32)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn find(&self, element: &Element) -> Option<ElementId> {
        self.elements.iter().position(|e| e == element).map(|idx| ElementId(idx as u32))
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }
}
