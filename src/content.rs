//! Static content shown in the project modal, keyed by `data-modal` value.
//!
//! The map ships with the site's built-in entries; a page may replace it with
//! a JSON object embedded in markup. The map is read-only once the page starts.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("invalid modal content: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("modal entry '{0}' has an empty title")]
    EmptyTitle(String),
}

/// One modal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalEntry {
    /// Eyebrow label above the title; the modal falls back to a generic one.
    #[serde(default)]
    pub label: Option<String>,
    pub title: String,
    pub synopsis: String,
    /// Trusted HTML for the details block.
    #[serde(default)]
    pub details_html: Option<String>,
    /// Relative path of a video to embed.
    #[serde(default)]
    pub media: Option<String>,
}

impl ModalEntry {
    fn new(label: &str, title: &str, synopsis: &str, details_html: &str) -> Self {
        Self {
            label: Some(label.to_owned()),
            title: title.to_owned(),
            synopsis: synopsis.to_owned(),
            details_html: Some(details_html.to_owned()),
            media: None,
        }
    }

    fn with_media(mut self, media: &str) -> Self {
        self.media = Some(media.to_owned());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMap {
    entries: BTreeMap<String, ModalEntry>,
}

impl ContentMap {
    #[must_use]
    pub fn new(entries: BTreeMap<String, ModalEntry>) -> Self {
        Self { entries }
    }

    /// Parse a JSON object of `key -> entry`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Parse`] for malformed JSON and
    /// [`ContentError::EmptyTitle`] for entries without a title.
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let entries: BTreeMap<String, ModalEntry> = serde_json::from_str(raw)?;
        if let Some((key, _)) = entries.iter().find(|(_, e)| e.title.trim().is_empty()) {
            return Err(ContentError::EmptyTitle(key.clone()));
        }
        Ok(Self::new(entries))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ModalEntry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The site's own about/project entries.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = [
            (
                "sobre",
                ModalEntry::new(
                    "Sobre mí",
                    "Sobre mí",
                    "Cineasta con enfoque editorial, obsesionado por el ritmo y la dirección visual. Trabajo con marcas y talentos que buscan imágenes premium, silenciosas y con propósito.",
                    "<p>Trabajo desde Barcelona con marcas que quieren imágenes silenciosas, elegantes y con intención. Cada proyecto se diseña para transmitir atmósfera y carácter cinematográfico.</p>",
                ),
            ),
            (
                "trabajo-1",
                ModalEntry::new(
                    "Proyecto",
                    "Ciudad en pausa",
                    "Una campaña nocturna que observa el pulso urbano con precisión editorial.",
                    "<p>Dirección visual centrada en textura, reflejos y ritmo lento.</p>",
                )
                .with_media("assets/proyecto-01.mp4"),
            ),
            (
                "trabajo-2",
                ModalEntry::new(
                    "Proyecto",
                    "Presencia discreta",
                    "Narrativa minimalista para destacar la presencia sin sobre-explicar.",
                    "<p>Planos cerrados, respiración sonora y montaje limpio.</p>",
                )
                .with_media("assets/proyecto-02.mp4"),
            ),
            (
                "trabajo-3",
                ModalEntry::new(
                    "Proyecto",
                    "Luz editorial",
                    "Una pieza lifestyle donde la luz guía el relato y el gesto.",
                    "<p>Foco en movimientos orgánicos y contrastes suaves.</p>",
                )
                .with_media("assets/proyecto-03.mp4"),
            ),
            (
                "trabajo-4",
                ModalEntry::new(
                    "Proyecto",
                    "Ritmo controlado",
                    "Automoción premium con tempo pausado y dirección precisa.",
                    "<p>Dirección técnica para vehículos, detalles y texturas.</p>",
                )
                .with_media("assets/proyecto-04.mp4"),
            ),
        ];
        Self::new(entries.into_iter().map(|(k, e)| (k.to_owned(), e)).collect())
    }
}
