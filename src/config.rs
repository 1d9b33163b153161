//! Page configuration: timings, storage key, theme classes, observed sections.
//!
//! A page may embed a JSON object in `<script type="application/json"
//! id="page-config">`; every field is optional and falls back to the values
//! below.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::visibility::{ObserveMode, ObserveSpec};

/// Matches the menu's CSS close transition.
pub const DEFAULT_MENU_CLOSE_DELAY_MS: u32 = 520;
pub const DEFAULT_REVEAL_STAGGER_MS: u32 = 90;
pub const DEFAULT_CONSENT_STORAGE_KEY: &str = "cookie-preferences";
pub const DEFAULT_THEME_CLASSES: [&str; 4] = ["bg-hero", "bg-works-dark", "bg-light", "bg-focus-dark"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid page config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("threshold {threshold} for '{selector}' is outside 0..=1")]
    Threshold { selector: String, threshold: f64 },
    #[error("theme '{theme}' for '{selector}' is not in theme_classes")]
    UnknownTheme { selector: String, theme: String },
}

/// One observed section: every element matching `selector` gets `mode`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionConfig {
    pub selector: String,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(flatten)]
    pub mode: ObserveMode,
}

impl SectionConfig {
    fn new(selector: &str, spec: ObserveSpec) -> Self {
        Self { selector: selector.to_owned(), threshold: spec.threshold, mode: spec.mode }
    }

    #[must_use]
    pub fn spec(&self) -> ObserveSpec {
        ObserveSpec { mode: self.mode.clone(), threshold: self.threshold }
    }
}

fn default_threshold() -> f64 {
    0.2
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Delay between closing the menu and starting a scroll navigation.
    pub menu_close_delay_ms: u32,
    /// Per-item transition delay for reveals in the same batch.
    pub reveal_stagger_ms: u32,
    pub consent_storage_key: String,
    /// Every class a theme section may put on `<body>`.
    pub theme_classes: Vec<String>,
    pub sections: Vec<SectionConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            menu_close_delay_ms: DEFAULT_MENU_CLOSE_DELAY_MS,
            reveal_stagger_ms: DEFAULT_REVEAL_STAGGER_MS,
            consent_storage_key: DEFAULT_CONSENT_STORAGE_KEY.to_owned(),
            theme_classes: DEFAULT_THEME_CLASSES.map(String::from).to_vec(),
            sections: vec![
                SectionConfig::new(".work", ObserveSpec::persistent("bg-works-dark", 0.35, false)),
                SectionConfig::new(".work", ObserveSpec::one_shot("is-active", 0.35, false)),
                SectionConfig::new("[data-exit-works]", ObserveSpec::persistent("bg-light", 0.6, false)),
                SectionConfig::new(".focus", ObserveSpec::persistent("bg-focus-dark", 0.35, true)),
                SectionConfig::new(".reveal", ObserveSpec::one_shot("is-visible", 0.2, true)),
                SectionConfig::new("[data-hero-video]", ObserveSpec::autoplay(0.25)),
            ],
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON,
    /// [`ConfigError::Threshold`] for thresholds outside `0..=1`, and
    /// [`ConfigError::UnknownTheme`] for themes missing from `theme_classes`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse `raw` if present, falling back to defaults on any error.
    #[must_use]
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("using default page config: {err}");
                Self::default()
            }
        }
    }

    /// Sorted, de-duplicated thresholds for the shared intersection observer.
    #[must_use]
    pub fn thresholds(&self) -> Vec<f64> {
        let mut out: Vec<f64> = self.sections.iter().map(|s| s.threshold).collect();
        out.sort_by(f64::total_cmp);
        out.dedup();
        out
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for section in &self.sections {
            if !(0.0..=1.0).contains(&section.threshold) {
                return Err(ConfigError::Threshold { selector: section.selector.clone(), threshold: section.threshold });
            }
            if let ObserveMode::Persistent { theme, .. } = &section.mode {
                if !self.theme_classes.contains(theme) {
                    return Err(ConfigError::UnknownTheme { selector: section.selector.clone(), theme: theme.clone() });
                }
            }
        }
        Ok(())
    }
}
