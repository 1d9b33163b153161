//! Cookie-consent preferences: persisted record, applied flags, and the
//! banner/settings dialog that collect them.
//!
//! LIFECYCLE
//! =========
//! No stored record means "undecided" and the banner is shown. A stored
//! record is applied silently on load. Every decision rewrites the whole
//! record; nothing is merged.
//!
//! The applied flags are only exposed as `data-analytics` / `data-marketing`
//! on `<body>`. Nothing here blocks third-party scripts; consumers gate on
//! the flags.

#[cfg(test)]
#[path = "consent_test.rs"]
mod consent_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::action::{Action, Target};
use crate::body::ScrollLock;
use crate::consts::{DATASET_ANALYTICS, DATASET_MARKETING};
use crate::disclosure::{Disclosure, DisclosureId};
use crate::input::ElementId;

#[derive(Debug, thiserror::Error)]
pub enum ConsentError {
    #[error("failed to decode stored consent record: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("consent storage unavailable: {0}")]
    Storage(String),
}

/// Optional consent categories the user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentCategory {
    Analytics,
    Marketing,
}

/// The persisted consent record. `necessary` is always true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredPreferences")]
pub struct ConsentPreferences {
    pub analytics: bool,
    pub marketing: bool,
    necessary: bool,
}

/// Wire shape accepted on load; missing categories read as rejected.
#[derive(Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    analytics: bool,
    #[serde(default)]
    marketing: bool,
}

impl From<StoredPreferences> for ConsentPreferences {
    fn from(raw: StoredPreferences) -> Self {
        Self::new(raw.analytics, raw.marketing)
    }
}

impl ConsentPreferences {
    #[must_use]
    pub fn new(analytics: bool, marketing: bool) -> Self {
        Self { analytics, marketing, necessary: true }
    }

    #[must_use]
    pub fn accept_all() -> Self {
        Self::new(true, true)
    }

    #[must_use]
    pub fn reject_all() -> Self {
        Self::new(false, false)
    }

    #[must_use]
    pub fn necessary(&self) -> bool {
        self.necessary
    }
}

/// Flags derived from the applied preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsentFlags {
    pub analytics: bool,
    pub marketing: bool,
}

/// Key/value persistence for the consent record.
pub trait PreferenceStorage {
    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsentError::Storage`] when the backing store is unavailable.
    fn read(&self, key: &str) -> Result<Option<String>, ConsentError>;

    /// Overwrite the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsentError::Storage`] when the write is refused.
    fn write(&mut self, key: &str, value: &str) -> Result<(), ConsentError>;
}

/// In-memory storage, used natively and when the browser store is unavailable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_owned(), value.to_owned());
        storage
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PreferenceStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, ConsentError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), ConsentError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Typed access to the consent record under one fixed key.
#[derive(Debug, Clone)]
pub struct ConsentStore<S> {
    storage: S,
    key: String,
}

impl<S: PreferenceStorage> ConsentStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read and decode the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ConsentError::Storage`] if the store cannot be read and
    /// [`ConsentError::Decode`] if the record is not valid JSON of the expected shape.
    pub fn try_load(&self) -> Result<Option<ConsentPreferences>, ConsentError> {
        let Some(raw) = self.storage.read(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Stored record, or `None` when absent or unreadable.
    pub fn load(&self) -> Option<ConsentPreferences> {
        match self.try_load() {
            Ok(prefs) => prefs,
            Err(err) => {
                log::warn!("ignoring stored consent: {err}");
                None
            }
        }
    }

    /// Overwrite the stored record with `prefs`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsentError`] if encoding or the write fails.
    pub fn save(&mut self, prefs: &ConsentPreferences) -> Result<(), ConsentError> {
        let raw = serde_json::to_string(prefs)?;
        self.storage.write(&self.key, &raw)
    }
}

/// Which consent elements were found in markup.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsentMount {
    pub banner: bool,
    pub dialog: bool,
    pub analytics_toggle: bool,
    pub marketing_toggle: bool,
}

impl ConsentMount {
    #[must_use]
    pub fn all() -> Self {
        Self { banner: true, dialog: true, analytics_toggle: true, marketing_toggle: true }
    }
}

#[derive(Debug, Clone)]
pub struct ConsentController<S> {
    store: ConsentStore<S>,
    mount: ConsentMount,
    flags: Option<ConsentFlags>,
    banner: Disclosure,
    dialog: Disclosure,
}

impl<S: PreferenceStorage> ConsentController<S> {
    pub fn new(store: ConsentStore<S>, mount: ConsentMount) -> Self {
        Self {
            store,
            mount,
            flags: None,
            banner: Disclosure::new(DisclosureId::ConsentBanner, mount.banner),
            dialog: Disclosure::new(DisclosureId::ConsentDialog, mount.dialog),
        }
    }

    #[must_use]
    pub fn store(&self) -> &ConsentStore<S> {
        &self.store
    }

    /// Flags from the last applied record; `None` while undecided.
    #[must_use]
    pub fn flags(&self) -> Option<ConsentFlags> {
        self.flags
    }

    #[must_use]
    pub fn is_banner_visible(&self) -> bool {
        self.banner.is_open()
    }

    #[must_use]
    pub fn is_dialog_open(&self) -> bool {
        self.dialog.is_open()
    }

    /// Page startup: apply a stored record or ask for a decision.
    pub fn start(&mut self, lock: &mut ScrollLock) -> Vec<Action> {
        match self.store.load() {
            Some(prefs) => self.apply(prefs),
            None => self.banner.open(None, lock),
        }
    }

    /// Expose `prefs` as body flags.
    pub fn apply(&mut self, prefs: ConsentPreferences) -> Vec<Action> {
        let flags = ConsentFlags { analytics: prefs.analytics, marketing: prefs.marketing };
        self.flags = Some(flags);
        vec![
            Action::SetDataset { target: Target::Body, key: DATASET_ANALYTICS, value: on_off(flags.analytics) },
            Action::SetDataset { target: Target::Body, key: DATASET_MARKETING, value: on_off(flags.marketing) },
        ]
    }

    /// Persist, apply, and dismiss both the banner and the settings dialog.
    pub fn save(&mut self, prefs: ConsentPreferences, lock: &mut ScrollLock) -> Vec<Action> {
        if let Err(err) = self.store.save(&prefs) {
            log::warn!("consent not persisted: {err}");
        }
        let mut actions = self.apply(prefs);
        actions.extend(self.banner.force_close(lock));
        actions.extend(self.dialog.force_close(lock));
        actions
    }

    pub fn accept(&mut self, lock: &mut ScrollLock) -> Vec<Action> {
        self.save(ConsentPreferences::accept_all(), lock)
    }

    pub fn reject(&mut self, lock: &mut ScrollLock) -> Vec<Action> {
        self.save(ConsentPreferences::reject_all(), lock)
    }

    /// Open the settings dialog with toggles pre-filled from the stored record.
    pub fn open_settings(&mut self, trigger: Option<ElementId>, lock: &mut ScrollLock) -> Vec<Action> {
        if !self.dialog.is_mounted() {
            return Vec::new();
        }
        let current = self.store.load();
        let mut actions = Vec::new();
        if self.mount.analytics_toggle {
            actions.push(Action::SetChecked {
                target: Target::ConsentToggle(ConsentCategory::Analytics),
                checked: current.is_some_and(|p| p.analytics),
            });
        }
        if self.mount.marketing_toggle {
            actions.push(Action::SetChecked {
                target: Target::ConsentToggle(ConsentCategory::Marketing),
                checked: current.is_some_and(|p| p.marketing),
            });
        }
        actions.extend(self.dialog.open(trigger, lock));
        actions
    }

    /// Hide the settings dialog only.
    pub fn close_settings(&mut self, lock: &mut ScrollLock) -> Vec<Action> {
        self.dialog.close(lock)
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
