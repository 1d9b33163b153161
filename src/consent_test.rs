use serde_json::json;

use super::*;
use crate::body::BodyStyle;

// =============================================================
// Helpers
// =============================================================

const KEY: &str = "cookie-preferences";

/// Storage whose writes always fail.
struct ReadOnlyStorage;

impl PreferenceStorage for ReadOnlyStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, ConsentError> {
        Ok(None)
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), ConsentError> {
        Err(ConsentError::Storage("quota exceeded".into()))
    }
}

fn lock() -> ScrollLock {
    ScrollLock::new(BodyStyle::default(), 0.0)
}

fn controller(storage: MemoryStorage) -> ConsentController<MemoryStorage> {
    ConsentController::new(ConsentStore::new(storage, KEY), ConsentMount::all())
}

fn stored(ctrl: &ConsentController<MemoryStorage>) -> serde_json::Value {
    let raw = ctrl.store().storage().raw(KEY).expect("record");
    serde_json::from_str(raw).expect("json")
}

fn dataset(actions: &[Action], key: &str) -> Option<&'static str> {
    actions.iter().find_map(|a| match a {
        Action::SetDataset { key: k, value, .. } if *k == key => Some(*value),
        _ => None,
    })
}

// =============================================================
// ConsentPreferences
// =============================================================

#[test]
fn preferences_serialize_with_necessary_true() {
    let value = serde_json::to_value(ConsentPreferences::new(true, false)).expect("encode");
    assert_eq!(value, json!({ "analytics": true, "marketing": false, "necessary": true }));
}

#[test]
fn preferences_decode_forces_necessary_and_defaults_missing() {
    let prefs: ConsentPreferences = serde_json::from_str(r#"{"necessary": false}"#).expect("decode");
    assert!(prefs.necessary());
    assert!(!prefs.analytics);
    assert!(!prefs.marketing);
}

// =============================================================
// ConsentStore
// =============================================================

#[test]
fn save_then_load_round_trips_exact_record() {
    let mut store = ConsentStore::new(MemoryStorage::new(), KEY);
    let prefs = ConsentPreferences::new(true, false);
    store.save(&prefs).expect("save");

    assert_eq!(store.storage().raw(KEY), Some(r#"{"analytics":true,"marketing":false,"necessary":true}"#));
    assert_eq!(store.load(), Some(prefs));
}

#[test]
fn load_absent_is_undecided() {
    let store = ConsentStore::new(MemoryStorage::new(), KEY);
    assert!(store.load().is_none());
    assert!(matches!(store.try_load(), Ok(None)));
}

#[test]
fn corrupt_record_reads_as_undecided() {
    let store = ConsentStore::new(MemoryStorage::with_entry(KEY, "{not json"), KEY);
    assert!(matches!(store.try_load(), Err(ConsentError::Decode(_))));
    assert!(store.load().is_none());
}

#[test]
fn save_overwrites_rather_than_merges() {
    let mut store = ConsentStore::new(MemoryStorage::with_entry(KEY, r#"{"analytics":true,"extra":1}"#), KEY);
    store.save(&ConsentPreferences::reject_all()).expect("save");
    assert_eq!(store.storage().raw(KEY), Some(r#"{"analytics":false,"marketing":false,"necessary":true}"#));
}

// =============================================================
// ConsentController
// =============================================================

#[test]
fn first_visit_shows_banner() {
    let mut lock = lock();
    let mut ctrl = controller(MemoryStorage::new());
    let actions = ctrl.start(&mut lock);
    assert!(ctrl.is_banner_visible());
    assert!(ctrl.flags().is_none());
    assert!(actions.contains(&Action::add_class(Target::Disclosure(DisclosureId::ConsentBanner), "is-visible")));
}

#[test]
fn stored_record_is_applied_silently() {
    let mut lock = lock();
    let raw = r#"{"analytics":true,"marketing":false,"necessary":true}"#;
    let mut ctrl = controller(MemoryStorage::with_entry(KEY, raw));
    let actions = ctrl.start(&mut lock);
    assert!(!ctrl.is_banner_visible());
    assert_eq!(ctrl.flags(), Some(ConsentFlags { analytics: true, marketing: false }));
    assert_eq!(dataset(&actions, "analytics"), Some("on"));
    assert_eq!(dataset(&actions, "marketing"), Some("off"));
}

#[test]
fn reject_persists_all_false_and_hides_banner() {
    let mut lock = lock();
    let mut ctrl = controller(MemoryStorage::new());
    ctrl.start(&mut lock);
    let actions = ctrl.reject(&mut lock);

    assert_eq!(stored(&ctrl), json!({ "analytics": false, "marketing": false, "necessary": true }));
    assert!(!ctrl.is_banner_visible());
    assert!(actions.contains(&Action::remove_class(Target::Disclosure(DisclosureId::ConsentBanner), "is-visible")));
    assert_eq!(ctrl.flags(), Some(ConsentFlags { analytics: false, marketing: false }));
}

#[test]
fn accept_persists_all_true() {
    let mut lock = lock();
    let mut ctrl = controller(MemoryStorage::new());
    ctrl.start(&mut lock);
    ctrl.accept(&mut lock);
    assert_eq!(stored(&ctrl), json!({ "analytics": true, "marketing": true, "necessary": true }));
}

#[test]
fn save_applies_flags_and_closes_both_overlays() {
    let mut lock = lock();
    let mut ctrl = controller(MemoryStorage::new());
    ctrl.start(&mut lock);
    ctrl.open_settings(Some(ElementId(2)), &mut lock);
    assert!(ctrl.is_dialog_open());

    let actions = ctrl.save(ConsentPreferences::new(true, false), &mut lock);
    assert!(!ctrl.is_banner_visible());
    assert!(!ctrl.is_dialog_open());
    assert_eq!(dataset(&actions, "analytics"), Some("on"));
    assert_eq!(dataset(&actions, "marketing"), Some("off"));
    assert!(actions.contains(&Action::remove_class(Target::Disclosure(DisclosureId::ConsentDialog), "is-open")));
    assert_eq!(ctrl.store().load(), Some(ConsentPreferences::new(true, false)));
}

#[test]
fn settings_prefill_defaults_to_unchecked() {
    let mut lock = lock();
    let mut ctrl = controller(MemoryStorage::new());
    let actions = ctrl.open_settings(None, &mut lock);
    assert!(actions.contains(&Action::SetChecked {
        target: Target::ConsentToggle(ConsentCategory::Analytics),
        checked: false
    }));
    assert!(actions.contains(&Action::SetChecked {
        target: Target::ConsentToggle(ConsentCategory::Marketing),
        checked: false
    }));
}

#[test]
fn settings_prefill_from_stored_record() {
    let mut lock = lock();
    let raw = r#"{"analytics":false,"marketing":true,"necessary":true}"#;
    let mut ctrl = controller(MemoryStorage::with_entry(KEY, raw));
    let actions = ctrl.open_settings(None, &mut lock);
    assert!(actions.contains(&Action::SetChecked {
        target: Target::ConsentToggle(ConsentCategory::Marketing),
        checked: true
    }));
    assert!(actions.contains(&Action::SetChecked {
        target: Target::ConsentToggle(ConsentCategory::Analytics),
        checked: false
    }));
}

#[test]
fn close_settings_keeps_banner() {
    let mut lock = lock();
    let mut ctrl = controller(MemoryStorage::new());
    ctrl.start(&mut lock);
    ctrl.open_settings(Some(ElementId(2)), &mut lock);
    let actions = ctrl.close_settings(&mut lock);
    assert!(!ctrl.is_dialog_open());
    assert!(ctrl.is_banner_visible());
    assert!(actions.contains(&Action::Focus(Target::Element(ElementId(2)))));
}

#[test]
fn failed_write_still_applies_and_dismisses() {
    let mut lock = lock();
    let mut ctrl = ConsentController::new(ConsentStore::new(ReadOnlyStorage, KEY), ConsentMount::all());
    ctrl.start(&mut lock);
    let actions = ctrl.accept(&mut lock);
    assert!(!ctrl.is_banner_visible());
    assert_eq!(dataset(&actions, "analytics"), Some("on"));
}

#[test]
fn missing_dialog_disables_settings() {
    let mut lock = lock();
    let mount = ConsentMount { dialog: false, ..ConsentMount::all() };
    let mut ctrl = ConsentController::new(ConsentStore::new(MemoryStorage::new(), KEY), mount);
    assert!(ctrl.open_settings(None, &mut lock).is_empty());
    assert!(!ctrl.is_dialog_open());
}
