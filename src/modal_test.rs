use super::*;
use crate::body::BodyStyle;

// =============================================================
// Helpers
// =============================================================

fn lock() -> ScrollLock {
    ScrollLock::new(BodyStyle { overflow: String::new(), padding_right: String::new() }, 12.0)
}

fn text_of(actions: &[Action], slot: ModalSlot) -> Option<&str> {
    actions.iter().find_map(|a| match a {
        Action::SetText { target: Target::Modal(s), text } if *s == slot => Some(text.as_str()),
        _ => None,
    })
}

// =============================================================
// Content binding
// =============================================================

#[test]
fn every_builtin_key_binds_exact_text() {
    let content = ContentMap::builtin();
    for key in content.keys() {
        let mut lock = lock();
        let mut modal = ModalController::new(ModalMount::all());
        let actions = modal.open_with_content(key, &content, Some(ElementId(1)), &mut lock);
        let entry = content.get(key).expect("entry");
        assert!(modal.is_open(), "{key}");
        assert_eq!(text_of(&actions, ModalSlot::Title), Some(entry.title.as_str()));
        assert_eq!(text_of(&actions, ModalSlot::Synopsis), Some(entry.synopsis.as_str()));
        assert_eq!(modal.active_key(), Some(key));
    }
}

#[test]
fn unknown_key_is_noop() {
    let content = ContentMap::builtin();
    let mut lock = lock();
    let mut modal = ModalController::new(ModalMount::all());
    let actions = modal.open_with_content("trabajo-99", &content, Some(ElementId(1)), &mut lock);
    assert!(actions.is_empty());
    assert!(!modal.is_open());
    assert!(!lock.is_locked());
}

#[test]
fn missing_title_slot_disables_modal() {
    let content = ContentMap::builtin();
    let mut lock = lock();
    let mount = ModalMount { title: false, ..ModalMount::all() };
    let mut modal = ModalController::new(mount);
    assert!(modal.open_with_content("sobre", &content, None, &mut lock).is_empty());
    assert!(!modal.is_open());
}

#[test]
fn missing_label_falls_back_to_default() {
    let content = ContentMap::from_json(r#"{"k": {"title": "T", "synopsis": "S"}}"#).expect("parse");
    let mut lock = lock();
    let mut modal = ModalController::new(ModalMount::all());
    let actions = modal.open_with_content("k", &content, None, &mut lock);
    assert_eq!(text_of(&actions, ModalSlot::Label), Some("Detalle"));
    assert!(actions.contains(&Action::SetHtml { target: Target::Modal(ModalSlot::Details), html: String::new() }));
    assert!(actions.contains(&Action::ClearMedia));
}

#[test]
fn optional_slots_are_skipped_when_absent() {
    let content = ContentMap::builtin();
    let mut lock = lock();
    let mount = ModalMount { label: false, details: false, media: false, close: false, ..ModalMount::all() };
    let mut modal = ModalController::new(mount);
    let actions = modal.open_with_content("trabajo-1", &content, None, &mut lock);
    assert!(modal.is_open());
    assert!(text_of(&actions, ModalSlot::Label).is_none());
    assert!(!actions.iter().any(|a| matches!(a, Action::SetHtml { .. } | Action::MountMedia { .. })));
    assert!(!actions.iter().any(|a| matches!(a, Action::Focus(_))));
}

#[test]
fn open_mounts_entry_media_and_focuses_close() {
    let content = ContentMap::builtin();
    let mut lock = lock();
    let mut modal = ModalController::new(ModalMount::all());
    let actions = modal.open_with_content("trabajo-3", &content, None, &mut lock);
    assert!(actions.contains(&Action::MountMedia { src: "assets/proyecto-03.mp4".into() }));
    assert_eq!(actions.last(), Some(&Action::Focus(Target::Modal(ModalSlot::Close))));
}

// =============================================================
// Exclusivity
// =============================================================

#[test]
fn reopening_replaces_content_in_place_and_keeps_trigger() {
    let content = ContentMap::builtin();
    let mut lock = lock();
    let mut modal = ModalController::new(ModalMount::all());
    modal.open_with_content("trabajo-1", &content, Some(ElementId(10)), &mut lock);
    let actions = modal.open_with_content("trabajo-2", &content, Some(ElementId(11)), &mut lock);

    assert_eq!(text_of(&actions, ModalSlot::Title), Some("Presencia discreta"));
    assert_eq!(modal.active_key(), Some("trabajo-2"));
    assert_eq!(modal.trigger(), Some(ElementId(10)));
    // Already open: no second class/lock change.
    assert!(!actions.iter().any(|a| matches!(a, Action::AddClass { .. } | Action::SetBodyStyle(_))));
}

// =============================================================
// Close
// =============================================================

#[test]
fn close_pauses_media_restores_body_and_focus() {
    let content = ContentMap::builtin();
    let mut lock = lock();
    let before = lock.current().clone();
    let mut modal = ModalController::new(ModalMount::all());
    modal.open_with_content("trabajo-2", &content, Some(ElementId(4)), &mut lock);
    let actions = modal.close(&mut lock);

    assert!(!modal.is_open());
    assert!(modal.active_key().is_none());
    assert_eq!(
        actions.first(),
        Some(&Action::PauseMedia { target: Target::Disclosure(DisclosureId::Modal), rewind: true })
    );
    assert!(actions.contains(&Action::SetBodyStyle(before.clone())));
    assert_eq!(lock.current(), &before);
    assert_eq!(actions.last(), Some(&Action::Focus(Target::Element(ElementId(4)))));
}

#[test]
fn close_when_closed_is_noop() {
    let mut lock = lock();
    let mut modal = ModalController::new(ModalMount::all());
    assert!(modal.close(&mut lock).is_empty());
}

// =============================================================
// Focus trap
// =============================================================

#[test]
fn trap_tab_wraps_last_to_first() {
    let content = ContentMap::builtin();
    let mut lock = lock();
    let mut modal = ModalController::new(ModalMount::all());
    modal.open_with_content("sobre", &content, None, &mut lock);

    let scope = FocusScope { focusables: vec![ElementId(20), ElementId(21), ElementId(22)], active: Some(ElementId(22)) };
    let actions = modal.trap_tab(&scope, TabDirection::Forward);
    assert_eq!(actions, vec![Action::PreventDefault, Action::Focus(Target::Element(ElementId(20)))]);
}

#[test]
fn trap_tab_with_no_focusables_only_prevents_default() {
    let content = ContentMap::builtin();
    let mut lock = lock();
    let mut modal = ModalController::new(ModalMount::all());
    modal.open_with_content("sobre", &content, None, &mut lock);
    assert_eq!(modal.trap_tab(&FocusScope::default(), TabDirection::Backward), vec![Action::PreventDefault]);
}

#[test]
fn trap_tab_when_closed_does_nothing() {
    let modal = ModalController::new(ModalMount::all());
    let scope = FocusScope { focusables: vec![ElementId(1)], active: None };
    assert!(modal.trap_tab(&scope, TabDirection::Forward).is_empty());
}
