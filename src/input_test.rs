use super::*;

// =============================================================
// Key
// =============================================================

#[test]
fn key_classifies_escape_and_tab() {
    assert!(Key::new("Escape").is_escape());
    assert!(!Key::new("Esc").is_escape());
    assert!(Key::new("Tab").is_tab());
    assert!(!Key::new("Tab").is_escape());
}

#[test]
fn key_activation_is_enter_or_space() {
    assert!(Key::new("Enter").is_activation());
    assert!(Key::new(" ").is_activation());
    assert!(!Key::new("Spacebar").is_activation());
    assert!(!Key::new("a").is_activation());
}

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
}

// =============================================================
// ElementId / FocusScope
// =============================================================

#[test]
fn element_ids_order_by_index() {
    assert!(ElementId(1) < ElementId(2));
    assert_eq!(ElementId(7), ElementId(7));
}

#[test]
fn focus_scope_default_is_empty() {
    let scope = FocusScope::default();
    assert!(scope.focusables.is_empty());
    assert!(scope.active.is_none());
}

#[test]
fn trigger_equality_includes_payload() {
    assert_eq!(
        Trigger::ModalOpen { key: "sobre".into() },
        Trigger::ModalOpen { key: "sobre".into() }
    );
    assert_ne!(
        Trigger::ModalOpen { key: "sobre".into() },
        Trigger::ModalOpen { key: "trabajo-1".into() }
    );
}
