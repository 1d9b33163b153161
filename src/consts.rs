//! Shared constants: marker classes, attribute names, and default timings.

// ── Marker classes ──────────────────────────────────────────────

/// Applied to the menu, project modal, and consent dialog while open.
pub const CLASS_OPEN: &str = "is-open";

/// Applied to the consent banner while shown.
pub const CLASS_VISIBLE: &str = "is-visible";

/// Applied to a card while hovered or focused.
pub const CLASS_HOVERED: &str = "is-hovered";

/// Body class mirroring the menu's open state.
pub const CLASS_MENU_OPEN: &str = "menu-open";

/// Body class that suppresses CSS transitions for a single frame.
pub const CLASS_NO_TRANSITION: &str = "no-transition";

// ── Attributes ──────────────────────────────────────────────────

pub const ATTR_ARIA_HIDDEN: &str = "aria-hidden";

/// Dataset keys written on `<body>` by the consent controller.
pub const DATASET_ANALYTICS: &str = "analytics";
pub const DATASET_MARKETING: &str = "marketing";

// ── Content ─────────────────────────────────────────────────────

/// Label shown in the modal when an entry does not provide one.
pub const DEFAULT_MODAL_LABEL: &str = "Detalle";

// ── Body style ──────────────────────────────────────────────────

/// `overflow` value written on `<body>` while a scroll lock is held.
pub const LOCKED_OVERFLOW: &str = "hidden";

/// CSS property used to stagger batch reveals.
pub const STYLE_TRANSITION_DELAY: &str = "transition-delay";

// ── Media ───────────────────────────────────────────────────────

/// `DOMException` name a `play()` promise rejects with under autoplay policy.
pub const PLAY_NOT_ALLOWED: &str = "NotAllowedError";
