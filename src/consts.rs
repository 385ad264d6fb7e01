//! Default values for the site configuration.

// ── Theme ───────────────────────────────────────────────────────

/// `localStorage` key holding the theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Attribute on `<html>` consumed by the stylesheet.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Media query reporting an OS-level dark preference.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

// ── Navigation ──────────────────────────────────────────────────

/// Offset added to `scrollY` before testing section bounds.
pub const NAV_PROBE_OFFSET_PX: f64 = 100.0;

/// Header gets the scrolled class once `scrollY` passes this value.
pub const HEADER_SCROLL_THRESHOLD_PX: f64 = 50.0;

// ── Reveal ──────────────────────────────────────────────────────

/// Delay between consecutive skill bars filling in.
pub const SKILL_STAGGER_MS: u32 = 100;

/// Fraction of a section that must be visible before it reveals.
pub const SECTION_REVEAL_THRESHOLD: f64 = 0.1;

// ── Form ────────────────────────────────────────────────────────

/// Time a status message stays up before reverting to neutral.
pub const STATUS_CLEAR_MS: u32 = 5_000;

pub const MSG_SENDING: &str = "Sending…";
pub const MSG_SUCCESS: &str = "Thank you! Your message has been sent successfully.";
pub const MSG_FAILURE: &str = "Oops! There was a problem sending your message. Please try again.";
pub const MSG_INVALID: &str = "Please fill in all fields with valid information.";

// ── Polyfills ───────────────────────────────────────────────────

/// Duration of the manual smooth-scroll animation.
pub const SMOOTH_SCROLL_DURATION_MS: f64 = 600.0;

/// Root margin used when observing lazy images.
pub const LAZY_ROOT_MARGIN: &str = "50px";
