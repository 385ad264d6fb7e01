//! Site configuration: selectors, class names and timings.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page may embed a `<script type="application/json" id="site-config">`
//! block to override any field. Missing fields keep their defaults, so an
//! empty object and an absent block behave the same.
//!
//! ERROR HANDLING
//! ==============
//! A malformed block yields [`ConfigError`]; the boot path logs it and falls
//! back to [`SiteConfig::default`] instead of refusing to start.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::Deserialize;

use crate::consts;

/// Element id of the optional JSON config block.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Error returned by [`SiteConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The block is not valid JSON or has fields of the wrong type.
    #[error("invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
    /// `log_level` is not one of `error`, `warn`, `info`, `debug`, `trace`.
    #[error("invalid log level: {0}")]
    LogLevel(String),
}

/// CSS selectors locating the elements each controller binds to.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub theme_toggle: String,
    pub header: String,
    pub nav_links: String,
    pub menu_toggle: String,
    pub menu: String,
    pub skills_section: String,
    pub skill_bars: String,
    pub sections: String,
    pub contact_form: String,
    pub form_status: String,
    pub anchors: String,
    pub lazy_images: String,
    pub animated: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            theme_toggle: ".theme-toggle".to_owned(),
            header: "header".to_owned(),
            nav_links: ".nav-link".to_owned(),
            menu_toggle: ".nav-toggle".to_owned(),
            menu: ".nav-menu".to_owned(),
            skills_section: "#skills".to_owned(),
            skill_bars: ".skill-progress".to_owned(),
            sections: "section".to_owned(),
            contact_form: "#contact-form".to_owned(),
            form_status: "#form-status".to_owned(),
            anchors: "a[href^=\"#\"]".to_owned(),
            lazy_images: "img[data-src]".to_owned(),
            animated: "[class*=\"animate\"]".to_owned(),
        }
    }
}

/// Class names toggled on matched elements.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Classes {
    pub active_link: String,
    pub menu_open: String,
    pub header_scrolled: String,
    pub section_reveal: String,
    pub status_success: String,
    pub status_error: String,
    pub status_pending: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            active_link: "active".to_owned(),
            menu_open: "active".to_owned(),
            header_scrolled: "scrolled".to_owned(),
            section_reveal: "animate-slide-up".to_owned(),
            status_success: "success".to_owned(),
            status_error: "error".to_owned(),
            status_pending: "pending".to_owned(),
        }
    }
}

/// Numeric tuning knobs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub nav_probe_offset_px: f64,
    pub header_threshold_px: f64,
    pub skill_stagger_ms: u32,
    pub section_threshold: f64,
    pub status_clear_ms: u32,
    pub smooth_scroll_ms: f64,
    pub lazy_root_margin: String,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            nav_probe_offset_px: consts::NAV_PROBE_OFFSET_PX,
            header_threshold_px: consts::HEADER_SCROLL_THRESHOLD_PX,
            skill_stagger_ms: consts::SKILL_STAGGER_MS,
            section_threshold: consts::SECTION_REVEAL_THRESHOLD,
            status_clear_ms: consts::STATUS_CLEAR_MS,
            smooth_scroll_ms: consts::SMOOTH_SCROLL_DURATION_MS,
            lazy_root_margin: consts::LAZY_ROOT_MARGIN.to_owned(),
        }
    }
}

/// Complete configuration handed to every controller at boot.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub selectors: Selectors,
    pub classes: Classes,
    pub timings: Timings,
    /// Minimum console log level. `None` keeps the default of `info`.
    pub log_level: Option<String>,
}

impl SiteConfig {
    /// Parse a config block, filling unspecified fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::LogLevel`] for an unknown `log_level`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.log_level()?;
        Ok(config)
    }

    /// Effective console log level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogLevel`] when `log_level` does not name a level.
    pub fn log_level(&self) -> Result<log::Level, ConfigError> {
        match self.log_level.as_deref() {
            None => Ok(log::Level::Info),
            Some(raw) => log::Level::from_str(raw.trim()).map_err(|_| ConfigError::LogLevel(raw.to_owned())),
        }
    }
}
