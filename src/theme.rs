//! Light/dark theme preference.
//!
//! Reads the stored preference from `localStorage` and applies a
//! `data-theme` attribute to the `<html>` element. Toggle writes back to
//! `localStorage`, updates that attribute and the toggle's `aria-pressed`.
//!
//! TRADE-OFFS
//! ==========
//! The OS dark preference only wins when nothing is stored, so a visitor who
//! never toggled follows the OS while an explicit choice always sticks. An
//! unstorable choice (quota, disabled storage) still applies for the current
//! page, it just does not survive a reload.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::collections::HashMap;

use crate::consts::THEME_STORAGE_KEY;

/// The two supported color schemes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value written to storage and to `data-theme`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything but `light`/`dark` is ignored.
    #[must_use]
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// State of the toggle's `aria-pressed` for this theme.
    #[must_use]
    pub fn pressed(self) -> bool {
        self == Self::Dark
    }
}

/// Effective theme at startup from the stored value and the OS preference.
#[must_use]
pub fn resolve_theme(stored: Option<&str>, os_prefers_dark: bool) -> Theme {
    match stored.and_then(Theme::from_stored) {
        Some(theme) => theme,
        None if os_prefers_dark => Theme::Dark,
        None => Theme::Light,
    }
}

/// Error returned by [`PreferenceStore::save`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("preference storage unavailable")]
    Unavailable,
    #[error("preference write rejected: {0}")]
    Rejected(String),
}

/// Key/value persistence for the preference.
pub trait PreferenceStore {
    /// Stored value for `key`. Read failures look like an absent value.
    fn load(&self, key: &str) -> Option<String>;

    /// Persist `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing store refuses the write.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store for tests and non-browser callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value` under `key`.
    #[must_use]
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_owned(), value.to_owned());
        store
    }

    /// A store whose writes all fail, like a full or disabled `localStorage`.
    #[must_use]
    pub fn read_only() -> Self {
        Self { reject_writes: true, ..Self::default() }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::Rejected("quota exceeded".to_owned()));
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Current theme plus the store it persists into.
#[derive(Debug)]
pub struct ThemeState<S> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemeState<S> {
    /// Resolve the startup theme. Nothing is written to the store.
    pub fn load(store: S, os_prefers_dark: bool) -> Self {
        let stored = store.load(THEME_STORAGE_KEY);
        let current = resolve_theme(stored.as_deref(), os_prefers_dark);
        Self { store, current }
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist it. Returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.toggled())
    }

    /// Make `theme` current and persist it. A failed write is logged and the
    /// theme still takes effect for this page.
    pub fn set(&mut self, theme: Theme) -> Theme {
        self.current = theme;
        if let Err(err) = self.store.save(THEME_STORAGE_KEY, theme.as_str()) {
            log::warn!("theme: {err}");
        }
        theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{LocalStorage, ThemeManager};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_sys::{Document, Element, Storage};

    use super::{PreferenceStore, StoreError, Theme, ThemeState};
    use crate::config::SiteConfig;
    use crate::consts::{PREFERS_DARK_QUERY, THEME_ATTRIBUTE};
    use crate::dom::{self, Listener};
    use crate::error::DomError;

    /// `window.localStorage`, or nothing when storage is disabled.
    pub struct LocalStorage(Option<Storage>);

    impl LocalStorage {
        #[must_use]
        pub fn open() -> Self {
            let storage = match web_sys::window().map(|w| w.local_storage()) {
                Some(Ok(storage)) => storage,
                Some(Err(err)) => {
                    log::warn!("theme: localStorage unavailable: {}", DomError::from(err));
                    None
                }
                None => None,
            };
            Self(storage)
        }
    }

    impl PreferenceStore for LocalStorage {
        fn load(&self, key: &str) -> Option<String> {
            let storage = self.0.as_ref()?;
            match storage.get_item(key) {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("theme: storage read failed: {}", DomError::from(err));
                    None
                }
            }
        }

        fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            let storage = self.0.as_ref().ok_or(StoreError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|err| StoreError::Rejected(DomError::from(err).to_string()))
        }
    }

    fn os_prefers_dark() -> bool {
        match web_sys::window().map(|w| w.match_media(PREFERS_DARK_QUERY)) {
            Some(Ok(Some(query))) => query.matches(),
            _ => false,
        }
    }

    fn apply(root: Option<&Element>, toggle: Option<&Element>, theme: Theme) {
        if let Some(root) = root {
            dom::log_failure("theme attribute", root.set_attribute(THEME_ATTRIBUTE, theme.as_str()));
        }
        if let Some(toggle) = toggle {
            dom::set_aria(toggle, "aria-pressed", theme.pressed());
        }
    }

    /// Applies the startup theme and flips it on toggle clicks.
    pub struct ThemeManager {
        _click: Option<Listener>,
    }

    impl ThemeManager {
        /// Apply the resolved theme and bind the toggle control, if present.
        ///
        /// # Errors
        ///
        /// Returns [`DomError`] for an invalid selector or a rejected listener.
        pub fn attach(document: &Document, config: &SiteConfig) -> Result<Self, DomError> {
            let state = Rc::new(RefCell::new(ThemeState::load(LocalStorage::open(), os_prefers_dark())));
            let root = document.document_element();
            let toggle = dom::query(document, &config.selectors.theme_toggle)?;
            let initial = state.borrow().current();
            apply(root.as_ref(), toggle.as_ref(), initial);
            log::debug!("theme: initial {}", initial.as_str());

            let click = match toggle {
                Some(toggle) => {
                    let state = Rc::clone(&state);
                    let target = toggle.clone();
                    Some(Listener::new(&toggle, "click", move |_| {
                        let next = state.borrow_mut().toggle();
                        apply(root.as_ref(), Some(&target), next);
                    })?)
                }
                None => {
                    log::debug!("theme: no toggle control, preference is read-only");
                    None
                }
            };
            Ok(Self { _click: click })
        }

        /// Detach the toggle listener.
        pub fn dispose(self) {}
    }
}
