//! Pause CSS animations while the page is hidden.

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;

/// `animation-play-state` for a document that is or is not hidden.
#[must_use]
pub fn play_state(hidden: bool) -> &'static str {
    if hidden { "paused" } else { "running" }
}

#[cfg(feature = "hydrate")]
pub use browser::VisibilityWatcher;

#[cfg(feature = "hydrate")]
mod browser {
    use web_sys::{Document, HtmlElement};

    use super::play_state;
    use crate::config::SiteConfig;
    use crate::dom::{self, Listener};
    use crate::error::DomError;

    /// Listens for `visibilitychange` on the document.
    pub struct VisibilityWatcher {
        _listener: Listener,
    }

    impl VisibilityWatcher {
        /// # Errors
        ///
        /// Returns [`DomError`] if the listener is rejected.
        pub fn attach(document: &Document, config: &SiteConfig) -> Result<Self, DomError> {
            let document_cb = document.clone();
            let selector = config.selectors.animated.clone();
            let listener = Listener::new(document, "visibilitychange", move |_| {
                let state = play_state(document_cb.hidden());
                let animated = match dom::query_all::<HtmlElement>(&document_cb, &selector) {
                    Ok(animated) => animated,
                    Err(err) => {
                        log::warn!("visibility: {err}");
                        return;
                    }
                };
                for el in &animated {
                    dom::log_failure("play state", el.style().set_property("animation-play-state", state));
                }
                log::debug!("visibility: {state} {} animations", animated.len());
            })?;
            Ok(Self { _listener: listener })
        }

        /// Detach the listener.
        pub fn dispose(self) {}
    }
}
