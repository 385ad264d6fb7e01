//! Lazy image loading for browsers without `loading="lazy"`.
//!
//! Images carry their real source in `data-src`. With native support the
//! source is copied over immediately and the browser defers the fetch;
//! without it an observer swaps the source in as each image nears the
//! viewport.

#[cfg(test)]
#[path = "lazy_load_test.rs"]
mod lazy_load_test;

use crate::reveal::RevealSet;

/// Pending source swaps, keyed by image position in DOM order.
#[derive(Debug, Default)]
pub struct LazyImages {
    sources: Vec<Option<String>>,
    swaps: RevealSet<usize>,
}

impl LazyImages {
    /// Images with a blank `data-src` are left alone.
    #[must_use]
    pub fn new(sources: Vec<Option<String>>) -> Self {
        let sources: Vec<Option<String>> = sources
            .into_iter()
            .map(|src| src.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty()))
            .collect();
        let mut swaps = RevealSet::new();
        for (index, src) in sources.iter().enumerate() {
            if src.is_some() {
                swaps.track(index);
            }
        }
        Self { sources, swaps }
    }

    /// Source to load for image `index`, the first time it nears the viewport.
    pub fn on_intersect(&mut self, index: usize, intersecting: bool) -> Option<&str> {
        if !intersecting || !self.swaps.fire(&index) {
            return None;
        }
        self.sources.get(index)?.as_deref()
    }

    /// Every pending swap at once, for native lazy loading.
    pub fn drain_all(&mut self) -> Vec<(usize, String)> {
        let mut out = Vec::new();
        for (index, src) in self.sources.iter().enumerate() {
            if let Some(src) = src {
                if self.swaps.fire(&index) {
                    out.push((index, src.clone()));
                }
            }
        }
        out
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.swaps.pending()
    }
}

#[cfg(feature = "hydrate")]
pub use browser::LazyLoader;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsValue;
    use web_sys::{Document, Element, HtmlImageElement};

    use super::LazyImages;
    use crate::config::SiteConfig;
    use crate::dom::{self, Observer};
    use crate::error::DomError;

    const SOURCE_ATTRIBUTE: &str = "data-src";

    fn supports_native(document: &Document) -> bool {
        match document.create_element("img") {
            Ok(img) => js_sys::Reflect::has(&img, &JsValue::from_str("loading")).unwrap_or(false),
            Err(_) => false,
        }
    }

    fn swap(img: &HtmlImageElement, src: &str) {
        img.set_src(src);
        dom::log_failure("lazy image", img.remove_attribute(SOURCE_ATTRIBUTE));
    }

    /// Swaps `data-src` into `src` natively or on intersection.
    pub struct LazyLoader {
        _observer: Option<Observer>,
    }

    impl LazyLoader {
        /// # Errors
        ///
        /// Returns [`DomError`] for an invalid selector or observer options.
        pub fn attach(document: &Document, config: &SiteConfig) -> Result<Self, DomError> {
            let elements = dom::query_all::<HtmlImageElement>(document, &config.selectors.lazy_images)?;
            let images = Rc::new(RefCell::new(LazyImages::new(
                elements.iter().map(|img| img.get_attribute(SOURCE_ATTRIBUTE)).collect(),
            )));

            if supports_native(document) {
                for (index, src) in images.borrow_mut().drain_all() {
                    if let Some(img) = elements.get(index) {
                        dom::log_failure("lazy image", img.set_attribute("loading", "lazy"));
                        swap(img, &src);
                    }
                }
                log::debug!("lazy load: native support, {} images handed off", elements.len());
                return Ok(Self { _observer: None });
            }
            if elements.is_empty() {
                return Ok(Self { _observer: None });
            }

            let images_cb = Rc::clone(&images);
            let tracked = elements.clone();
            let observer = Observer::new(0.0, Some(config.timings.lazy_root_margin.as_str()), move |entries, observer| {
                for entry in entries {
                    let target = entry.target();
                    let Some(index) = tracked.iter().position(|img| {
                        let el: &Element = img;
                        *el == target
                    }) else {
                        continue;
                    };
                    let mut images = images_cb.borrow_mut();
                    if let Some(src) = images.on_intersect(index, entry.is_intersecting()) {
                        swap(&tracked[index], src);
                        observer.unobserve(&target);
                    }
                }
            })?;
            for img in &elements {
                observer.observe(img);
            }
            log::debug!("lazy load: observing {} images", elements.len());
            Ok(Self { _observer: Some(observer) })
        }

        /// Disconnect the observer.
        pub fn dispose(self) {}
    }
}
