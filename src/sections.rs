//! One-shot slide-up reveal for every section.

#[cfg(test)]
#[path = "sections_test.rs"]
mod sections_test;

use crate::reveal::RevealSet;

/// Reveal state for the page's sections, keyed by DOM order.
#[derive(Debug, Default)]
pub struct SectionReveal {
    sections: RevealSet<usize>,
}

impl SectionReveal {
    #[must_use]
    pub fn new(count: usize) -> Self {
        let mut sections = RevealSet::new();
        for index in 0..count {
            sections.track(index);
        }
        Self { sections }
    }

    /// Whether section `index` should play its reveal now.
    pub fn on_intersect(&mut self, index: usize, intersecting: bool) -> bool {
        intersecting && self.sections.fire(&index)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.sections.pending()
    }
}

#[cfg(feature = "hydrate")]
pub use browser::SectionAnimator;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_sys::{Document, Element};

    use super::SectionReveal;
    use crate::config::SiteConfig;
    use crate::dom::{self, Observer};
    use crate::error::DomError;

    /// Adds the reveal class to each section the first time it is seen.
    pub struct SectionAnimator {
        _observer: Option<Observer>,
    }

    impl SectionAnimator {
        /// # Errors
        ///
        /// Returns [`DomError`] for an invalid selector or observer options.
        pub fn attach(document: &Document, config: &SiteConfig) -> Result<Self, DomError> {
            let sections = dom::query_all::<Element>(document, &config.selectors.sections)?;
            let reveal = Rc::new(RefCell::new(SectionReveal::new(sections.len())));
            if sections.is_empty() {
                log::debug!("sections: nothing to reveal");
                return Ok(Self { _observer: None });
            }

            let class = config.classes.section_reveal.clone();
            let reveal_cb = Rc::clone(&reveal);
            let tracked = sections.clone();
            let observer = Observer::new(config.timings.section_threshold, None, move |entries, observer| {
                for entry in entries {
                    let target = entry.target();
                    let Some(index) = tracked.iter().position(|el| *el == target) else {
                        continue;
                    };
                    if reveal_cb.borrow_mut().on_intersect(index, entry.is_intersecting()) {
                        dom::set_class(&target, &class, true);
                        observer.unobserve(&target);
                    }
                }
            })?;
            for section in &sections {
                observer.observe(section);
            }
            log::debug!("sections: observing {}", sections.len());
            Ok(Self { _observer: Some(observer) })
        }

        /// Disconnect the observer.
        pub fn dispose(self) {}
    }
}
