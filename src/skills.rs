//! Staggered skill-bar fill, played once when the skills section is first seen.

#[cfg(test)]
#[path = "skills_test.rs"]
mod skills_test;

use crate::reveal::OneShot;

/// Width a bar should fill to.
///
/// `data-width` wins when it parses as a number (a trailing `%` is allowed);
/// it is read as a percentage and clamped to `0..=100`. Otherwise the bar's
/// inline `style.width` is used as-is.
#[must_use]
pub fn target_width(data_width: Option<&str>, inline_width: &str) -> Option<String> {
    let from_data = data_width
        .map(|raw| raw.trim().trim_end_matches('%').trim())
        .and_then(|raw| raw.parse::<f64>().map_or(None, |v| v.is_finite().then_some(v)))
        .map(|pct| format!("{}%", pct.clamp(0.0, 100.0)));
    from_data.or_else(|| {
        let inline = inline_width.trim();
        (!inline.is_empty()).then(|| inline.to_owned())
    })
}

/// A single scheduled fill: after `delay_ms`, bar `index` gets `width`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillStep {
    pub index: usize,
    pub delay_ms: u32,
    pub width: String,
}

/// Fill schedule for the skills section.
#[derive(Debug)]
pub struct SkillReveal {
    trigger: OneShot,
    widths: Vec<Option<String>>,
    stagger_ms: u32,
}

impl SkillReveal {
    /// `widths[i]` is bar `i`'s target; bars without one are skipped.
    #[must_use]
    pub fn new(widths: Vec<Option<String>>, stagger_ms: u32) -> Self {
        Self { trigger: OneShot::default(), widths, stagger_ms }
    }

    #[must_use]
    pub fn has_animated(&self) -> bool {
        self.trigger.is_triggered()
    }

    /// Bars collapsed to zero before the fill. A bar with no target keeps
    /// whatever width the page gave it.
    #[must_use]
    pub fn bars_to_collapse(&self) -> Vec<usize> {
        self.widths.iter().enumerate().filter(|(_, width)| width.is_some()).map(|(index, _)| index).collect()
    }

    /// Handle an intersection report for the skills section. Returns the
    /// fill schedule the first time the section is visible, nothing after.
    pub fn on_intersect(&mut self, intersecting: bool) -> Option<Vec<FillStep>> {
        if !intersecting || !self.trigger.fire() {
            return None;
        }
        let steps = self
            .widths
            .iter()
            .enumerate()
            .filter_map(|(index, width)| {
                let delay_ms = u32::try_from(index).map_or(u32::MAX, |i| i.saturating_mul(self.stagger_ms));
                width.clone().map(|width| FillStep { index, delay_ms, width })
            })
            .collect();
        Some(steps)
    }
}

#[cfg(feature = "hydrate")]
pub use browser::SkillAnimator;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use web_sys::{Document, HtmlElement};

    use super::{SkillReveal, target_width};
    use crate::config::SiteConfig;
    use crate::dom::{self, Observer};
    use crate::error::DomError;

    fn set_width(bar: &HtmlElement, width: &str) {
        dom::log_failure("skill width", bar.style().set_property("width", width));
    }

    /// Watches the skills section and fills its bars once.
    pub struct SkillAnimator {
        _observer: Option<Observer>,
    }

    impl SkillAnimator {
        /// Zero every bar that has a target and start watching the section. A page without a
        /// skills section gets an inert animator.
        ///
        /// # Errors
        ///
        /// Returns [`DomError`] for an invalid selector or observer options.
        pub fn attach(document: &Document, config: &SiteConfig) -> Result<Self, DomError> {
            let bars = Rc::new(dom::query_all::<HtmlElement>(document, &config.selectors.skill_bars)?);
            let widths = bars
                .iter()
                .map(|bar| {
                    let inline = bar.style().get_property_value("width").unwrap_or_default();
                    target_width(bar.get_attribute("data-width").as_deref(), &inline)
                })
                .collect();
            let reveal = Rc::new(RefCell::new(SkillReveal::new(widths, config.timings.skill_stagger_ms)));

            let Some(section) = dom::query(document, &config.selectors.skills_section)? else {
                log::debug!("skills: no skills section, animator idle");
                return Ok(Self { _observer: None });
            };
            for index in reveal.borrow().bars_to_collapse() {
                if let Some(bar) = bars.get(index) {
                    set_width(bar, "0");
                }
            }

            let reveal_cb = Rc::clone(&reveal);
            let observer = Observer::new(0.0, None, move |entries, observer| {
                let intersecting = entries.iter().any(web_sys::IntersectionObserverEntry::is_intersecting);
                let Some(steps) = reveal_cb.borrow_mut().on_intersect(intersecting) else {
                    return;
                };
                observer.disconnect();
                log::debug!("skills: filling {} bars", steps.len());
                for step in steps {
                    let Some(bar) = bars.get(step.index).cloned() else {
                        continue;
                    };
                    Timeout::new(step.delay_ms, move || set_width(&bar, &step.width)).forget();
                }
            })?;
            observer.observe(&section);
            Ok(Self { _observer: Some(observer) })
        }

        /// Disconnect the observer.
        pub fn dispose(self) {}
    }
}
