//! Navigation highlighting, header scroll styling and the mobile menu.
//!
//! SYSTEM CONTEXT
//! ==============
//! The active link is derived, never stored across layouts: every scroll
//! re-measures section bounds and probes `scrollY + offset`. A click marks
//! its link active straight away, ahead of the smooth scroll catching up.
//! Header styling is a second, independent scroll listener registered after
//! the highlight one.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

/// Vertical extent of a section in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    #[must_use]
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Half-open containment: `top <= y < top + height`.
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        self.top <= y && y < self.top + self.height
    }
}

/// Index of the link whose target section contains the probe point.
///
/// `targets[i]` holds the bounds of link `i`'s section, or `None` when the
/// section is missing. Overlaps resolve to the last match in link order.
#[must_use]
pub fn active_link(targets: &[Option<SectionBounds>], scroll_y: f64, probe_offset: f64) -> Option<usize> {
    let probe = scroll_y + probe_offset;
    targets
        .iter()
        .enumerate()
        .filter(|(_, bounds)| bounds.is_some_and(|b| b.contains(probe)))
        .map(|(index, _)| index)
        .last()
}

/// Whether the header should carry its scrolled class.
#[must_use]
pub fn header_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Element id targeted by a same-page `href`, e.g. `#about` → `about`.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Expanded/collapsed state of the mobile menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    expanded: bool,
}

impl MenuState {
    #[must_use]
    pub fn is_expanded(self) -> bool {
        self.expanded
    }

    /// Flip and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    pub fn close(&mut self) {
        self.expanded = false;
    }
}

/// Highlight and menu state for one navigation bar.
#[derive(Debug, Default)]
pub struct NavState {
    active: Option<usize>,
    menu: MenuState,
}

impl NavState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn menu(&self) -> MenuState {
        self.menu
    }

    /// Recompute the active link for the current scroll position.
    pub fn on_scroll(&mut self, targets: &[Option<SectionBounds>], scroll_y: f64, probe_offset: f64) -> Option<usize> {
        self.active = active_link(targets, scroll_y, probe_offset);
        self.active
    }

    /// A link was clicked: it becomes active and the menu collapses.
    pub fn on_link_click(&mut self, index: usize) {
        self.active = Some(index);
        self.menu.close();
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu.toggle()
    }
}

#[cfg(feature = "hydrate")]
pub use browser::NavigationManager;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlElement, Window};

    use super::{NavState, SectionBounds, fragment_id, header_scrolled};
    use crate::config::SiteConfig;
    use crate::dom::{self, Listener};
    use crate::error::DomError;
    use crate::smooth_scroll;

    struct NavLink {
        el: Element,
        target_id: Option<String>,
    }

    struct Bar {
        links: Vec<NavLink>,
        menu_toggle: Option<Element>,
        menu: Option<Element>,
        active_class: String,
        open_class: String,
    }

    impl Bar {
        fn target(&self, document: &Document, index: usize) -> Option<HtmlElement> {
            let id = self.links.get(index)?.target_id.as_deref()?;
            document.get_element_by_id(id)?.dyn_ref::<HtmlElement>().cloned()
        }

        fn measure(&self, document: &Document) -> Vec<Option<SectionBounds>> {
            (0..self.links.len())
                .map(|index| {
                    self.target(document, index)
                        .map(|el| SectionBounds::new(f64::from(el.offset_top()), f64::from(el.offset_height())))
                })
                .collect()
        }

        fn render(&self, state: &NavState) {
            for (index, link) in self.links.iter().enumerate() {
                dom::set_class(&link.el, &self.active_class, state.active() == Some(index));
            }
            let expanded = state.menu().is_expanded();
            if let Some(toggle) = &self.menu_toggle {
                dom::set_aria(toggle, "aria-expanded", expanded);
            }
            if let Some(menu) = &self.menu {
                dom::set_class(menu, &self.open_class, expanded);
            }
        }
    }

    fn scroll_y(window: &Window) -> Option<f64> {
        match window.scroll_y() {
            Ok(y) => Some(y),
            Err(err) => {
                log::warn!("navigation: scrollY unavailable: {}", DomError::from(err));
                None
            }
        }
    }

    /// Binds nav link clicks, the two scroll listeners and the menu toggle.
    pub struct NavigationManager {
        _listeners: Vec<Listener>,
    }

    impl NavigationManager {
        /// # Errors
        ///
        /// Returns [`DomError`] for an invalid selector or a rejected listener.
        pub fn attach(window: &Window, document: &Document, config: &SiteConfig) -> Result<Self, DomError> {
            let selectors = &config.selectors;
            let links = dom::query_all::<Element>(document, &selectors.nav_links)?
                .into_iter()
                .map(|el| {
                    let target_id = el
                        .get_attribute("href")
                        .and_then(|href| fragment_id(&href).map(str::to_owned));
                    NavLink { el, target_id }
                })
                .collect::<Vec<_>>();
            let bar = Rc::new(Bar {
                links,
                menu_toggle: dom::query(document, &selectors.menu_toggle)?,
                menu: dom::query(document, &selectors.menu)?,
                active_class: config.classes.active_link.clone(),
                open_class: config.classes.menu_open.clone(),
            });
            let state = Rc::new(RefCell::new(NavState::new()));
            let mut listeners = Vec::new();
            let duration = config.timings.smooth_scroll_ms;

            for index in 0..bar.links.len() {
                let bar_cb = Rc::clone(&bar);
                let state_cb = Rc::clone(&state);
                let window_cb = window.clone();
                let document_cb = document.clone();
                listeners.push(Listener::new(&bar.links[index].el, "click", move |event| {
                    if let Some(target) = bar_cb.target(&document_cb, index) {
                        event.prevent_default();
                        smooth_scroll::scroll_to(&window_cb, &document_cb, f64::from(target.offset_top()), duration);
                    }
                    let mut state = state_cb.borrow_mut();
                    state.on_link_click(index);
                    bar_cb.render(&state);
                })?);
            }

            {
                let bar_cb = Rc::clone(&bar);
                let state_cb = Rc::clone(&state);
                let window_cb = window.clone();
                let document_cb = document.clone();
                let offset = config.timings.nav_probe_offset_px;
                listeners.push(Listener::passive(window, "scroll", move |_| {
                    let Some(y) = scroll_y(&window_cb) else {
                        return;
                    };
                    let targets = bar_cb.measure(&document_cb);
                    let mut state = state_cb.borrow_mut();
                    state.on_scroll(&targets, y, offset);
                    bar_cb.render(&state);
                })?);
            }

            if let Some(header) = dom::query(document, &selectors.header)? {
                let window_cb = window.clone();
                let class = config.classes.header_scrolled.clone();
                let threshold = config.timings.header_threshold_px;
                listeners.push(Listener::passive(window, "scroll", move |_| {
                    if let Some(y) = scroll_y(&window_cb) {
                        dom::set_class(&header, &class, header_scrolled(y, threshold));
                    }
                })?);
            } else {
                log::debug!("navigation: no header element");
            }

            if let Some(toggle) = bar.menu_toggle.clone() {
                let bar_cb = Rc::clone(&bar);
                let state_cb = Rc::clone(&state);
                listeners.push(Listener::new(&toggle, "click", move |_| {
                    let mut state = state_cb.borrow_mut();
                    state.toggle_menu();
                    bar_cb.render(&state);
                })?);
            }

            log::debug!("navigation: bound {} links", bar.links.len());
            Ok(Self { _listeners: listeners })
        }

        /// Detach every navigation listener.
        pub fn dispose(self) {}
    }
}
