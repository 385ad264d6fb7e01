//! Page-ready boot and the page-lifetime controller registry.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM start function waits for the document to finish parsing, reads
//! the optional config block, installs console logging, then attaches every
//! controller in [`BOOT_ORDER`]. Controllers never talk to each other; the
//! registry only exists to keep their listeners alive and to offer a single
//! `dispose` entry point.
//!
//! ERROR HANDLING
//! ==============
//! A controller that fails to attach is logged and skipped. The rest of the
//! page still boots.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::fmt;

use crate::config::{ConfigError, SiteConfig};

/// The independently attached features.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    Theme,
    Navigation,
    Skills,
    Sections,
    Form,
    SmoothScroll,
    LazyLoad,
    Visibility,
}

/// Attach order at page-ready. Scroll listeners fire in this order too.
pub const BOOT_ORDER: [Feature; 8] = [
    Feature::Theme,
    Feature::Navigation,
    Feature::Skills,
    Feature::Sections,
    Feature::Form,
    Feature::SmoothScroll,
    Feature::LazyLoad,
    Feature::Visibility,
];

impl Feature {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Navigation => "navigation",
            Self::Skills => "skills",
            Self::Sections => "sections",
            Self::Form => "form",
            Self::SmoothScroll => "smooth-scroll",
            Self::LazyLoad => "lazy-load",
            Self::Visibility => "visibility",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a feature's attach went.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attach {
    Bound,
    /// The page has no element for it.
    Absent,
    Failed(String),
}

/// Per-feature attach results, in boot order.
#[derive(Debug, Default)]
pub struct BootReport {
    entries: Vec<(Feature, Attach)>,
}

impl BootReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, feature: Feature, outcome: Attach) {
        if let Attach::Failed(reason) = &outcome {
            log::warn!("{feature}: not attached: {reason}");
        }
        self.entries.push((feature, outcome));
    }

    #[must_use]
    pub fn outcome(&self, feature: Feature) -> Option<&Attach> {
        self.entries.iter().find(|(f, _)| *f == feature).map(|(_, outcome)| outcome)
    }

    #[must_use]
    pub fn features(&self) -> Vec<Feature> {
        self.entries.iter().map(|(f, _)| *f).collect()
    }

    fn count(&self, pred: impl Fn(&Attach) -> bool) -> usize {
        self.entries.iter().filter(|(_, outcome)| pred(outcome)).count()
    }

    /// One-line summary for the boot log.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} bound, {} absent, {} failed",
            self.count(|o| *o == Attach::Bound),
            self.count(|o| *o == Attach::Absent),
            self.count(|o| matches!(o, Attach::Failed(_))),
        )
    }
}

/// Config from the page's optional JSON block. A malformed block yields the
/// defaults plus the error, so it can be logged once logging is up.
#[must_use]
pub fn load_config(raw: Option<&str>) -> (SiteConfig, Option<ConfigError>) {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return (SiteConfig::default(), None);
    };
    match SiteConfig::from_json(raw) {
        Ok(config) => (config, None),
        Err(err) => (SiteConfig::default(), Some(err)),
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{dispose, start};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::wasm_bindgen;
    use web_sys::{Document, DocumentReadyState, Window};

    use super::{Attach, BOOT_ORDER, BootReport, Feature, load_config};
    use crate::config::{CONFIG_ELEMENT_ID, SiteConfig};
    use crate::dom::{self, Listener};
    use crate::error::DomError;
    use crate::form::FormHandler;
    use crate::lazy_load::LazyLoader;
    use crate::navigation::NavigationManager;
    use crate::sections::SectionAnimator;
    use crate::skills::SkillAnimator;
    use crate::smooth_scroll::SmoothScroll;
    use crate::theme::ThemeManager;
    use crate::visibility::VisibilityWatcher;

    /// Every attached controller. Dropping this detaches them all.
    #[derive(Default)]
    struct Controllers {
        theme: Option<ThemeManager>,
        navigation: Option<NavigationManager>,
        skills: Option<SkillAnimator>,
        sections: Option<SectionAnimator>,
        form: Option<FormHandler>,
        smooth_scroll: Option<SmoothScroll>,
        lazy_load: Option<LazyLoader>,
        visibility: Option<VisibilityWatcher>,
    }

    thread_local! {
        static CONTROLLERS: RefCell<Option<Controllers>> = const { RefCell::new(None) };
        static READY: RefCell<Option<Listener>> = const { RefCell::new(None) };
    }

    fn settle<T>(report: &mut BootReport, feature: Feature, result: Result<Option<T>, DomError>) -> Option<T> {
        match result {
            Ok(Some(controller)) => {
                report.record(feature, Attach::Bound);
                Some(controller)
            }
            Ok(None) => {
                report.record(feature, Attach::Absent);
                None
            }
            Err(err) => {
                report.record(feature, Attach::Failed(err.to_string()));
                None
            }
        }
    }

    fn boot(window: &Window, document: &Document, config: &SiteConfig) {
        let mut report = BootReport::new();
        let mut controllers = Controllers::default();
        for feature in BOOT_ORDER {
            match feature {
                Feature::Theme => {
                    controllers.theme = settle(&mut report, feature, ThemeManager::attach(document, config).map(Some));
                }
                Feature::Navigation => {
                    controllers.navigation =
                        settle(&mut report, feature, NavigationManager::attach(window, document, config).map(Some));
                }
                Feature::Skills => {
                    controllers.skills = settle(&mut report, feature, SkillAnimator::attach(document, config).map(Some));
                }
                Feature::Sections => {
                    controllers.sections =
                        settle(&mut report, feature, SectionAnimator::attach(document, config).map(Some));
                }
                Feature::Form => {
                    controllers.form = settle(&mut report, feature, FormHandler::attach(document, config));
                }
                Feature::SmoothScroll => {
                    controllers.smooth_scroll =
                        settle(&mut report, feature, SmoothScroll::attach(window, document, config).map(Some));
                }
                Feature::LazyLoad => {
                    controllers.lazy_load = settle(&mut report, feature, LazyLoader::attach(document, config).map(Some));
                }
                Feature::Visibility => {
                    controllers.visibility =
                        settle(&mut report, feature, VisibilityWatcher::attach(document, config).map(Some));
                }
            }
        }
        log::info!("portfolio: {}", report.summary());
        CONTROLLERS.with(|slot| *slot.borrow_mut() = Some(controllers));
    }

    fn read_config(document: &Document) -> Option<String> {
        document.get_element_by_id(CONFIG_ELEMENT_ID)?.text_content()
    }

    /// WASM entry point.
    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let (window, document) = match (dom::window(), dom::document()) {
            (Ok(window), Ok(document)) => (window, document),
            _ => return,
        };
        let (config, config_err) = load_config(read_config(&document).as_deref());
        if console_log::init_with_level(config.log_level().unwrap_or(log::Level::Info)).is_err() {
            log::debug!("portfolio: logger already installed");
        }
        if let Some(err) = config_err {
            log::warn!("portfolio: {err}, using defaults");
        }

        if document.ready_state() != DocumentReadyState::Loading {
            boot(&window, &document, &config);
            return;
        }
        let document_cb = document.clone();
        let mut config = Some(config);
        match Listener::new(&document, "DOMContentLoaded", move |_| {
            if let Some(config) = config.take() {
                boot(&window, &document_cb, &config);
            }
        }) {
            Ok(listener) => READY.with(|slot| *slot.borrow_mut() = Some(listener)),
            Err(err) => log::warn!("portfolio: cannot wait for page ready: {err}"),
        }
    }

    /// Detach every controller. The page keeps working as plain HTML.
    #[wasm_bindgen]
    pub fn dispose() {
        if let Some(controllers) = CONTROLLERS.with(|slot| slot.borrow_mut().take()) {
            let Controllers { theme, navigation, skills, sections, form, smooth_scroll, lazy_load, visibility } =
                controllers;
            if let Some(controller) = theme {
                controller.dispose();
            }
            if let Some(controller) = navigation {
                controller.dispose();
            }
            if let Some(controller) = skills {
                controller.dispose();
            }
            if let Some(controller) = sections {
                controller.dispose();
            }
            if let Some(controller) = form {
                controller.dispose();
            }
            if let Some(controller) = smooth_scroll {
                controller.dispose();
            }
            if let Some(controller) = lazy_load {
                controller.dispose();
            }
            if let Some(controller) = visibility {
                controller.dispose();
            }
            log::info!("portfolio: controllers disposed");
        }
    }
}
