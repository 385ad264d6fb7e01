//! Smooth anchor scrolling for browsers without CSS `scroll-behavior`.
//!
//! When the platform supports it natively this controller does nothing.
//! Otherwise same-page anchor clicks are intercepted and the scroll is
//! animated frame by frame.

#[cfg(test)]
#[path = "smooth_scroll_test.rs"]
mod smooth_scroll_test;

/// Cubic ease-in-out over `t` in `0..=1`. Values outside are clamped.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 { 4.0 * t * t * t } else { 1.0 - (-2.0 * t + 2.0).powi(3) / 2.0 }
}

/// One frame of a scroll animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub y: f64,
    pub done: bool,
}

/// Scroll from `from` to `to` over `duration_ms`, timed by frame timestamps.
#[derive(Clone, Copy, Debug)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl ScrollAnimation {
    #[must_use]
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self { from, to, duration_ms, started_at: None }
    }

    /// Position for the frame at `now_ms`. The first call fixes the start time.
    pub fn step(&mut self, now_ms: f64) -> Frame {
        let started = *self.started_at.get_or_insert(now_ms);
        if self.duration_ms <= 0.0 {
            return Frame { y: self.to, done: true };
        }
        let progress = ((now_ms - started) / self.duration_ms).clamp(0.0, 1.0);
        if progress >= 1.0 {
            return Frame { y: self.to, done: true };
        }
        let y = self.from + (self.to - self.from) * ease_in_out_cubic(progress);
        Frame { y, done: false }
    }
}

/// How a same-page scroll is carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPath {
    /// `scrollTo` with `behavior: smooth`.
    Native,
    /// Frame-by-frame [`ScrollAnimation`].
    Animated,
}

impl ScrollPath {
    #[must_use]
    pub fn detect(native_supported: bool) -> Self {
        if native_supported { Self::Native } else { Self::Animated }
    }
}

/// The one scroll animation in flight. A new target replaces the current
/// animation, so a single frame loop drives the page at any time.
#[derive(Debug, Default)]
pub struct ScrollSlot {
    current: Option<ScrollAnimation>,
}

impl ScrollSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `animation`. Returns `true` when no frame loop is running and
    /// one has to be started.
    pub fn replace(&mut self, animation: ScrollAnimation) -> bool {
        let idle = self.current.is_none();
        self.current = Some(animation);
        idle
    }

    /// Advance the current animation. `None` once the slot is empty; the
    /// final frame empties it.
    pub fn step(&mut self, now_ms: f64) -> Option<Frame> {
        let frame = self.current.as_mut()?.step(now_ms);
        if frame.done {
            self.current = None;
        }
        Some(frame)
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{SmoothScroll, scroll_to};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

    use super::{ScrollAnimation, ScrollPath, ScrollSlot};
    use crate::config::SiteConfig;
    use crate::dom::{self, Listener};
    use crate::error::DomError;
    use crate::navigation::fragment_id;

    thread_local! {
        static SLOT: RefCell<ScrollSlot> = RefCell::new(ScrollSlot::new());
        // Created on first use and kept, so the loop never drops the closure it is running in.
        static FRAME: RefCell<Option<Closure<dyn FnMut(f64)>>> = const { RefCell::new(None) };
    }

    fn supports_native(document: &Document) -> bool {
        let Some(root) = document.document_element().and_then(|el| el.dyn_ref::<HtmlElement>().cloned()) else {
            return false;
        };
        js_sys::Reflect::has(&root.style(), &JsValue::from_str("scrollBehavior")).unwrap_or(false)
    }

    fn request_frame(window: &Window) {
        FRAME.with_borrow_mut(|frame| {
            let callback = frame.get_or_insert_with(|| {
                let window = window.clone();
                Closure::<dyn FnMut(f64)>::new(move |now: f64| on_frame(&window, now))
            });
            if let Err(err) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::warn!("smooth scroll: no animation frame: {}", DomError::from(err));
                SLOT.with_borrow_mut(ScrollSlot::cancel);
            }
        });
    }

    fn on_frame(window: &Window, now: f64) {
        let Some(frame) = SLOT.with_borrow_mut(|slot| slot.step(now)) else {
            return;
        };
        window.scroll_to_with_x_and_y(0.0, frame.y);
        if !frame.done {
            request_frame(window);
        }
    }

    /// Scroll the page to `top`, smoothly either way: natively when the
    /// browser can, otherwise through the shared animation slot.
    pub fn scroll_to(window: &Window, document: &Document, top: f64, duration_ms: f64) {
        match ScrollPath::detect(supports_native(document)) {
            ScrollPath::Native => {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            }
            ScrollPath::Animated => {
                let from = window.scroll_y().unwrap_or(0.0);
                let idle = SLOT.with_borrow_mut(|slot| slot.replace(ScrollAnimation::new(from, top, duration_ms)));
                if idle {
                    request_frame(window);
                }
            }
        }
    }

    /// Intercepts anchor clicks when native smooth scrolling is missing.
    pub struct SmoothScroll {
        _listeners: Vec<Listener>,
    }

    impl SmoothScroll {
        /// # Errors
        ///
        /// Returns [`DomError`] for an invalid selector or a rejected listener.
        pub fn attach(window: &Window, document: &Document, config: &SiteConfig) -> Result<Self, DomError> {
            if supports_native(document) {
                log::debug!("smooth scroll: native support, fallback idle");
                return Ok(Self { _listeners: Vec::new() });
            }
            let duration = config.timings.smooth_scroll_ms;
            let mut listeners = Vec::new();
            for anchor in dom::query_all::<Element>(document, &config.selectors.anchors)? {
                let window_cb = window.clone();
                let document_cb = document.clone();
                let anchor_cb = anchor.clone();
                listeners.push(Listener::new(&anchor, "click", move |event| {
                    // Nav links scroll themselves.
                    if event.default_prevented() {
                        return;
                    }
                    let Some(href) = anchor_cb.get_attribute("href") else {
                        return;
                    };
                    let Some(target) = fragment_id(&href)
                        .and_then(|id| document_cb.get_element_by_id(id))
                        .and_then(|el| el.dyn_ref::<HtmlElement>().cloned())
                    else {
                        return;
                    };
                    event.prevent_default();
                    scroll_to(&window_cb, &document_cb, f64::from(target.offset_top()), duration);
                })?);
            }
            log::debug!("smooth scroll: fallback bound to {} anchors", listeners.len());
            Ok(Self { _listeners: listeners })
        }

        /// Detach every anchor listener.
        pub fn dispose(self) {}
    }
}
