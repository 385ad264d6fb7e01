//! Thin `web-sys` glue shared by the browser bindings.
//!
//! SYSTEM CONTEXT
//! ==============
//! Controllers hold [`Listener`] and [`Observer`] handles instead of leaking
//! closures. Dropping a handle detaches it from the document, which is what
//! each controller's `dispose()` relies on.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::error::DomError;

/// The global `window`.
///
/// # Errors
///
/// Returns [`DomError::NoWindow`] outside a browser.
pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

/// The global `document`.
///
/// # Errors
///
/// Returns [`DomError::NoWindow`] or [`DomError::NoDocument`].
pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

/// First element matching `selector`, if any.
///
/// # Errors
///
/// Returns [`DomError::Js`] when the selector is invalid.
pub fn query(document: &Document, selector: &str) -> Result<Option<Element>, DomError> {
    Ok(document.query_selector(selector)?)
}

/// All elements matching `selector` that can be cast to `T`, in DOM order.
///
/// # Errors
///
/// Returns [`DomError::Js`] when the selector is invalid.
pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Result<Vec<T>, DomError> {
    let list = document.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        if let Some(node) = list.item(index) {
            if let Ok(el) = node.dyn_into::<T>() {
                out.push(el);
            }
        }
    }
    Ok(out)
}

/// Log a failed DOM call instead of discarding it.
pub fn log_failure<T>(context: &str, result: Result<T, JsValue>) {
    if let Err(err) = result {
        log::warn!("{context}: {}", DomError::from(err));
    }
}

/// Add or remove `class` on `el`.
pub fn set_class(el: &Element, class: &str, on: bool) {
    log_failure("class toggle", el.class_list().toggle_with_force(class, on));
}

/// Set a boolean ARIA attribute such as `aria-pressed`.
pub fn set_aria(el: &Element, name: &str, value: bool) {
    log_failure("aria update", el.set_attribute(name, if value { "true" } else { "false" }));
}

/// An event listener that stays attached until dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Attach `handler` for `event` on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Js`] if the browser rejects the registration.
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, DomError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), event, callback })
    }

    /// Attach a passive listener, for high-rate events like `scroll`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Js`] if the browser rejects the registration.
    pub fn passive<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, DomError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), event, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        log_failure(
            self.event,
            self.target
                .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref()),
        );
    }
}

/// A view-intersection observer that disconnects when dropped.
pub struct Observer {
    inner: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Observer {
    /// Create an observer. `handler` receives the entries of each batch and
    /// the observer itself so it can unobserve targets.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Js`] if the platform rejects the options.
    pub fn new<F>(threshold: f64, root_margin: Option<&str>, mut handler: F) -> Result<Self, DomError>
    where
        F: FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
    {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let mut batch = Vec::with_capacity(entries.length() as usize);
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        batch.push(entry);
                    }
                }
                handler(batch, &observer);
            },
        );
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            init.set_root_margin(margin);
        }
        let inner = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok(Self { inner, _callback: callback })
    }

    pub fn observe(&self, target: &Element) {
        self.inner.observe(target);
    }

    pub fn disconnect(&self) {
        self.inner.disconnect();
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.inner.disconnect();
    }
}
