//! Errors raised while binding controllers to the document.
//!
//! None of these are fatal to the page. Callers log them and leave the
//! affected feature unattached.

/// Failure talking to the browser document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// `window` is not available (not running in a browser).
    #[error("no window available")]
    NoWindow,
    /// `window.document` is not available.
    #[error("no document available")]
    NoDocument,
    /// An element the feature requires is absent.
    #[error("element not found: {0}")]
    Missing(String),
    /// A DOM call threw.
    #[error("dom call failed: {0}")]
    Js(String),
}

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for DomError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        use wasm_bindgen::JsCast;

        let message = value
            .as_string()
            .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}
