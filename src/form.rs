//! Contact form validation and submission lifecycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form posts to a third-party endpoint named by its `action` attribute.
//! Validation runs synchronously before anything leaves the page; the POST
//! runs on the local executor so the rest of the page stays responsive.
//!
//! ERROR HANDLING
//! ==============
//! Visitors only ever see three fixed messages (invalid input, sent, failed).
//! The specific [`ValidationError`] or [`SubmitError`] goes to the log.
//! There is no retry and no de-duplication: each submit is its own request.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::fmt;

use crate::consts::{MSG_FAILURE, MSG_INVALID, MSG_SENDING, MSG_SUCCESS};

/// Named fields of the contact form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// The `name` attribute of the form control.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a message was not sent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Empty(Field),
    #[error("email address is malformed")]
    BadEmail,
}

/// Why a valid message did not go through.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("request could not be built: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("endpoint returned status {0}")]
    Status(u16),
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a `.` in the
/// domain with something on both sides of it.
#[must_use]
pub fn is_valid_email(raw: &str) -> bool {
    let email = raw.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Whether the element after the form may stand in for a missing status
/// element. Only a live region qualifies, so unrelated markup is never
/// overwritten.
#[must_use]
pub fn is_status_region(role: Option<&str>, aria_live: Option<&str>) -> bool {
    role.is_some_and(|role| role.trim().eq_ignore_ascii_case("status"))
        || aria_live.is_some_and(|live| !live.trim().is_empty() && !live.trim().eq_ignore_ascii_case("off"))
}

/// Field values read from the form on a submit attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Build from a lookup by field name; missing fields read as empty.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(Field) -> Option<String>,
    {
        let mut read = |field| lookup(field).unwrap_or_default();
        Self {
            name: read(Field::Name),
            email: read(Field::Email),
            subject: read(Field::Subject),
            message: read(Field::Message),
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Every field non-blank after trimming, then a well-formed email.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in field order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(field) = Field::ALL.into_iter().find(|f| self.get(*f).trim().is_empty()) {
            return Err(ValidationError::Empty(field));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::BadEmail);
        }
        Ok(())
    }
}

/// Styling bucket of the status element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Neutral,
    Pending,
    Success,
    Error,
}

/// What the status element should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: &'static str,
}

impl StatusMessage {
    pub const NEUTRAL: Self = Self { kind: StatusKind::Neutral, text: "" };
    pub const SENDING: Self = Self { kind: StatusKind::Pending, text: MSG_SENDING };
    pub const SENT: Self = Self { kind: StatusKind::Success, text: MSG_SUCCESS };
    pub const FAILED: Self = Self { kind: StatusKind::Error, text: MSG_FAILURE };
    pub const INVALID: Self = Self { kind: StatusKind::Error, text: MSG_INVALID };
}

/// Where the form is in its submit cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// What the binding should do after a state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Effect {
    pub status: StatusMessage,
    /// Issue the POST.
    pub send: bool,
    /// Clear the form's fields.
    pub reset_fields: bool,
    /// Start the revert-to-neutral timer.
    pub schedule_clear: bool,
}

/// Submit lifecycle: `Idle → Pending → {Succeeded, Failed} → Idle`.
#[derive(Debug, Default)]
pub struct FormState {
    phase: FormPhase,
    in_flight: usize,
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Requests sent and not yet completed.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// A submit attempt with the current field values.
    pub fn submit(&mut self, message: &ContactMessage) -> Effect {
        match message.validate() {
            Ok(()) => {
                self.phase = FormPhase::Pending;
                self.in_flight += 1;
                Effect { status: StatusMessage::SENDING, send: true, reset_fields: false, schedule_clear: false }
            }
            Err(err) => {
                log::info!("form: not sent: {err}");
                self.phase = FormPhase::Failed;
                Effect { status: StatusMessage::INVALID, send: false, reset_fields: false, schedule_clear: true }
            }
        }
    }

    /// A request issued by [`FormState::submit`] finished.
    pub fn complete(&mut self, result: Result<(), SubmitError>) -> Effect {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(()) => {
                self.phase = FormPhase::Succeeded;
                Effect { status: StatusMessage::SENT, send: false, reset_fields: true, schedule_clear: true }
            }
            Err(err) => {
                log::warn!("form: submission failed: {err}");
                self.phase = FormPhase::Failed;
                Effect { status: StatusMessage::FAILED, send: false, reset_fields: false, schedule_clear: true }
            }
        }
    }

    /// The status timer elapsed.
    pub fn clear(&mut self) -> StatusMessage {
        if self.in_flight == 0 {
            self.phase = FormPhase::Idle;
        }
        StatusMessage::NEUTRAL
    }
}

#[cfg(feature = "hydrate")]
pub use browser::FormHandler;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, FormData, HtmlFormElement};

    use super::{ContactMessage, Effect, FormState, StatusKind, StatusMessage, SubmitError, is_status_region};
    use crate::config::{Classes, SiteConfig};
    use crate::dom::{self, Listener};
    use crate::error::DomError;

    struct StatusView {
        el: Option<Element>,
        classes: Classes,
    }

    impl StatusView {
        fn show(&self, status: StatusMessage) {
            let Some(el) = &self.el else {
                return;
            };
            el.set_text_content(Some(status.text));
            let classes = &self.classes;
            dom::set_class(el, &classes.status_pending, status.kind == StatusKind::Pending);
            dom::set_class(el, &classes.status_success, status.kind == StatusKind::Success);
            dom::set_class(el, &classes.status_error, status.kind == StatusKind::Error);
        }
    }

    struct Context {
        form: HtmlFormElement,
        state: RefCell<FormState>,
        status: StatusView,
        clear_ms: u32,
    }

    impl Context {
        fn apply(self: &Rc<Self>, effect: Effect) {
            self.status.show(effect.status);
            if effect.reset_fields {
                self.form.reset();
            }
            if effect.schedule_clear {
                let ctx = Rc::clone(self);
                Timeout::new(self.clear_ms, move || {
                    let neutral = ctx.state.borrow_mut().clear();
                    ctx.status.show(neutral);
                })
                .forget();
            }
        }
    }

    fn status_sibling(form: &HtmlFormElement) -> Option<Element> {
        let sibling = form.next_element_sibling()?;
        if is_status_region(sibling.get_attribute("role").as_deref(), sibling.get_attribute("aria-live").as_deref()) {
            log::debug!("form: using the live region after the form for status");
            Some(sibling)
        } else {
            log::debug!("form: no status element, messages will not be shown");
            None
        }
    }

    fn read_message(data: &FormData) -> ContactMessage {
        ContactMessage::from_lookup(|field| data.get(field.as_str()).as_string())
    }

    async fn post(url: &str, body: FormData) -> Result<(), SubmitError> {
        let resp = gloo_net::http::Request::post(url)
            .header("Accept", "application/json")
            .body(body)
            .map_err(|e| SubmitError::Build(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        match resp.status() {
            200..=299 => Ok(()),
            status => Err(SubmitError::Status(status)),
        }
    }

    /// Validates and posts the contact form.
    pub struct FormHandler {
        _submit: Listener,
    }

    impl FormHandler {
        /// Bind the contact form. Returns `Ok(None)` when the page has none.
        ///
        /// # Errors
        ///
        /// Returns [`DomError`] for an invalid selector or a rejected listener.
        pub fn attach(document: &Document, config: &SiteConfig) -> Result<Option<Self>, DomError> {
            let Some(form) = dom::query(document, &config.selectors.contact_form)? else {
                log::debug!("form: no contact form");
                return Ok(None);
            };
            let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
                return Err(DomError::Missing(format!("{} is not a form", config.selectors.contact_form)));
            };
            let status_el = match dom::query(document, &config.selectors.form_status)? {
                Some(el) => Some(el),
                None => status_sibling(&form),
            };
            let ctx = Rc::new(Context {
                form,
                state: RefCell::new(FormState::new()),
                status: StatusView { el: status_el, classes: config.classes.clone() },
                clear_ms: config.timings.status_clear_ms,
            });

            let ctx_cb = Rc::clone(&ctx);
            let submit = Listener::new(&ctx.form, "submit", move |event| {
                event.prevent_default();
                let data = match FormData::new_with_form(&ctx_cb.form) {
                    Ok(data) => data,
                    Err(err) => {
                        log::warn!("form: cannot read fields: {}", DomError::from(err));
                        ctx_cb.apply(Effect {
                            status: StatusMessage::FAILED,
                            send: false,
                            reset_fields: false,
                            schedule_clear: true,
                        });
                        return;
                    }
                };
                let effect = ctx_cb.state.borrow_mut().submit(&read_message(&data));
                ctx_cb.apply(effect);
                if !effect.send {
                    return;
                }
                let ctx_task = Rc::clone(&ctx_cb);
                let url = ctx_cb.form.action();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = post(&url, data).await;
                    let effect = ctx_task.state.borrow_mut().complete(result);
                    ctx_task.apply(effect);
                });
            })?;
            Ok(Some(Self { _submit: submit }))
        }

        /// Detach the submit listener. Requests already in flight still finish.
        pub fn dispose(self) {}
    }
}
