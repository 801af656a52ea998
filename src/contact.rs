//! Contact form state machine.
//!
//! The generated page submits through `static/contact.js`, but the lifecycle
//! lives here as typed Rust: field edits, validation, the submit guard, the
//! relay handoff, and the post-success reset. `contact.js` mirrors this module
//! field for field (same predicates, same messages, same 3-second reset), and
//! `monofolio send-test` drives the same machine from the terminal, so a relay
//! misconfiguration shows up before the site ships.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──submit──▶ Submitting ──ok──▶ Success ──3s──▶ Idle (fields cleared)
//!   ▲                   │
//!   │                   └──err──▶ Error (fields kept for retry)
//!   └── update_field / reset ──┘
//! ```
//!
//! Validation failures never leave Idle; a submit with placeholder relay
//! credentials goes straight to Error without touching the network.

use crate::config::RelayConfig;
use crate::relay::{RelayRequest, RelayTransport, TemplateParams};
use std::time::{Duration, Instant};

/// How long the success banner shows before the form clears back to idle.
pub const SUCCESS_RESET: Duration = Duration::from_secs(3);

/// Minimum message length after trimming.
pub const MIN_MESSAGE_LEN: usize = 10;

// Status messages, shared with the generated contact.js.
pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters";
pub const NOT_CONFIGURED: &str =
    "The contact form is not set up yet. Use the email address below instead.";
pub const SEND_FAILED: &str =
    "Something went wrong sending your message. Please try again or use the email address below.";
pub const SEND_SUCCESS: &str = "Message sent! I'll get back to you soon.";

/// A validated message, built from the form fields at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

/// Per-field validation messages. `None` means the field is clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Submitting,
    Success,
    Error(String),
}

/// The form controller.
///
/// Owns the three field values, their validation state, and the submit
/// lifecycle. Construct once per form with the relay credentials and the
/// resolved recipient address.
pub struct ContactForm {
    relay: RelayConfig,
    to_email: String,
    name: String,
    email: String,
    message: String,
    errors: ValidationErrors,
    status: Status,
    reset_at: Option<Instant>,
}

impl ContactForm {
    /// `fallback_to_email` is used when the relay config leaves `to_email`
    /// empty; in practice that is the profile email.
    pub fn new(relay: RelayConfig, fallback_to_email: &str) -> Self {
        let to_email = if relay.to_email.is_empty() {
            fallback_to_email.to_string()
        } else {
            relay.to_email.clone()
        };
        Self {
            relay,
            to_email,
            name: String::new(),
            email: String::new(),
            message: String::new(),
            errors: ValidationErrors::default(),
            status: Status::Idle,
            reset_at: None,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Set a field's value, clearing any error it was showing.
    ///
    /// The clear is optimistic: editing a flagged field hides its message
    /// immediately rather than re-validating on every keystroke. Other
    /// fields' errors stay put.
    pub fn update_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.name = value.to_string(),
            Field::Email => self.email = value.to_string(),
            Field::Message => self.message = value.to_string(),
        }
        *self.errors.slot(field) = None;
    }

    /// Recompute all three field errors. Returns true when submittable.
    pub fn validate(&mut self) -> bool {
        self.errors.name = if self.name.trim().is_empty() {
            Some(NAME_REQUIRED.to_string())
        } else {
            None
        };

        let email = self.email.trim();
        self.errors.email = if email.is_empty() {
            Some(EMAIL_REQUIRED.to_string())
        } else if !is_valid_email(email) {
            Some(EMAIL_INVALID.to_string())
        } else {
            None
        };

        let message = self.message.trim();
        self.errors.message = if message.is_empty() {
            Some(MESSAGE_REQUIRED.to_string())
        } else if message.chars().count() < MIN_MESSAGE_LEN {
            Some(MESSAGE_TOO_SHORT.to_string())
        } else {
            None
        };

        self.errors.is_empty()
    }

    /// Validate and, if clean, send through the transport.
    ///
    /// Placeholder relay credentials short-circuit to [`Status::Error`]
    /// before any network call. Transport failures land in the same state
    /// with the fields intact so the visitor can retry; success arms the
    /// auto-reset deadline checked by [`poll_auto_reset`](Self::poll_auto_reset).
    pub fn submit(&mut self, transport: &impl RelayTransport) {
        if self.status == Status::Submitting {
            return;
        }
        if !self.validate() {
            return;
        }
        if !self.relay.is_configured() {
            self.status = Status::Error(NOT_CONFIGURED.to_string());
            return;
        }

        self.status = Status::Submitting;
        let message = ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        let request = self.build_request(&message);

        match transport.send(&request) {
            Ok(()) => {
                self.status = Status::Success;
                self.reset_at = Some(Instant::now() + SUCCESS_RESET);
            }
            Err(_) => {
                self.status = Status::Error(SEND_FAILED.to_string());
                self.reset_at = None;
            }
        }
    }

    /// Apply the post-success reset once its deadline has passed.
    ///
    /// The deadline is data rather than a timer so `send-test` and the unit
    /// tests can drive time explicitly; the page script uses a plain 3s
    /// timeout for the same transition.
    pub fn poll_auto_reset(&mut self, now: Instant) {
        if let Some(deadline) = self.reset_at
            && now >= deadline
        {
            self.reset();
        }
    }

    /// Clear fields, errors, and status back to a blank idle form.
    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.errors = ValidationErrors::default();
        self.status = Status::Idle;
        self.reset_at = None;
    }

    fn build_request(&self, message: &ContactMessage) -> RelayRequest {
        RelayRequest {
            service_id: self.relay.service_id.clone(),
            template_id: self.relay.template_id.clone(),
            user_id: self.relay.public_key.clone(),
            template_params: TemplateParams {
                from_name: message.name.clone(),
                from_email: message.email.clone(),
                message: message.message.clone(),
                to_email: self.to_email.clone(),
                reply_to: message.email.clone(),
            },
        }
    }
}

/// Shape check for `local@domain.tld`.
///
/// Deliberately loose: no whitespace anywhere, exactly one `@`, a non-empty
/// local part, and a dot inside the domain with characters on both sides.
/// Real deliverability is the relay's problem.
pub fn is_valid_email(email: &str) -> bool {
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
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}
