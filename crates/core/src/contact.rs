//! Contact form message and its client-side validation.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Shown when the email field does not look like an address.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

/// Shown after a successful submission when the CMS returns no message.
pub const DEFAULT_THANK_YOU_MESSAGE: &str =
    "Thank you for your message! I will get back to you shortly.";

/// Loose shape check: something, `@`, something, `.`, something, no spaces.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Fields whose errors are reported first, in this order.
const FIELD_PRIORITY: [&str; 3] = ["email", "name", "message"];

/// A message submitted through the contact page (`POST /api/contact`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContactMessage {
    #[validate(length(min = 1, message = "Please enter your name."))]
    pub name: String,
    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_requirements: Option<String>,
    #[validate(length(min = 1, message = "Please enter a message."))]
    pub message: String,
}

/// Response body of `POST /api/contact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactReceipt {
    #[serde(default)]
    pub message: String,
}

impl ContactMessage {
    /// Validate before submission, returning the message to show the user.
    ///
    /// An invalid email wins over every other error.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(first_message(&errors)))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        return Ok(());
    }
    Err(ValidationError::new("email").with_message(Cow::Borrowed(INVALID_EMAIL_MESSAGE)))
}

fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    FIELD_PRIORITY
        .iter()
        .filter_map(|field| field_errors.get(*field).copied())
        .chain(field_errors.values().copied())
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Please check the form and try again.".to_string())
}
