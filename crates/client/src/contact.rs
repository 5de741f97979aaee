//! Contact page form.

use folio_core::contact::{ContactMessage, DEFAULT_THANK_YOU_MESSAGE, INVALID_EMAIL_MESSAGE};
use folio_core::error::CoreError;

use crate::api::CmsApi;
use crate::error::ClientError;
use crate::query::ServiceQuery;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success(String),
    Error(String),
}

/// State of the contact form between edits and submissions.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub message: ContactMessage,
    /// Inline error under the email field.
    pub email_error: Option<String>,
    pub status: SubmitStatus,
    /// Titles offered in the "service" dropdown.
    pub service_options: Vec<String>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the service dropdown from active services. A failure leaves the
    /// dropdown empty; the form still works.
    pub async fn load_service_options(&mut self, api: &CmsApi) {
        match api.services(&ServiceQuery::default()).await {
            Ok(services) => {
                self.service_options = services.into_iter().map(|s| s.title).collect();
            }
            Err(err) => tracing::warn!(error = %err, "Failed to load services for contact form"),
        }
    }

    /// Validate and send. Invalid input never reaches the network.
    pub async fn submit(&mut self, api: &CmsApi) -> &SubmitStatus {
        self.email_error = None;
        if let Err(CoreError::Validation(message)) = self.message.check() {
            if message == INVALID_EMAIL_MESSAGE {
                self.email_error = Some(message);
            } else {
                self.status = SubmitStatus::Error(message);
            }
            return &self.status;
        }

        self.status = match api.send_contact(&self.message).await {
            Ok(receipt) => {
                tracing::info!(email = %self.message.email, "Contact message sent");
                self.message = ContactMessage::default();
                let text = receipt.message.trim();
                SubmitStatus::Success(if text.is_empty() {
                    DEFAULT_THANK_YOU_MESSAGE.to_string()
                } else {
                    text.to_string()
                })
            }
            Err(err) => SubmitStatus::Error(contact_error_message(&err)),
        };
        &self.status
    }
}

fn contact_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
        ClientError::Api { .. } => "Failed to send contact message".to_string(),
        other => other.user_message(),
    }
}
