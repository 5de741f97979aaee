use folio_core::error::CoreError;

/// Message used when an error carries no text of its own.
const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors from the CMS client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The CMS returned a non-2xx status code.
    #[error("CMS API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or the call's static message.
        message: String,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// An admin call was attempted without a stored token.
    #[error("Not logged in")]
    NotAuthenticated,

    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing the persisted token failed.
    #[error("Token store error: {0}")]
    TokenStore(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Core(CoreError::NotFound { .. })) || self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Text suitable for showing to a person. Never empty.
    pub fn user_message(&self) -> String {
        let message = match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::NotAuthenticated => "Please log in to continue.".to_string(),
            ClientError::Core(CoreError::Validation(message)) => message.clone(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_is_shown_verbatim() {
        let err = ClientError::Api {
            status: 500,
            message: "Failed to fetch blogs".into(),
        };
        assert_eq!(err.user_message(), "Failed to fetch blogs");
        assert!(!err.is_not_found());
    }

    #[test]
    fn blank_message_falls_back() {
        let err = ClientError::Api {
            status: 502,
            message: "  ".into(),
        };
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn classification_by_status() {
        let not_found = ClientError::Api {
            status: 404,
            message: "Blog not found".into(),
        };
        let unauthorized = ClientError::Api {
            status: 401,
            message: "Could not validate credentials".into(),
        };
        assert!(not_found.is_not_found());
        assert!(unauthorized.is_unauthorized());
        assert!(!ClientError::NotAuthenticated.is_unauthorized());
    }

    #[test]
    fn validation_error_shows_its_message() {
        let err = ClientError::from(CoreError::Validation("Title is required".into()));
        assert_eq!(err.user_message(), "Title is required");
    }
}
