use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Message used when a failed response carries no usable error text.
pub const GENERIC_API_FAILURE: &str = "API Request Failed";

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors returned by the query client, the processor client and the forms.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The query layer answered 404 for the requested record.
    #[error("{0}")]
    NotFound(String),

    /// Any other non-2xx response. `message` is taken from the body's
    /// `message` or `error` field when present.
    #[error("API request failed with status {status}: {}", .message.as_deref().unwrap_or(GENERIC_API_FAILURE))]
    Api { status: u16, message: Option<String> },

    /// The request never produced a response (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx body did not have the expected shape.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading an image from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Client-side validation rejected the form; nothing was sent.
    #[error("validation failed: {}", join(.0))]
    Validation(Vec<FieldError>),
}

impl ClientError {
    /// Whether a read is worth retrying: transport failures and 5xx answers.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Network(e) => !e.is_decode() && !e.is_builder(),
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_server_side_failures_are_transient() {
        let server = ClientError::Api {
            status: 503,
            message: None,
        };
        let client = ClientError::Api {
            status: 400,
            message: Some("bad".into()),
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
        assert!(!ClientError::NotFound("Signature not found".into()).is_transient());
        assert!(!ClientError::Validation(vec![]).is_transient());
    }

    #[test]
    fn api_error_falls_back_to_generic_message() {
        let err = ClientError::Api {
            status: 502,
            message: None,
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status 502: API Request Failed"
        );
    }

    #[test]
    fn validation_error_lists_every_field() {
        let err = ClientError::Validation(vec![
            FieldError::new("signatory_name", "Signatory name is required"),
            FieldError::new("signature_image", "Signature image is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: signatory_name: Signatory name is required; \
             signature_image: Signature image is required"
        );
    }
}
