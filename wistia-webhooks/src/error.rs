//! Error types for webhook ingestion

use std::fmt;
use thiserror::Error;

/// Errors that can occur while receiving or parsing a webhook delivery
#[derive(Error, Debug)]
pub enum WebhookError {
    /// The request body is not well-formed JSON
    #[error("Malformed JSON in webhook delivery: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The delivery is well-formed JSON but does not match the expected shape
    #[error("Invalid webhook delivery: {0}")]
    Validation(#[from] ValidationError),

    /// Signature header missing from request
    #[error("Signature missing from request")]
    SignatureMissing,

    /// Signature does not match the request body
    #[error("Signature verification failed")]
    SignatureInvalid,

    /// Request body exceeds the configured limit
    #[error("Payload too large: {size} bytes (max: {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Error returned by an event handler callback
    #[error("Event handler failed: {0}")]
    Handler(String),
}

impl WebhookError {
    /// HTTP status a webhook endpoint should answer with for this error.
    ///
    /// Every variant maps to a 4xx so the sender flags or retries the delivery.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Syntax(_) => 400,
            Self::Validation(_) => 422,
            Self::SignatureMissing | Self::SignatureInvalid => 401,
            Self::PayloadTooLarge { .. } => 413,
            Self::Handler(_) => 422,
        }
    }

    /// Returns the validation details if this is a validation failure.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// A shape, type, or format failure inside a delivery.
///
/// `path` locates the failing field (`events[1].payload`, `hook.uuid`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Location of the offending field within the delivery
    pub path: String,
    /// What was wrong with it
    pub message: String,
    /// The offending value, when one was present
    pub value: Option<serde_json::Value>,
    /// `uuid` of the enclosing event, when it could be read
    pub event_uuid: Option<String>,
}

impl ValidationError {
    pub(crate) fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            value: None,
            event_uuid: None,
        }
    }

    pub(crate) fn missing(path: impl Into<String>) -> Self {
        Self::new(path, "field is required")
    }

    pub(crate) fn with_value(mut self, value: &serde_json::Value) -> Self {
        self.value = Some(value.clone());
        self
    }

    pub(crate) fn with_event_uuid(mut self, uuid: Option<&str>) -> Self {
        if self.event_uuid.is_none() {
            self.event_uuid = uuid.map(str::to_string);
        }
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(uuid) = &self.event_uuid {
            write!(f, " (event {})", uuid)?;
        }
        if let Some(value) = &self.value {
            write!(f, " (got {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
