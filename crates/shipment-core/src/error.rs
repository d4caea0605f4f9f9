//! Error types for decoding, configuration and event transports.

use thiserror::Error;

/// The inbound payload was not a well-formed shipment request.
#[derive(Debug, Error)]
#[error("malformed shipment request: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Configuration could not be loaded or is incomplete.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layered configuration failed to load.
    #[error("failed to load configuration")]
    Load(#[source] Box<figment::Error>),

    /// A value required by the selected transport is absent.
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}

/// Sending an event to its downstream transport failed.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TransportError {
    /// The envelope could not be serialised.
    #[error("failed to encode event")]
    Encode(#[from] serde_json::Error),

    /// HTTP request failed.
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Downstream service answered with a non-success status.
    #[error("downstream returned {status}: {body}")]
    Status {
        /// HTTP status code returned by the downstream service.
        status: u16,
        /// Response body returned by the downstream service.
        body: String,
    },

    /// SQS rejected or never received the message.
    #[error("failed to send message to queue")]
    Queue(#[source] Box<aws_sdk_sqs::Error>),

    /// EventBridge rejected or never received the entry.
    #[error("failed to publish event to bus")]
    Bus(#[source] Box<aws_sdk_eventbridge::Error>),

    /// EventBridge accepted the call but reported failed entries.
    #[error("event bus rejected {failed} entries: {message}")]
    Rejected {
        /// Number of failed entries reported by the bus.
        failed: i32,
        /// Error code and message of the first failed entry.
        message: String,
    },
}

impl TransportError {
    pub(crate) fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub(crate) fn queue(err: impl Into<aws_sdk_sqs::Error>) -> Self {
        Self::Queue(Box::new(err.into()))
    }

    pub(crate) fn bus(err: impl Into<aws_sdk_eventbridge::Error>) -> Self {
        Self::Bus(Box::new(err.into()))
    }
}
