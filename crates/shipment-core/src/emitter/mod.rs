//! Event emission.
//!
//! Every transport implements [`EventEmitter`]. The concrete transport is
//! picked once at startup from [`Config::transport`] and wrapped in
//! [`Emitter`], so request handling never needs a trait object.
//!
//! All transports share the same contract: the envelope is serialised with
//! [`ShipmentEvent::to_json`], failures are returned to the caller and nothing
//! is retried.

mod eventbridge;
mod http;
mod sqs;

pub use eventbridge::EventBridgeEmitter;
pub use http::HttpEmitter;
pub use sqs::SqsEmitter;

use crate::config::{AwsConfig, Config, TransportKind};
use crate::error::{ConfigError, TransportError};
use crate::model::ShipmentEvent;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::future::Future;

/// Something that can deliver a shipment event downstream.
pub trait EventEmitter: Send + Sync {
    /// Sends one event. Returns once the transport has accepted or rejected it.
    fn send(&self, event: &ShipmentEvent)
    -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// The transport selected by configuration.
#[derive(Debug, Clone)]
pub enum Emitter {
    /// HTTP callback.
    Http(HttpEmitter),
    /// SQS queue.
    Sqs(SqsEmitter),
    /// EventBridge bus.
    EventBridge(EventBridgeEmitter),
}

impl Emitter {
    /// Builds the transport named by `config.transport`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifiers the transport needs are missing.
    pub async fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let emitter = match config.transport {
            TransportKind::Http => Self::Http(HttpEmitter::from_config(&config.http)?),
            TransportKind::Sqs => Self::Sqs(SqsEmitter::from_config(config).await?),
            TransportKind::EventBridge => {
                Self::EventBridge(EventBridgeEmitter::from_config(config).await?)
            }
        };

        tracing::debug!(transport = emitter.transport_name(), "Event emitter ready");
        Ok(emitter)
    }

    /// Short name of the transport, for logs.
    pub fn transport_name(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Sqs(_) => "sqs",
            Self::EventBridge(_) => "eventbridge",
        }
    }
}

impl EventEmitter for Emitter {
    async fn send(&self, event: &ShipmentEvent) -> Result<(), TransportError> {
        match self {
            Self::Http(emitter) => emitter.send(event).await,
            Self::Sqs(emitter) => emitter.send(event).await,
            Self::EventBridge(emitter) => emitter.send(event).await,
        }
    }
}

/// Loads shared AWS settings with SDK retries switched off.
async fn load_sdk_config(aws: &AwsConfig) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());

    if let Some(region) = &aws.region {
        loader = loader.region(Region::new(region.clone()));
    }

    if let Some(endpoint) = &aws.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}
