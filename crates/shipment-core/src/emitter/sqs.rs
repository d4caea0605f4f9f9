use super::{EventEmitter, load_sdk_config};
use crate::config::Config;
use crate::error::{ConfigError, TransportError};
use crate::model::ShipmentEvent;
use aws_sdk_sqs::Client;

/// Sends each event as a single SQS message.
#[derive(Debug, Clone)]
pub struct SqsEmitter {
    client: Client,
    queue_url: String,
}

impl SqsEmitter {
    /// Creates an emitter from an existing client.
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    /// Creates an emitter from the `sqs` and `aws` config sections.
    ///
    /// # Errors
    ///
    /// Returns an error if no queue URL is configured.
    pub async fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let queue_url = config
            .sqs
            .queue_url
            .clone()
            .ok_or(ConfigError::Missing("sqs.queue_url"))?;

        let sdk_config = load_sdk_config(&config.aws).await;
        Ok(Self::new(Client::new(&sdk_config), queue_url))
    }

    /// The destination queue.
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }
}

impl EventEmitter for SqsEmitter {
    async fn send(&self, event: &ShipmentEvent) -> Result<(), TransportError> {
        let body = event.to_json()?;

        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(TransportError::queue)?;

        tracing::debug!(
            message_id = output.message_id().unwrap_or("unknown"),
            event_type = %event.metadata.event_type,
            "Queue accepted event"
        );
        Ok(())
    }
}
