use super::{EventEmitter, load_sdk_config};
use crate::config::Config;
use crate::error::{ConfigError, TransportError};
use crate::model::ShipmentEvent;
use aws_sdk_eventbridge::Client;
use aws_sdk_eventbridge::types::PutEventsRequestEntry;

/// Publishes each event as a single EventBridge entry.
///
/// The entry's `detail-type` is the envelope's event type, so bus rules can
/// route sent and delivered events separately.
#[derive(Debug, Clone)]
pub struct EventBridgeEmitter {
    client: Client,
    bus_name: String,
    source: String,
}

impl EventBridgeEmitter {
    /// Creates an emitter from an existing client.
    pub fn new(client: Client, bus_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            client,
            bus_name: bus_name.into(),
            source: source.into(),
        }
    }

    /// Creates an emitter from the `eventbridge` and `aws` config sections.
    ///
    /// # Errors
    ///
    /// Returns an error if no bus name is configured.
    pub async fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let bus_name = config
            .eventbridge
            .bus_name
            .clone()
            .ok_or(ConfigError::Missing("eventbridge.bus_name"))?;

        let sdk_config = load_sdk_config(&config.aws).await;
        Ok(Self::new(
            Client::new(&sdk_config),
            bus_name,
            config.eventbridge.source.clone(),
        ))
    }

    /// The destination bus.
    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }
}

impl EventEmitter for EventBridgeEmitter {
    async fn send(&self, event: &ShipmentEvent) -> Result<(), TransportError> {
        let entry = PutEventsRequestEntry::builder()
            .event_bus_name(&self.bus_name)
            .source(&self.source)
            .detail_type(&event.metadata.event_type)
            .detail(event.to_json()?)
            .build();

        let output = self
            .client
            .put_events()
            .entries(entry)
            .send()
            .await
            .map_err(TransportError::bus)?;

        let failed = output.failed_entry_count();
        if failed > 0 {
            let message = output
                .entries()
                .iter()
                .find_map(|entry| {
                    entry.error_code().map(|code| {
                        format!("{code}: {}", entry.error_message().unwrap_or_default())
                    })
                })
                .unwrap_or_default();
            return Err(TransportError::Rejected { failed, message });
        }

        tracing::debug!(
            bus = %self.bus_name,
            event_type = %event.metadata.event_type,
            "Bus accepted event"
        );
        Ok(())
    }
}
