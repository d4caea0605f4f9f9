//! Shipment requests, shipment records and the event envelope.
//!
//! Field names follow the JSON contract shared with the order service:
//! inbound requests use `_id`/`delivery`, outbound records use camelCase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain name carried in every emitted envelope.
pub const SHIPMENT_DOMAIN: &str = "Shipment";

/// Source name carried in every emitted envelope.
pub const SEND_SHIPMENT_SOURCE: &str = "SendShipment";

/// Status carried in the metadata of successfully produced events.
pub const SUCCESS_STATUS: &str = "success";

/// A request to ship an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    /// Identifier of the order being shipped.
    #[serde(rename = "_id")]
    pub order_id: String,
    /// Name of the delivery carrier.
    pub delivery: String,
}

/// Delivery state of a shipment.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    /// Handed to the carrier, not yet delivered.
    #[serde(rename = "shipped - pending delivery")]
    ShippedPendingDelivery,
    /// Delivered to the customer.
    #[serde(rename = "delivered")]
    Delivered,
}

impl ShipmentStatus {
    /// Returns the wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShippedPendingDelivery => "shipped - pending delivery",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shipment record produced by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentData {
    /// Tracking number assigned when the shipment was sent.
    pub tracking_number: String,
    /// Order the shipment belongs to.
    pub order_number: String,
    /// Current delivery state.
    pub status: ShipmentStatus,
}

/// Kind of shipment event.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Inbound request from the order service.
    ShipmentRequested,
    /// The shipment left the warehouse.
    SentShipment,
    /// The shipment reached the customer.
    DeliveredShipment,
}

impl EventType {
    /// Returns the wire representation of the event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShipmentRequested => "ShipmentRequested",
            Self::SentShipment => "SentShipment",
            Self::DeliveredShipment => "DeliveredShipment",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive metadata attached to every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Domain the event belongs to (e.g. `Shipment`).
    pub domain: String,
    /// Function that produced the event (e.g. `SendShipment`).
    pub source: String,
    /// Event type (e.g. `SentShipment`).
    #[serde(rename = "type")]
    pub event_type: String,
    /// Outcome of the producing step (e.g. `success`).
    pub status: String,
}

impl EventMetadata {
    /// Metadata for an event produced by the shipment service.
    pub fn shipment(event_type: EventType) -> Self {
        Self {
            domain: SHIPMENT_DOMAIN.to_string(),
            source: SEND_SHIPMENT_SOURCE.to_string(),
            event_type: event_type.as_str().to_string(),
            status: SUCCESS_STATUS.to_string(),
        }
    }
}

/// The envelope sent to downstream listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentEvent {
    /// Envelope metadata.
    pub metadata: EventMetadata,
    /// The shipment record.
    pub data: ShipmentData,
}

impl ShipmentEvent {
    /// Wraps a freshly sent shipment.
    pub fn sent(data: ShipmentData) -> Self {
        Self {
            metadata: EventMetadata::shipment(EventType::SentShipment),
            data,
        }
    }

    /// Wraps a delivered shipment.
    pub fn delivered(data: ShipmentData) -> Self {
        Self {
            metadata: EventMetadata::shipment(EventType::DeliveredShipment),
            data,
        }
    }

    /// Serialises the envelope to its canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
