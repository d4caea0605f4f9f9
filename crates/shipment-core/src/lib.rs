//! Core of the shipment service.
//!
//! The shipment service receives a request to ship an order, assigns a
//! tracking number, reports the shipment as sent, waits for a simulated
//! transit time and then reports it as delivered. This crate holds the pieces
//! every deployment shares:
//!
//! - [`decode_request`] - turns inbound JSON into a [`ShipmentRequest`]
//! - [`Simulator`] - produces and advances [`ShipmentData`] records
//! - [`EventEmitter`] - sends [`ShipmentEvent`] envelopes over HTTP, SQS or
//!   EventBridge
//! - [`Config`] - layered configuration for all of the above
//!
//! # Example
//!
//! ```no_run
//! use shipment_core::{Config, Emitter, EventEmitter, ShipmentEvent, Simulator, decode_request};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let emitter = Emitter::from_config(&config).await?;
//! let simulator = Simulator::new(config.delivery.window()?);
//!
//! let request = decode_request(br#"{"data":{"_id":"order-123","delivery":"DHL"}}"#)?;
//! let sent = simulator.mark_sent(&request);
//! emitter.send(&ShipmentEvent::sent(sent.clone())).await?;
//!
//! let delivered = simulator.mark_delivered(sent).await;
//! emitter.send(&ShipmentEvent::delivered(delivered)).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod decode;
pub mod emitter;
pub mod error;
pub mod model;
pub mod simulator;

pub use config::{
    AwsConfig, BatchConfig, BatchPolicy, Config, ConfigBuilder, DeliveryConfig,
    EventBridgeConfig, HttpConfig, LogConfig, LogFormat, ServerConfig, SqsConfig, TransportKind,
};
pub use decode::{decode_request, decode_value};
pub use emitter::{Emitter, EventBridgeEmitter, EventEmitter, HttpEmitter, SqsEmitter};
pub use error::{ConfigError, DecodeError, TransportError};
pub use model::{
    EventMetadata, EventType, ShipmentData, ShipmentEvent, ShipmentRequest, ShipmentStatus,
};
pub use simulator::{DeliveryWindow, Simulator};
