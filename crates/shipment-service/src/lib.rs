//! Entrypoints for the shipment service.
//!
//! The same pipeline ([`Shipper`]) is deployed behind three triggers:
//!
//! - **HTTP** - [`http::router`]; answers with the sent event right away and
//!   finishes the delivery in a background task
//! - **SQS** - [`sqs::handle_batch`]; processes a batch of queue records
//! - **EventBridge** - [`eventbridge::handle_event`]; processes one event
//!
//! The Lambda triggers wait for the simulated delivery before returning, since
//! the Lambda environment freezes as soon as the handler completes.
//!
//! ## Example: SQS Handler
//!
//! ```no_run
//! use aws_lambda_events::sqs::SqsEvent;
//! use lambda_runtime::{LambdaEvent, service_fn};
//! use shipment_core::Config;
//! use shipment_service::{build_shipper, sqs};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     let config = Config::load()?;
//!     let shipper = build_shipper(&config).await?;
//!     let policy = config.batch.policy;
//!
//!     lambda_runtime::run(service_fn(|event: LambdaEvent<SqsEvent>| {
//!         let shipper = shipper.clone();
//!         async move { sqs::handle_batch(&shipper, policy, event).await }
//!     }))
//!     .await
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod eventbridge;
pub mod http;
pub mod shipper;
pub mod sqs;
pub mod telemetry;

pub use error::ShipmentError;
pub use shipper::Shipper;

use shipment_core::{Config, ConfigError, Emitter, Simulator};

/// Builds the configured emitter and wraps it in a pipeline.
///
/// # Errors
///
/// Returns an error if the transport identifiers or delivery window are
/// missing or invalid.
pub async fn build_shipper(config: &Config) -> Result<Shipper<Emitter>, ConfigError> {
    let simulator = Simulator::new(config.delivery.window()?);
    let emitter = Emitter::from_config(config).await?;

    tracing::info!(
        transport = emitter.transport_name(),
        min_delivery_secs = config.delivery.min_secs,
        max_delivery_secs = config.delivery.max_secs,
        "Shipment pipeline ready"
    );

    Ok(Shipper::new(emitter, simulator))
}
