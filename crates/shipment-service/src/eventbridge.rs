//! EventBridge-triggered Lambda entrypoint.
//!
//! Accepts either an EventBridge event (request under `detail`) or the
//! request payload itself when the function is invoked directly.

use crate::error::ShipmentError;
use crate::shipper::Shipper;
use lambda_runtime::LambdaEvent;
use serde_json::Value;
use shipment_core::{EventEmitter, ShipmentEvent, decode_value};

/// Runs one invocation through the full flow, delivery included.
///
/// # Errors
///
/// Returns decode and transport failures so the invocation is marked failed.
pub async fn handle_event<E: EventEmitter + 'static>(
    shipper: &Shipper<E>,
    event: LambdaEvent<Value>,
) -> Result<ShipmentEvent, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();

    tracing::info!(request_id = %context.request_id, "Processing shipment event");

    let result = match decode_value(payload) {
        Ok(request) => shipper.process_request(&request).await,
        Err(e) => Err(ShipmentError::from(e)),
    };

    result.map_err(|e| {
        tracing::error!(error = %e, request_id = %context.request_id, "Invocation failed");
        e.into()
    })
}
