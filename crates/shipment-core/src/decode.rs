//! Request decoding.
//!
//! The order service wraps requests in a `{metadata, data}` envelope, but some
//! producers send the request object on its own and EventBridge nests either
//! form under `detail`. All three shapes decode to the same [`ShipmentRequest`].

use crate::error::DecodeError;
use crate::model::ShipmentRequest;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum Inbound {
    Envelope { data: ShipmentRequest },
    Bare(ShipmentRequest),
}

impl From<Inbound> for ShipmentRequest {
    fn from(inbound: Inbound) -> Self {
        match inbound {
            Inbound::Envelope { data } => data,
            Inbound::Bare(request) => request,
        }
    }
}

/// Decodes a raw JSON payload into a shipment request.
///
/// # Errors
///
/// Returns [`DecodeError`] if the bytes are not JSON or do not carry an `_id`
/// and a `delivery` field.
///
/// # Example
///
/// ```
/// use shipment_core::decode_request;
///
/// let req = decode_request(br#"{"data":{"_id":"order-123","delivery":"DHL"}}"#).unwrap();
/// assert_eq!(req.order_id, "order-123");
/// assert_eq!(req.delivery, "DHL");
/// ```
pub fn decode_request(bytes: &[u8]) -> Result<ShipmentRequest, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode_value(value)
}

/// Decodes an already parsed JSON payload into a shipment request.
///
/// An EventBridge wrapper is unwrapped to its `detail` first.
///
/// # Errors
///
/// Returns [`DecodeError`] if the value does not have the shape of a request.
pub fn decode_value(value: Value) -> Result<ShipmentRequest, DecodeError> {
    let value = match value {
        Value::Object(mut map) if map.contains_key("detail-type") => {
            map.remove("detail").unwrap_or(Value::Null)
        }
        other => other,
    };

    let inbound: Inbound = serde_json::from_value(value)?;
    Ok(inbound.into())
}
