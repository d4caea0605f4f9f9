//! Errors surfaced by the shipment pipeline.

use shipment_core::{DecodeError, TransportError};
use thiserror::Error;

/// Processing a shipment failed.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ShipmentError {
    /// The inbound payload was malformed.
    #[error("unmarshaling shipment: {0}")]
    Decode(#[from] DecodeError),

    /// An event could not be emitted.
    #[error("sending event: {0}")]
    Transport(#[from] TransportError),
}
