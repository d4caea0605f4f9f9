//! Shipment service workspace.
//!
//! This package only carries the end-to-end tests under `tests/`. The
//! functionality lives in the member crates:
//!
//! - `shipment-core`: data model, request decoding, delivery simulation,
//!   event transports and configuration
//! - `shipment-service`: the shipment pipeline plus its HTTP, SQS and
//!   EventBridge entrypoints and binaries
