//! Lambda function processing shipment requests delivered by EventBridge.
//!
//! Environment variables:
//! - `EVENT_BUS` - bus receiving the sent and delivered events
//! - `REGION` - AWS region of the bus

use anyhow::{Context, Result};
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use shipment_core::{Config, TransportKind};
use shipment_service::{build_shipper, eventbridge, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = Config::load().context("failed to load configuration")?;
    if std::env::var_os("SHIPMENT_TRANSPORT").is_none() {
        config.transport = TransportKind::EventBridge;
    }
    telemetry::init_tracing(&config.log).context("failed to initialise tracing subscriber")?;

    let shipper = build_shipper(&config)
        .await
        .context("failed to build shipment pipeline")?;

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        let shipper = shipper.clone();
        async move { eventbridge::handle_event(&shipper, event).await }
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
    .context("lambda runtime failed")?;

    Ok(())
}
