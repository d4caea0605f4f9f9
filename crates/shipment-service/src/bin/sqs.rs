//! Lambda function processing shipment requests from an SQS queue.
//!
//! Environment variables:
//! - `RESPONSE_QUEUE` - queue receiving the sent and delivered events
//! - `REGION` - AWS region of the queue
//! - `SHIPMENT_BATCH__POLICY` - `fail-fast` (default) or `report-item-failures`

use anyhow::{Context, Result};
use aws_lambda_events::sqs::SqsEvent;
use lambda_runtime::{LambdaEvent, service_fn};
use shipment_core::{Config, TransportKind};
use shipment_service::{build_shipper, sqs, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = Config::load().context("failed to load configuration")?;
    if std::env::var_os("SHIPMENT_TRANSPORT").is_none() {
        config.transport = TransportKind::Sqs;
    }
    telemetry::init_tracing(&config.log).context("failed to initialise tracing subscriber")?;

    let shipper = build_shipper(&config)
        .await
        .context("failed to build shipment pipeline")?;
    let policy = config.batch.policy;

    lambda_runtime::run(service_fn(|event: LambdaEvent<SqsEvent>| {
        let shipper = shipper.clone();
        async move { sqs::handle_batch(&shipper, policy, event).await }
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
    .context("lambda runtime failed")?;

    Ok(())
}
