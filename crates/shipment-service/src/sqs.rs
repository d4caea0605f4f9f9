//! SQS-triggered Lambda entrypoint.
//!
//! Records are processed one after another, each through the full flow
//! including the simulated delivery, before the invocation returns. What
//! happens when a record fails depends on the configured [`BatchPolicy`].

use crate::shipper::Shipper;
use aws_lambda_events::sqs::SqsEvent;
use lambda_runtime::LambdaEvent;
use serde::Serialize;
use shipment_core::{BatchPolicy, EventEmitter};

/// SQS batch processing response.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SqsBatchResponse {
    /// List of message IDs that failed processing.
    pub batch_item_failures: Vec<BatchItemFailure>,
}

/// A failed SQS message.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemFailure {
    /// The message ID that failed.
    pub item_identifier: String,
}

/// Processes a batch of SQS records.
///
/// With [`BatchPolicy::FailFast`] the first failure ends the batch and fails
/// the invocation, so the queue redelivers the whole batch. With
/// [`BatchPolicy::ReportItemFailures`] every record is attempted and only the
/// failed ones are reported back for redelivery.
///
/// # Errors
///
/// Returns the first record's error under [`BatchPolicy::FailFast`].
pub async fn handle_batch<E: EventEmitter + 'static>(
    shipper: &Shipper<E>,
    policy: BatchPolicy,
    event: LambdaEvent<SqsEvent>,
) -> Result<SqsBatchResponse, lambda_runtime::Error> {
    let (sqs_event, context) = event.into_parts();

    tracing::info!(
        request_id = %context.request_id,
        message_count = sqs_event.records.len(),
        ?policy,
        "Processing SQS batch"
    );

    let mut batch_item_failures = Vec::new();

    for record in &sqs_event.records {
        let message_id = record.message_id.as_deref().unwrap_or("unknown");
        let body = record.body.as_deref().unwrap_or_default();

        tracing::debug!(message_id = %message_id, "Processing SQS message");

        if let Err(e) = shipper.process(body.as_bytes()).await {
            tracing::error!(error = %e, message_id = %message_id, "Message processing failed");

            match policy {
                BatchPolicy::ReportItemFailures => batch_item_failures.push(BatchItemFailure {
                    item_identifier: message_id.to_string(),
                }),
                _ => return Err(e.into()),
            }
        }
    }

    tracing::info!(
        processed = sqs_event.records.len() - batch_item_failures.len(),
        failed = batch_item_failures.len(),
        "Batch processing complete"
    );

    Ok(SqsBatchResponse {
        batch_item_failures,
    })
}
