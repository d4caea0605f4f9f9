//! Tests for the SQS batch handler.

mod common;

use common::{RecordingEmitter, request_body, shipper, sqs_event};
use shipment_core::BatchPolicy;
use shipment_service::sqs::{BatchItemFailure, SqsBatchResponse, handle_batch};

#[tokio::test]
async fn test_batch_processes_every_record_in_order() {
    let shipper = shipper(RecordingEmitter::default());
    let first = request_body("order-1", "DHL");
    let second = request_body("order-2", "UPS");

    let response = handle_batch(
        &shipper,
        BatchPolicy::FailFast,
        sqs_event(&[("msg-1", first.as_str()), ("msg-2", second.as_str())]),
    )
    .await
    .unwrap();

    assert_eq!(response, SqsBatchResponse::default());

    let events = shipper.emitter().events();
    let summary: Vec<_> = events
        .iter()
        .map(|e| (e.data.order_number.as_str(), e.metadata.event_type.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("order-1", "SentShipment"),
            ("order-1", "DeliveredShipment"),
            ("order-2", "SentShipment"),
            ("order-2", "DeliveredShipment"),
        ]
    );
}

#[tokio::test]
async fn test_empty_batch_succeeds() {
    let shipper = shipper(RecordingEmitter::default());

    let response = handle_batch(&shipper, BatchPolicy::FailFast, sqs_event(&[]))
        .await
        .unwrap();

    assert!(response.batch_item_failures.is_empty());
    assert!(shipper.emitter().events().is_empty());
}

#[tokio::test]
async fn test_fail_fast_stops_at_malformed_record() {
    let shipper = shipper(RecordingEmitter::default());
    let first = request_body("order-1", "DHL");
    let third = request_body("order-3", "DHL");

    let result = handle_batch(
        &shipper,
        BatchPolicy::FailFast,
        sqs_event(&[
            ("msg-1", first.as_str()),
            ("msg-2", "not json"),
            ("msg-3", third.as_str()),
        ]),
    )
    .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("unmarshaling shipment"), "{err}");

    let orders: Vec<_> = shipper
        .emitter()
        .events()
        .into_iter()
        .map(|e| e.data.order_number)
        .collect();
    assert_eq!(orders, vec!["order-1", "order-1"]);
}

#[tokio::test]
async fn test_fail_fast_stops_at_transport_failure() {
    let shipper = shipper(RecordingEmitter::rejecting_orders(&["order-1"]));
    let first = request_body("order-1", "DHL");
    let second = request_body("order-2", "DHL");

    let err = handle_batch(
        &shipper,
        BatchPolicy::FailFast,
        sqs_event(&[("msg-1", first.as_str()), ("msg-2", second.as_str())]),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("sending event"), "{err}");
    assert!(shipper.emitter().events().is_empty());
}

#[tokio::test]
async fn test_report_item_failures_continues_past_failures() {
    let shipper = shipper(RecordingEmitter::rejecting_orders(&["order-3"]));
    let first = request_body("order-1", "DHL");
    let third = request_body("order-3", "DHL");
    let fourth = request_body("order-4", "DHL");

    let response = handle_batch(
        &shipper,
        BatchPolicy::ReportItemFailures,
        sqs_event(&[
            ("msg-1", first.as_str()),
            ("msg-2", "{"),
            ("msg-3", third.as_str()),
            ("msg-4", fourth.as_str()),
        ]),
    )
    .await
    .unwrap();

    assert_eq!(
        response.batch_item_failures,
        vec![
            BatchItemFailure {
                item_identifier: "msg-2".to_string(),
            },
            BatchItemFailure {
                item_identifier: "msg-3".to_string(),
            },
        ]
    );

    let delivered: Vec<_> = shipper
        .emitter()
        .events_of("DeliveredShipment")
        .into_iter()
        .map(|e| e.data.order_number)
        .collect();
    assert_eq!(delivered, vec!["order-1", "order-4"]);
}

#[tokio::test]
async fn test_delivered_failure_fails_record_after_sent() {
    let shipper = shipper(RecordingEmitter::rejecting_delivered());
    let body = request_body("order-1", "DHL");

    let response = handle_batch(
        &shipper,
        BatchPolicy::ReportItemFailures,
        sqs_event(&[("msg-1", body.as_str())]),
    )
    .await
    .unwrap();

    assert_eq!(response.batch_item_failures.len(), 1);
    assert_eq!(shipper.emitter().events_of("SentShipment").len(), 1);
    assert!(shipper.emitter().events_of("DeliveredShipment").is_empty());
}
