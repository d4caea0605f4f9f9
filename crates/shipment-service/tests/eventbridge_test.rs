//! Tests for the EventBridge handler.

mod common;

use common::{RecordingEmitter, shipper};
use lambda_runtime::{Context as LambdaContext, LambdaEvent};
use serde_json::{Value, json};
use shipment_core::ShipmentStatus;
use shipment_service::eventbridge::handle_event;

fn invocation(payload: Value) -> LambdaEvent<Value> {
    LambdaEvent::new(payload, LambdaContext::default())
}

#[tokio::test]
async fn test_eventbridge_detail_is_processed() {
    let shipper = shipper(RecordingEmitter::default());
    let payload = json!({
        "version": "0",
        "id": "6a7e8feb-b491-4cf7-a9f1-bf3703467718",
        "detail-type": "ShipmentRequested",
        "source": "CreateOrder",
        "account": "123456789012",
        "time": "2024-01-01T00:00:00Z",
        "region": "us-east-1",
        "resources": [],
        "detail": {
            "metadata": {"domain": "Order", "type": "ShipmentRequested"},
            "data": {"_id": "order-42", "delivery": "FedEx"}
        }
    });

    let delivered = handle_event(&shipper, invocation(payload)).await.unwrap();

    assert_eq!(delivered.metadata.event_type, "DeliveredShipment");
    assert_eq!(delivered.data.order_number, "order-42");
    assert_eq!(delivered.data.status, ShipmentStatus::Delivered);

    let events = shipper.emitter().events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].metadata.event_type, "SentShipment");
    assert_eq!(events[0].data.tracking_number, delivered.data.tracking_number);
}

#[tokio::test]
async fn test_direct_invocation_payload_is_processed() {
    let shipper = shipper(RecordingEmitter::default());

    let delivered = handle_event(
        &shipper,
        invocation(json!({"data": {"_id": "order-7", "delivery": "DHL"}})),
    )
    .await
    .unwrap();

    assert_eq!(delivered.data.order_number, "order-7");
    assert_eq!(shipper.emitter().events().len(), 2);
}

#[tokio::test]
async fn test_undecodable_event_fails_invocation() {
    let shipper = shipper(RecordingEmitter::default());

    let err = handle_event(
        &shipper,
        invocation(json!({"detail-type": "ShipmentRequested", "detail": {"data": {}}})),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("unmarshaling shipment"), "{err}");
    assert!(shipper.emitter().events().is_empty());
}

#[tokio::test]
async fn test_transport_failure_fails_invocation() {
    let shipper = shipper(RecordingEmitter::rejecting_orders(&["order-1"]));

    let err = handle_event(
        &shipper,
        invocation(json!({"data": {"_id": "order-1", "delivery": "DHL"}})),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("sending event"), "{err}");
}
