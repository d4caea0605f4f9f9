//! Shared test utilities for shipment-service integration tests.

#![allow(dead_code)]

use aws_lambda_events::sqs::{SqsEvent, SqsMessage};
use lambda_runtime::{Context as LambdaContext, LambdaEvent};
use shipment_core::{
    DeliveryWindow, EventEmitter, ShipmentEvent, ShipmentStatus, Simulator, TransportError,
};
use shipment_service::Shipper;
use std::sync::Mutex;
use std::time::Duration;

/// Emitter that keeps every event it is given.
///
/// Sends for orders listed in `reject_orders` fail with a 503, as do
/// delivered events when `reject_delivered` is set.
#[derive(Default)]
pub struct RecordingEmitter {
    events: Mutex<Vec<ShipmentEvent>>,
    reject_orders: Vec<String>,
    reject_delivered: bool,
}

impl RecordingEmitter {
    pub fn rejecting_orders(orders: &[&str]) -> Self {
        Self {
            reject_orders: orders.iter().map(|o| o.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn rejecting_delivered() -> Self {
        Self {
            reject_delivered: true,
            ..Default::default()
        }
    }

    pub fn events(&self) -> Vec<ShipmentEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn events_of(&self, event_type: &str) -> Vec<ShipmentEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.metadata.event_type == event_type)
            .collect()
    }

    /// Polls until `count` events have been recorded.
    ///
    /// Works under paused time too, since the sleep lets the clock advance.
    pub async fn wait_for_events(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if self.events.lock().unwrap().len() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.events.lock().unwrap().len() >= count
    }
}

impl EventEmitter for RecordingEmitter {
    async fn send(&self, event: &ShipmentEvent) -> Result<(), TransportError> {
        let rejected = self.reject_orders.contains(&event.data.order_number)
            || (self.reject_delivered && event.data.status == ShipmentStatus::Delivered);

        if rejected {
            return Err(TransportError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }

        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// A simulator whose deliveries take a few milliseconds.
pub fn fast_simulator() -> Simulator {
    Simulator::new(
        DeliveryWindow::new(Duration::from_millis(1), Duration::from_millis(5))
            .expect("valid delivery window"),
    )
}

pub fn shipper(emitter: RecordingEmitter) -> Shipper<RecordingEmitter> {
    Shipper::new(emitter, fast_simulator())
}

pub fn request_body(order_id: &str, delivery: &str) -> String {
    serde_json::json!({
        "metadata": {
            "domain": "Order",
            "source": "CreateOrder",
            "type": "ShipmentRequested",
            "status": "success"
        },
        "data": {
            "_id": order_id,
            "delivery": delivery
        }
    })
    .to_string()
}

pub fn sqs_event(bodies: &[(&str, &str)]) -> LambdaEvent<SqsEvent> {
    let mut event = SqsEvent::default();
    event.records = bodies
        .iter()
        .map(|(message_id, body)| {
            let mut message = SqsMessage::default();
            message.message_id = Some(message_id.to_string());
            message.body = Some(body.to_string());
            message.event_source = Some("aws:sqs".to_string());
            message.aws_region = Some("us-east-1".to_string());
            message
        })
        .collect();

    LambdaEvent::new(event, LambdaContext::default())
}
