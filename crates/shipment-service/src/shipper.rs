//! The shipment pipeline shared by every entrypoint.

use crate::error::ShipmentError;
use shipment_core::{
    EventEmitter, ShipmentData, ShipmentEvent, ShipmentRequest, Simulator, decode_request,
};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Runs shipments through the simulator and reports them to the emitter.
///
/// Cloning is cheap: the emitter is shared behind an [`Arc`], so a clone can
/// be moved into a spawned delivery task.
#[derive(Debug)]
pub struct Shipper<E> {
    emitter: Arc<E>,
    simulator: Simulator,
}

impl<E> Clone for Shipper<E> {
    fn clone(&self) -> Self {
        Self {
            emitter: Arc::clone(&self.emitter),
            simulator: self.simulator,
        }
    }
}

impl<E: EventEmitter + 'static> Shipper<E> {
    /// Creates a pipeline around `emitter`.
    pub fn new(emitter: E, simulator: Simulator) -> Self {
        Self {
            emitter: Arc::new(emitter),
            simulator,
        }
    }

    /// The emitter events are sent through.
    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    /// Marks the request as shipped and emits the sent event.
    ///
    /// # Errors
    ///
    /// Returns an error if the sent event cannot be emitted.
    pub async fn ship(&self, request: &ShipmentRequest) -> Result<ShipmentEvent, ShipmentError> {
        tracing::info!(
            order_id = %request.order_id,
            carrier = %request.delivery,
            "Shipment requested"
        );

        let event = ShipmentEvent::sent(self.simulator.mark_sent(request));
        self.emitter.send(&event).await?;

        tracing::info!(
            order_id = %event.data.order_number,
            tracking_number = %event.data.tracking_number,
            status = %event.data.status,
            "Shipment sent"
        );
        Ok(event)
    }

    /// Waits for the simulated delivery and emits the delivered event.
    ///
    /// # Errors
    ///
    /// Returns an error if the delivered event cannot be emitted. The sent
    /// event is already out at that point and is not compensated.
    pub async fn deliver(&self, data: ShipmentData) -> Result<ShipmentEvent, ShipmentError> {
        let event = ShipmentEvent::delivered(self.simulator.mark_delivered(data).await);

        if let Err(e) = self.emitter.send(&event).await {
            tracing::error!(
                error = %e,
                order_id = %event.data.order_number,
                tracking_number = %event.data.tracking_number,
                "Delivered event lost, shipment remains pending downstream"
            );
            return Err(e.into());
        }

        tracing::info!(
            order_id = %event.data.order_number,
            tracking_number = %event.data.tracking_number,
            "order {} successfully delivered",
            event.data.order_number
        );
        Ok(event)
    }

    /// Decodes a payload and runs the whole flow in line.
    ///
    /// # Errors
    ///
    /// Returns the first decode or transport failure.
    pub async fn process(&self, payload: &[u8]) -> Result<ShipmentEvent, ShipmentError> {
        let request = decode_request(payload)?;
        self.process_request(&request).await
    }

    /// Runs the whole flow in line for an already decoded request.
    ///
    /// # Errors
    ///
    /// Returns the first transport failure.
    pub async fn process_request(
        &self,
        request: &ShipmentRequest,
    ) -> Result<ShipmentEvent, ShipmentError> {
        let sent = self.ship(request).await?;
        self.deliver(sent.data).await
    }

    /// Completes the delivery in a detached task.
    ///
    /// Best effort: the outcome is only logged, and the delivered event is
    /// never emitted if the process exits before the delay elapses.
    pub fn spawn_delivery(&self, data: ShipmentData) -> JoinHandle<()> {
        let shipper = self.clone();
        tokio::spawn(async move {
            // failures are already logged by deliver
            let _ = shipper.deliver(data).await;
        })
    }
}
