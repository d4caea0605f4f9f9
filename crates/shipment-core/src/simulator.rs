//! Shipment simulation.
//!
//! Sending assigns a tracking number; delivering waits for a random transit
//! time and flips the status. No carrier is contacted.

use crate::error::ConfigError;
use crate::model::{ShipmentData, ShipmentRequest, ShipmentStatus};
use rand::Rng;
use std::time::Duration;
use uuid::Uuid;

/// Default lower bound of the simulated transit time (inclusive).
pub const DEFAULT_MIN_DELIVERY: Duration = Duration::from_secs(5);

/// Default upper bound of the simulated transit time (exclusive).
pub const DEFAULT_MAX_DELIVERY: Duration = Duration::from_secs(120);

/// Half-open range `[min, max)` the simulated transit time is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWindow {
    min: Duration,
    max: Duration,
}

impl DeliveryWindow {
    /// Creates a window; `min` must be strictly smaller than `max`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty window.
    pub fn new(min: Duration, max: Duration) -> Result<Self, ConfigError> {
        if min >= max {
            return Err(ConfigError::Invalid(format!(
                "delivery window is empty: min {min:?} must be below max {max:?}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> Duration {
        self.min
    }

    /// Upper bound (exclusive).
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draws a transit time uniformly from the window, in whole milliseconds.
    pub fn sample(&self) -> Duration {
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        // sub-millisecond windows collapse to their lower bound
        if max_ms <= min_ms {
            return self.min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..max_ms))
    }
}

impl Default for DeliveryWindow {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_DELIVERY,
            max: DEFAULT_MAX_DELIVERY,
        }
    }
}

/// Produces shipment records and simulates their delivery.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simulator {
    window: DeliveryWindow,
}

impl Simulator {
    /// Creates a simulator drawing transit times from `window`.
    pub fn new(window: DeliveryWindow) -> Self {
        Self { window }
    }

    /// The configured transit window.
    pub fn window(&self) -> DeliveryWindow {
        self.window
    }

    /// Hands the order to the carrier and assigns a fresh tracking number.
    pub fn mark_sent(&self, request: &ShipmentRequest) -> ShipmentData {
        tracing::info!(
            carrier = %request.delivery,
            order_id = %request.order_id,
            "Hello, this is {}... We'll take care of your package!",
            request.delivery
        );

        ShipmentData {
            tracking_number: Uuid::new_v4().to_string(),
            order_number: request.order_id.clone(),
            status: ShipmentStatus::ShippedPendingDelivery,
        }
    }

    /// Draws the transit time for the next delivery.
    pub fn delivery_delay(&self) -> Duration {
        self.window.sample()
    }

    /// Waits for the simulated transit time, then marks the shipment delivered.
    ///
    /// Only the calling task is suspended. The wait is not cancellable from
    /// here; dropping the future is the only way to abandon it.
    pub async fn mark_delivered(&self, mut data: ShipmentData) -> ShipmentData {
        let delay = self.delivery_delay();
        tracing::info!(
            tracking_number = %data.tracking_number,
            delay_ms = delay.as_millis() as u64,
            "Simulating delivery by sleeping for {} seconds",
            delay.as_secs()
        );

        tokio::time::sleep(delay).await;

        data.status = ShipmentStatus::Delivered;
        data
    }
}
