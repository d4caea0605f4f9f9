//! Long-running HTTP server for the shipment service.
//!
//! Configuration is loaded as described in `shipment_core::config`; the
//! deployment usually only sets `ORDER_URL` and `PORT`.

use anyhow::{Context, Result};
use shipment_core::Config;
use shipment_service::{build_shipper, http, telemetry};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.log).context("failed to initialise tracing subscriber")?;
    tracing::debug!(?config, "Configuration loaded");

    let shipper = build_shipper(&config)
        .await
        .context("failed to build shipment pipeline")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    http::serve(shipper, addr)
        .await
        .context("shipment server failed")?;

    Ok(())
}
