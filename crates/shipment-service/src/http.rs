//! HTTP entrypoint.
//!
//! `POST /` takes a shipment request and answers with the sent envelope as
//! soon as it has been emitted; delivery continues in a background task.
//! `OPTIONS /` answers CORS preflight requests.

use crate::shipper::Shipper;
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use shipment_core::{EventEmitter, decode_request};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Creates the router serving the shipment endpoint.
pub fn router<E: EventEmitter + 'static>(shipper: Shipper<E>) -> Router {
    Router::new()
        .route(
            "/",
            post(send_shipment::<E>)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(shipper)
}

/// Serves the router on `addr` until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve<E: EventEmitter + 'static>(
    shipper: Shipper<E>,
    addr: SocketAddr,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "start shipment server");

    axum::serve(listener, router(shipper))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn send_shipment<E: EventEmitter + 'static>(
    State(shipper): State<Shipper<E>>,
    body: Bytes,
) -> Response {
    let request = match decode_request(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting shipment request");
            return bad_request(&e);
        }
    };

    let sent = match shipper.ship(&request).await {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, order_id = %request.order_id, "Failed to send shipment");
            return bad_request(&e);
        }
    };

    let payload = match sent.to_json() {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode sent event");
            return (StatusCode::INTERNAL_SERVER_ERROR, "500 - Internal Server Error")
                .into_response();
        }
    };

    shipper.spawn_delivery(sent.data);

    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::CONTENT_TYPE, "application/json"),
        ],
        payload,
    )
        .into_response()
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Authorization"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_MAX_AGE, "3600"),
        ],
    )
}

async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "405 - Method Not Allowed")
}

fn bad_request(err: &dyn std::error::Error) -> Response {
    (StatusCode::BAD_REQUEST, format!("400 - Bad request: {err}")).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutting down shipment server");
}
