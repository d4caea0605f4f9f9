//! Shared test utilities for shipment-core integration tests.
//!
//! Provides an in-process HTTP server standing in for downstream services
//! (the order service callback, or an AWS JSON endpoint).

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request captured by [`MockDownstream`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("captured body is not JSON")
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    status: StatusCode,
    response: &'static str,
    content_type: &'static str,
}

/// Records every request and answers with a fixed status and body.
pub struct MockDownstream {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockDownstream {
    pub async fn start(status: StatusCode, response: &'static str) -> Self {
        Self::start_with_content_type(status, response, "text/plain").await
    }

    pub async fn start_with_content_type(
        status: StatusCode,
        response: &'static str,
        content_type: &'static str,
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: Arc::clone(&requests),
            status,
            response,
            content_type,
        };

        let app = Router::new().fallback(capture).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock downstream");
        let addr = listener.local_addr().expect("mock downstream has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn capture(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(&'static str, &'static str); 1], &'static str) {
    state
        .requests
        .lock()
        .unwrap()
        .push(CapturedRequest { headers, body });
    (
        state.status,
        [("content-type", state.content_type)],
        state.response,
    )
}

/// Returns a local URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("probe listener has no address");
    drop(listener);
    format!("http://{}", addr)
}
