use super::EventEmitter;
use crate::config::HttpConfig;
use crate::error::{ConfigError, TransportError};
use crate::model::ShipmentEvent;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Posts events as JSON to a downstream HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpEmitter {
    client: Client,
    url: String,
}

impl HttpEmitter {
    /// Creates an emitter posting to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Creates an emitter from the `http` config section.
    ///
    /// # Errors
    ///
    /// Returns an error if no URL is configured or the client cannot be built.
    pub fn from_config(config: &HttpConfig) -> Result<Self, ConfigError> {
        let url = config.url.as_deref().ok_or(ConfigError::Missing("http.url"))?;
        Self::new(url, config.timeout)
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {e}")))
    }

    /// The downstream URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl EventEmitter for HttpEmitter {
    async fn send(&self, event: &ShipmentEvent) -> Result<(), TransportError> {
        let body = event.to_json()?;

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(
                status = status.as_u16(),
                event_type = %event.metadata.event_type,
                "Downstream accepted event"
            );
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(TransportError::status(status.as_u16(), body))
        }
    }
}
