//! Configuration loading and management.
//!
//! Configuration is layered with figment. Later sources override earlier ones:
//! 1. Default values (compiled in)
//! 2. Config file: `/var/task/shipment.toml` (optional)
//! 3. Deployment environment variables shared with the other shop services
//! 4. Service-specific environment variables (`SHIPMENT_*`, nested with `__`)
//!
//! # Deployment Environment Variables
//!
//! | Variable | Config Path | Description |
//! |----------|-------------|-------------|
//! | `ORDER_URL` | `http.url` | Order service callback URL |
//! | `RESPONSE_QUEUE` | `sqs.queue_url` | Queue receiving shipment events |
//! | `EVENT_BUS` | `eventbridge.bus_name` | Bus receiving shipment events |
//! | `REGION` / `AWS_REGION` | `aws.region` | AWS region (`REGION` wins) |
//! | `PORT` | `server.port` | HTTP listen port |
//!
//! The configuration is loaded once at process start and handed to the
//! emitter and entrypoint constructors; nothing reads the environment later.

use crate::error::ConfigError;
use crate::simulator::DeliveryWindow;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "/var/task/shipment.toml";
const ENV_PREFIX: &str = "SHIPMENT_";

/// Transport used to emit shipment events.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// POST the envelope to the order service.
    #[default]
    Http,
    /// Send the envelope to an SQS queue.
    Sqs,
    /// Publish the envelope to an EventBridge bus.
    EventBridge,
}

/// How a queue trigger handles a failing record in a batch.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BatchPolicy {
    /// Stop at the first failing record and fail the invocation.
    #[default]
    FailFast,
    /// Process every record and report the failed ones back to the queue.
    ReportItemFailures,
}

/// Log output format.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Main configuration struct for the shipment service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transport used for outgoing events.
    pub transport: TransportKind,
    /// HTTP transport settings.
    pub http: HttpConfig,
    /// SQS transport settings.
    pub sqs: SqsConfig,
    /// EventBridge transport settings.
    pub eventbridge: EventBridgeConfig,
    /// Shared AWS client settings.
    pub aws: AwsConfig,
    /// Simulated delivery settings.
    pub delivery: DeliveryConfig,
    /// HTTP entrypoint settings.
    pub server: ServerConfig,
    /// Queue trigger settings.
    pub batch: BatchConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from all sources, using the default file path.
    ///
    /// # Errors
    ///
    /// Returns an error if any source fails to parse.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration with a custom config file path.
    ///
    /// A missing file is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if any source fails to parse.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_path.as_ref().exists() {
            figment = figment.merge(Toml::file(config_path));
        }

        figment = figment.merge(deployment_env());
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Ok(figment.extract()?)
    }

    /// Creates a new config builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Downstream URL receiving the envelope.
    pub url: Option<String>,
    /// Request timeout in milliseconds.
    #[serde(rename = "timeout_ms", with = "duration_ms")]
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// SQS transport configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SqsConfig {
    /// URL of the queue receiving shipment events.
    pub queue_url: Option<String>,
}

/// EventBridge transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBridgeConfig {
    /// Name or ARN of the bus receiving shipment events.
    pub bus_name: Option<String>,
    /// Value of the `source` field on published entries.
    pub source: String,
}

impl Default for EventBridgeConfig {
    fn default() -> Self {
        Self {
            bus_name: None,
            source: crate::model::SEND_SHIPMENT_SOURCE.to_string(),
        }
    }
}

/// Shared AWS client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    /// Region; falls back to the SDK's default chain when unset.
    pub region: Option<String>,
    /// Endpoint override, for LocalStack and similar.
    pub endpoint_url: Option<String>,
}

/// Simulated delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Minimum transit time in seconds (inclusive).
    pub min_secs: u64,
    /// Maximum transit time in seconds (exclusive).
    pub max_secs: u64,
}

impl DeliveryConfig {
    /// Validates the bounds and converts them into a [`DeliveryWindow`].
    ///
    /// # Errors
    ///
    /// Returns an error if `min_secs >= max_secs`.
    pub fn window(&self) -> Result<DeliveryWindow, ConfigError> {
        DeliveryWindow::new(
            Duration::from_secs(self.min_secs),
            Duration::from_secs(self.max_secs),
        )
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            min_secs: 5,
            max_secs: 120,
        }
    }
}

/// HTTP entrypoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Queue trigger configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Failure handling within a batch.
    pub policy: BatchPolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directives; `RUST_LOG` takes precedence.
    pub filter: Option<String>,
}

/// Builder for constructing configuration programmatically.
#[must_use = "builders do nothing unless .build() is called"]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new config builder with default values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the transport.
    pub fn transport(mut self, transport: TransportKind) -> Self {
        self.config.transport = transport;
        self
    }

    /// Sets the HTTP transport URL.
    pub fn http_url(mut self, url: impl Into<String>) -> Self {
        self.config.http.url = Some(url.into());
        self
    }

    /// Sets the HTTP transport timeout.
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.config.http.timeout = timeout;
        self
    }

    /// Sets the SQS queue URL.
    pub fn queue_url(mut self, url: impl Into<String>) -> Self {
        self.config.sqs.queue_url = Some(url.into());
        self
    }

    /// Sets the EventBridge bus name.
    pub fn bus_name(mut self, name: impl Into<String>) -> Self {
        self.config.eventbridge.bus_name = Some(name.into());
        self
    }

    /// Sets the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.aws.region = Some(region.into());
        self
    }

    /// Sets the AWS endpoint override.
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.config.aws.endpoint_url = Some(url.into());
        self
    }

    /// Sets the simulated delivery bounds in seconds.
    pub fn delivery_secs(mut self, min_secs: u64, max_secs: u64) -> Self {
        self.config.delivery = DeliveryConfig { min_secs, max_secs };
        self
    }

    /// Sets the HTTP listen port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Sets the batch policy.
    pub fn batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.config.batch.policy = policy;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default, Serialize)]
struct PartialHttp {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct PartialSqs {
    #[serde(skip_serializing_if = "Option::is_none")]
    queue_url: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct PartialEventBridge {
    #[serde(skip_serializing_if = "Option::is_none")]
    bus_name: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct PartialAws {
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct PartialServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
}

/// Partial config for deployment env var overrides.
#[derive(Debug, Default, Serialize)]
struct PartialConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    http: Option<PartialHttp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sqs: Option<PartialSqs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eventbridge: Option<PartialEventBridge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aws: Option<PartialAws>,
    #[serde(skip_serializing_if = "Option::is_none")]
    server: Option<PartialServer>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn deployment_env() -> Serialized<PartialConfig> {
    let mut config = PartialConfig::default();

    if let Some(url) = non_empty_var("ORDER_URL") {
        config.http = Some(PartialHttp { url: Some(url) });
    }

    if let Some(queue_url) = non_empty_var("RESPONSE_QUEUE") {
        config.sqs = Some(PartialSqs {
            queue_url: Some(queue_url),
        });
    }

    if let Some(bus_name) = non_empty_var("EVENT_BUS") {
        config.eventbridge = Some(PartialEventBridge {
            bus_name: Some(bus_name),
        });
    }

    if let Some(region) = non_empty_var("REGION").or_else(|| non_empty_var("AWS_REGION")) {
        config.aws = Some(PartialAws {
            region: Some(region),
        });
    }

    if let Some(port) = non_empty_var("PORT").and_then(|p| p.trim().parse().ok()) {
        config.server = Some(PartialServer { port: Some(port) });
    }

    Serialized::defaults(config)
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}
