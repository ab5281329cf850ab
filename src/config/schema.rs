//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the queue router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Redelivery delays for handler-issued retries.
    pub retry: RetryConfig,

    /// Routes, in priority order.
    pub routes: Vec<RouteConfig>,
}

/// A route declared in configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging.
    pub name: String,

    /// Message action to match (exact, case-sensitive).
    pub action: String,

    /// Path pattern the object key must match.
    pub pattern: String,

    /// Built-in handler to invoke.
    #[serde(default)]
    pub handler: HandlerKind,
}

/// Built-in handlers selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Log the event and acknowledge it.
    #[default]
    Log,
    /// Fail, leaving the message to the queue's redelivery policy.
    Reject,
    /// Request a delayed redelivery.
    Retry,
}

/// Redelivery delay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Delay added per delivery attempt, in seconds.
    pub step_secs: u32,

    /// Upper bound on the delay, in seconds.
    pub max_delay_secs: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            step_secs: 10,
            max_delay_secs: 43_200, // 12 hours
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (e.g. `info`, `queue_router=debug`).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
