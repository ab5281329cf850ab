//! The message contract exposed by the queue platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for a programmatic redelivery request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryOptions {
    /// Seconds to wait before the message is delivered again.
    /// `None` leaves the delay to the queue's own policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_seconds: Option<u32>,
}

impl RetryOptions {
    pub fn delayed(delay_seconds: u32) -> Self {
        Self {
            delay_seconds: Some(delay_seconds),
        }
    }
}

/// A single message delivered by the queue.
///
/// `ack` and `retry` are side effects on the platform; implementations must
/// tolerate being called from any task.
pub trait QueueMessage: Send + Sync {
    /// Platform-assigned message identifier.
    fn id(&self) -> &str;

    /// Time the message was enqueued.
    fn timestamp(&self) -> DateTime<Utc>;

    /// Raw message body.
    fn body(&self) -> &Value;

    /// Delivery attempt count, starting at 1.
    fn attempts(&self) -> u32;

    /// Mark the message as handled so it is not delivered again.
    fn ack(&self);

    /// Ask the platform to deliver the message again.
    fn retry(&self, options: RetryOptions);
}
