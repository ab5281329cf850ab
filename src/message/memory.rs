//! In-process message implementation that records how it was settled.
//!
//! Used by the CLI to replay batch files and by tests to observe
//! acknowledgment state.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::message::batch::MessageBatch;
use crate::message::types::{QueueMessage, RetryOptions};

/// Settlement state of a message. The first settlement wins; later
/// `ack`/`retry` calls are ignored, as on the queue platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MessageState {
    Pending,
    Acked,
    Retried { delay_seconds: Option<u32> },
}

/// A message held in memory.
#[derive(Debug)]
pub struct InMemoryMessage {
    id: String,
    timestamp: DateTime<Utc>,
    body: Value,
    attempts: u32,
    state: Mutex<MessageState>,
}

impl InMemoryMessage {
    /// New first-attempt message with a random id.
    pub fn new(body: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            body,
            attempts: 1,
            state: Mutex::new(MessageState::Pending),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the delivery attempt count (clamped to at least 1).
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn state(&self) -> MessageState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_acked(&self) -> bool {
        self.state() == MessageState::Acked
    }

    fn settle(&self, next: MessageState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == MessageState::Pending {
            *state = next;
        } else {
            let current = *state;
            tracing::debug!(message_id = %self.id, ?current, "Message already settled");
        }
    }
}

impl QueueMessage for InMemoryMessage {
    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn body(&self) -> &Value {
        &self.body
    }

    fn attempts(&self) -> u32 {
        self.attempts
    }

    fn ack(&self) {
        self.settle(MessageState::Acked);
    }

    fn retry(&self, options: RetryOptions) {
        self.settle(MessageState::Retried {
            delay_seconds: options.delay_seconds,
        });
    }
}

/// Serialized form of a message, as found in batch files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageRecord {
    #[serde(default = "random_id")]
    pub id: String,

    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,

    pub body: Value,

    #[serde(default = "first_attempt")]
    pub attempts: u32,
}

fn random_id() -> String {
    Uuid::new_v4().to_string()
}

fn first_attempt() -> u32 {
    1
}

impl From<MessageRecord> for InMemoryMessage {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            timestamp: record.timestamp,
            body: record.body,
            attempts: record.attempts.max(1),
            state: Mutex::new(MessageState::Pending),
        }
    }
}

#[derive(Deserialize)]
struct BatchRecord {
    #[serde(default = "default_queue")]
    queue: String,
    messages: Vec<MessageRecord>,
}

fn default_queue() -> String {
    "default".to_string()
}

impl MessageBatch<InMemoryMessage> {
    /// Parse a batch file: `{"queue": "...", "messages": [{"id", "timestamp", "body", "attempts"}]}`.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        let record: BatchRecord = serde_json::from_str(input)?;
        let messages = record.messages.into_iter().map(InMemoryMessage::from).collect();
        Ok(Self::new(record.queue, messages))
    }
}
