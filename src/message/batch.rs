//! Batches of messages as delivered by the platform.

use crate::message::types::{QueueMessage, RetryOptions};

/// An ordered, read-only group of messages from one queue.
#[derive(Debug, Clone)]
pub struct MessageBatch<M> {
    queue: String,
    messages: Vec<M>,
}

impl<M> MessageBatch<M> {
    pub fn new(queue: impl Into<String>, messages: Vec<M>) -> Self {
        Self {
            queue: queue.into(),
            messages,
        }
    }

    /// Name of the queue the batch was pulled from.
    pub fn queue(&self) -> &str {
        &self.queue
    }

    pub fn messages(&self) -> &[M] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<M: QueueMessage> MessageBatch<M> {
    /// Acknowledge every message in the batch.
    pub fn ack_all(&self) {
        for message in &self.messages {
            message.ack();
        }
    }

    /// Request redelivery of every message in the batch.
    pub fn retry_all(&self, options: RetryOptions) {
        for message in &self.messages {
            message.retry(options);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::memory::{InMemoryMessage, MessageState};
    use serde_json::json;

    fn batch() -> MessageBatch<InMemoryMessage> {
        MessageBatch::new(
            "events",
            vec![
                InMemoryMessage::new(json!({})),
                InMemoryMessage::new(json!({})),
            ],
        )
    }

    #[test]
    fn test_ack_all() {
        let batch = batch();
        assert_eq!(batch.queue(), "events");
        assert_eq!(batch.len(), 2);

        batch.ack_all();
        assert!(batch.messages().iter().all(InMemoryMessage::is_acked));
    }

    #[test]
    fn test_retry_all() {
        let batch = batch();
        batch.retry_all(RetryOptions::delayed(30));
        for message in batch.messages() {
            assert_eq!(
                message.state(),
                MessageState::Retried {
                    delay_seconds: Some(30)
                }
            );
        }
    }
}
