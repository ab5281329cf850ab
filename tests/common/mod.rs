//! Shared utilities for integration tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use queue_router::{Handler, HandlerError, InMemoryMessage, Params, QueueMessage};
use serde_json::json;

/// A call observed by a [`RecordingHandler`].
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Call {
    pub message_id: String,
    pub params: Params,
}

/// Records every invocation and succeeds, optionally after a delay.
#[derive(Default)]
pub struct RecordingHandler {
    calls: Mutex<Vec<Call>>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            delay: Some(delay),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl<E: Sync, C: Sync> Handler<E, C> for RecordingHandler {
    async fn handle(
        &self,
        message: &dyn QueueMessage,
        params: &Params,
        _env: &E,
        _ctx: &C,
    ) -> Result<(), HandlerError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().push(Call {
            message_id: message.id().to_string(),
            params: params.clone(),
        });
        Ok(())
    }
}

/// Always fails with the given message.
#[allow(dead_code)]
pub struct FailingHandler(pub &'static str);

#[async_trait]
impl<E: Sync, C: Sync> Handler<E, C> for FailingHandler {
    async fn handle(
        &self,
        _message: &dyn QueueMessage,
        _params: &Params,
        _env: &E,
        _ctx: &C,
    ) -> Result<(), HandlerError> {
        Err(self.0.into())
    }
}

/// Panics instead of returning.
#[allow(dead_code)]
pub struct PanickingHandler(pub &'static str);

#[async_trait]
impl<E: Sync, C: Sync> Handler<E, C> for PanickingHandler {
    async fn handle(
        &self,
        _message: &dyn QueueMessage,
        _params: &Params,
        _env: &E,
        _ctx: &C,
    ) -> Result<(), HandlerError> {
        panic!("{}", self.0)
    }
}

/// Build an object event message.
#[allow(dead_code)]
pub fn event(id: &str, action: &str, key: &str) -> InMemoryMessage {
    InMemoryMessage::new(json!({
        "action": action,
        "bucket": "articles",
        "object": { "key": key, "size": 512 },
    }))
    .with_id(id)
}
