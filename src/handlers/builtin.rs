//! Handlers available to routes declared in configuration.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::schema::{HandlerKind, RetryConfig, RouteConfig};
use crate::handlers::{Handler, HandlerError};
use crate::message::{QueueMessage, RetryOptions};
use crate::resilience::backoff::redelivery_delay;
use crate::routing::Params;

/// Logs the accepted event and succeeds.
#[derive(Debug, Clone)]
pub struct LogHandler {
    route: String,
}

impl LogHandler {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
        }
    }
}

#[async_trait]
impl<E: Sync, C: Sync> Handler<E, C> for LogHandler {
    async fn handle(
        &self,
        message: &dyn QueueMessage,
        params: &Params,
        _env: &E,
        _ctx: &C,
    ) -> Result<(), HandlerError> {
        tracing::info!(
            route = %self.route,
            message_id = %message.id(),
            attempts = message.attempts(),
            params = ?params,
            body = %message.body(),
            "Accepted event"
        );
        Ok(())
    }
}

/// Returned by [`RejectHandler`].
#[derive(Debug, Error)]
#[error("route `{route}` rejected message {message_id}")]
pub struct Rejected {
    pub route: String,
    pub message_id: String,
}

/// Always fails, leaving the message to the queue's redelivery policy.
#[derive(Debug, Clone)]
pub struct RejectHandler {
    route: String,
}

impl RejectHandler {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
        }
    }
}

#[async_trait]
impl<E: Sync, C: Sync> Handler<E, C> for RejectHandler {
    async fn handle(
        &self,
        message: &dyn QueueMessage,
        _params: &Params,
        _env: &E,
        _ctx: &C,
    ) -> Result<(), HandlerError> {
        Err(Box::new(Rejected {
            route: self.route.clone(),
            message_id: message.id().to_string(),
        }))
    }
}

/// Requests a delayed redelivery that grows with the attempt count.
///
/// The message is settled by the retry call, so the router's subsequent
/// ack has no effect on the platform.
#[derive(Debug, Clone)]
pub struct RetryHandler {
    route: String,
    policy: RetryConfig,
}

impl RetryHandler {
    pub fn new(route: impl Into<String>, policy: RetryConfig) -> Self {
        Self {
            route: route.into(),
            policy,
        }
    }
}

#[async_trait]
impl<E: Sync, C: Sync> Handler<E, C> for RetryHandler {
    async fn handle(
        &self,
        message: &dyn QueueMessage,
        _params: &Params,
        _env: &E,
        _ctx: &C,
    ) -> Result<(), HandlerError> {
        let delay = redelivery_delay(
            message.attempts(),
            self.policy.step_secs,
            self.policy.max_delay_secs,
        );
        tracing::info!(
            route = %self.route,
            message_id = %message.id(),
            attempts = message.attempts(),
            delay_secs = delay,
            "Deferring message"
        );
        message.retry(RetryOptions::delayed(delay));
        Ok(())
    }
}

/// Build the handler a config route refers to.
pub fn builtin_handler(route: &RouteConfig, retry: &RetryConfig) -> Arc<dyn Handler> {
    match route.handler {
        HandlerKind::Log => Arc::new(LogHandler::new(&route.name)),
        HandlerKind::Reject => Arc::new(RejectHandler::new(&route.name)),
        HandlerKind::Retry => Arc::new(RetryHandler::new(&route.name, retry.clone())),
    }
}
