//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store registered routes in declaration order
//! - Look up the first route matching a message's action and key
//! - Invoke the handler and report an explicit outcome
//! - Fan out a batch and acknowledge only successful dispatches
//!
//! # Design Decisions
//! - Built by value (`on` consumes and returns the router), then shared
//!   read-only; there is no mutation API on a shared router
//! - O(n) route scan (acceptable for typical route counts)
//! - Explicit NoRoute/Malformed rather than silent drops
//! - No internal retries: unacknowledged messages go back to the platform

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use futures_util::FutureExt;
use serde::Serialize;
use thiserror::Error;

use crate::config::schema::{RetryConfig, RouteConfig};
use crate::handlers::{builtin_handler, Handler, HandlerError};
use crate::message::{routing_key, MalformedMessage, MessageBatch, QueueMessage};
use crate::observability::metrics;
use crate::routing::pattern::{Params, PathPattern, PatternError};
use crate::routing::route::RouteDefinition;

/// Result of dispatching one message.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The handler of the route at `route` (registration index) succeeded.
    Dispatched { route: usize },
    /// No registered route matched the action and key.
    NoRoute,
    /// The body lacked a routable action or key.
    Malformed(MalformedMessage),
    /// The matched handler failed.
    HandlerFailed(HandlerError),
}

impl DispatchOutcome {
    /// True when the message should be acknowledged.
    pub fn is_handled(&self) -> bool {
        matches!(self, DispatchOutcome::Dispatched { .. })
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            DispatchOutcome::Dispatched { .. } => "dispatched",
            DispatchOutcome::NoRoute => "no_route",
            DispatchOutcome::Malformed(_) => "malformed",
            DispatchOutcome::HandlerFailed(_) => "handler_failed",
        }
    }
}

/// A handler panicked instead of returning.
#[derive(Debug, Error)]
#[error("handler panicked: {reason}")]
pub struct HandlerPanicked {
    pub reason: String,
}

impl HandlerPanicked {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let reason = match payload.downcast::<String>() {
            Ok(reason) => *reason,
            Err(payload) => payload
                .downcast_ref::<&str>()
                .map_or_else(|| "unknown panic payload".to_string(), |s| s.to_string()),
        };
        Self { reason }
    }
}

/// Per-outcome counts for a processed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub dispatched: usize,
    pub no_route: usize,
    pub malformed: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &DispatchOutcome) {
        self.total += 1;
        match outcome {
            DispatchOutcome::Dispatched { .. } => self.dispatched += 1,
            DispatchOutcome::NoRoute => self.no_route += 1,
            DispatchOutcome::Malformed(_) => self.malformed += 1,
            DispatchOutcome::HandlerFailed(_) => self.failed += 1,
        }
    }

    /// Messages left for redelivery.
    pub fn unacknowledged(&self) -> usize {
        self.total - self.dispatched
    }
}

/// Ordered route table dispatching queue messages to handlers.
///
/// `E` and `C` are the host's environment and execution context, handed to
/// handlers untouched.
pub struct Router<E = (), C = ()> {
    routes: Vec<RouteDefinition<E, C>>,
}

impl<E, C> Router<E, C> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register `handler` for messages with `action` whose key matches
    /// `pattern`. Earlier registrations take priority.
    pub fn on<H>(self, action: impl Into<String>, pattern: &str, handler: H) -> Result<Self, PatternError>
    where
        H: Handler<E, C> + 'static,
    {
        self.on_shared(action, pattern, Arc::new(handler))
    }

    /// Like [`Router::on`], for a handler shared between routes.
    pub fn on_shared(
        mut self,
        action: impl Into<String>,
        pattern: &str,
        handler: Arc<dyn Handler<E, C>>,
    ) -> Result<Self, PatternError> {
        let matcher = PathPattern::parse(pattern)?;
        let route = RouteDefinition::new(action, matcher, handler);
        tracing::debug!(
            index = self.routes.len(),
            action = %route.action(),
            pattern = %route.matcher(),
            "Route registered"
        );
        self.routes.push(route);
        Ok(self)
    }

    pub fn routes(&self) -> &[RouteDefinition<E, C>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// First route matching `action` and `key`, with its captured parameters.
    pub fn find_route(&self, action: &str, key: &str) -> Option<(&RouteDefinition<E, C>, Params)> {
        self.lookup(action, key)
            .map(|(index, params)| (&self.routes[index], params))
    }

    fn lookup(&self, action: &str, key: &str) -> Option<(usize, Params)> {
        self.routes
            .iter()
            .enumerate()
            .find_map(|(index, route)| route.matches(action, key).map(|params| (index, params)))
    }

    /// Route one message to its handler.
    ///
    /// Never acknowledges; that is left to the caller (see
    /// [`Router::process_batch`]).
    pub async fn process_message(&self, message: &dyn QueueMessage, env: &E, ctx: &C) -> DispatchOutcome {
        let outcome = self.dispatch(message, env, ctx).await;
        metrics::record_outcome(outcome.label());
        outcome
    }

    async fn dispatch(&self, message: &dyn QueueMessage, env: &E, ctx: &C) -> DispatchOutcome {
        let (action, key) = match routing_key(message.body()) {
            Ok(routing) => routing,
            Err(error) => {
                tracing::error!(message_id = %message.id(), %error, "Invalid message body");
                return DispatchOutcome::Malformed(error);
            }
        };

        let Some((index, params)) = self.lookup(action, key) else {
            tracing::warn!(message_id = %message.id(), %action, %key, "No handler found");
            return DispatchOutcome::NoRoute;
        };

        let route = &self.routes[index];
        let started = Instant::now();
        // A panicking handler fails only its own message.
        let result = AssertUnwindSafe(route.handler().handle(message, &params, env, ctx))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(HandlerPanicked::from_payload(payload).into()));
        metrics::record_handler_duration(action, started.elapsed());

        match result {
            Ok(()) => {
                tracing::debug!(
                    message_id = %message.id(),
                    %action,
                    %key,
                    route = index,
                    pattern = %route.matcher(),
                    "Message dispatched"
                );
                DispatchOutcome::Dispatched { route: index }
            }
            Err(error) => DispatchOutcome::HandlerFailed(error),
        }
    }

    /// Dispatch every message of a batch concurrently and acknowledge the
    /// ones whose handler succeeded. Everything else stays unacknowledged
    /// for the platform to redeliver.
    pub async fn process_batch<M: QueueMessage>(&self, batch: &MessageBatch<M>, env: &E, ctx: &C) -> BatchSummary {
        metrics::record_batch_size(batch.len());

        let outcomes = join_all(batch.messages().iter().map(|message| async move {
            let outcome = self.process_message(message, env, ctx).await;
            match &outcome {
                DispatchOutcome::Dispatched { .. } => message.ack(),
                DispatchOutcome::HandlerFailed(error) => {
                    tracing::error!(
                        message_id = %message.id(),
                        attempts = message.attempts(),
                        %error,
                        "Failed to process message"
                    );
                }
                DispatchOutcome::NoRoute | DispatchOutcome::Malformed(_) => {}
            }
            outcome
        }))
        .await;

        let mut summary = BatchSummary::default();
        for outcome in &outcomes {
            summary.record(outcome);
        }

        tracing::info!(
            queue = %batch.queue(),
            total = summary.total,
            dispatched = summary.dispatched,
            unacknowledged = summary.unacknowledged(),
            "Batch processed"
        );
        summary
    }
}

impl Router<(), ()> {
    /// Build a router from configured routes, in declaration order.
    pub fn from_config(routes: &[RouteConfig], retry: &RetryConfig) -> Result<Self, PatternError> {
        routes.iter().try_fold(Router::new(), |router, route| {
            router.on_shared(&route.action, &route.pattern, builtin_handler(route, retry))
        })
    }
}

impl<E, C> Default for Router<E, C> {
    fn default() -> Self {
        Self::new()
    }
}
