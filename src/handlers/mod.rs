//! Message handlers.
//!
//! # Responsibilities
//! - Define the `Handler` capability routes dispatch to
//! - Provide built-in handlers for config-declared routes
//!
//! # Design Decisions
//! - One trait method; routes hold `Arc<dyn Handler>` so any type can serve
//! - `env` and `ctx` are opaque pass-through values owned by the host
//! - Failures are boxed errors: the router only needs to log them and leave
//!   the message unacknowledged

pub mod builtin;

use async_trait::async_trait;

use crate::message::QueueMessage;
use crate::routing::Params;

/// Error returned by a failing handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A handler invoked for messages matching a route.
#[async_trait]
pub trait Handler<E = (), C = ()>: Send + Sync {
    /// Handle one message. Returning `Ok` lets the router acknowledge it.
    async fn handle(
        &self,
        message: &dyn QueueMessage,
        params: &Params,
        env: &E,
        ctx: &C,
    ) -> Result<(), HandlerError>;
}

pub use builtin::{builtin_handler, LogHandler, RejectHandler, RetryHandler};
