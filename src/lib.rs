//! Queue message router.
//!
//! Dispatches queue event messages to handlers by `action` and a path
//! pattern over the message's object key, acknowledging only the messages
//! whose handler succeeded.

pub mod config;
pub mod handlers;
pub mod message;
pub mod observability;
pub mod resilience;
pub mod routing;

pub use config::schema::RouterConfig;
pub use handlers::{Handler, HandlerError};
pub use message::{InMemoryMessage, MessageBatch, QueueMessage, RetryOptions};
pub use routing::{BatchSummary, DispatchOutcome, Params, PathPattern, Router};
