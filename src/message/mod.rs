//! Message and batch contracts.
//!
//! # Data Flow
//! ```text
//! Queue platform delivers a batch
//!     → batch.rs (MessageBatch: ordered, read-only messages)
//!     → types.rs (QueueMessage: id, body, attempts, ack/retry)
//!     → body.rs (routing key: body.action + body.object.key)
//!     → routing engine
//! ```
//!
//! # Design Decisions
//! - The router reads only `action` and `object.key`; the rest of the body is
//!   opaque and left to handlers
//! - Acknowledgment is per message; batch-wide ack/retry exist for hosts
//! - memory.rs provides a recording implementation for the CLI and tests

pub mod batch;
pub mod body;
pub mod memory;
pub mod types;

pub use batch::MessageBatch;
pub use body::{routing_key, EventBody, MalformedMessage, ObjectRef};
pub use memory::{InMemoryMessage, MessageRecord, MessageState};
pub use types::{QueueMessage, RetryOptions};
