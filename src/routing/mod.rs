//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming message (body.action, body.object.key)
//!     → router.rs (validate body, scan routes in registration order)
//!     → route.rs (action equality AND pattern match)
//!     → pattern.rs (segment walk, parameter capture)
//!     → Return: DispatchOutcome (Dispatched, NoRoute, Malformed, HandlerFailed)
//!
//! Route registration (at startup):
//!     (action, pattern, handler)[]
//!     → Parse patterns (fail fast on invalid ones)
//!     → Append in declaration order
//!     → Share the finished router immutably
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - No regex in the hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by registration)

pub mod pattern;
pub mod route;
pub mod router;

pub use pattern::{Params, PathPattern, PathSegment, PatternError};
pub use route::RouteDefinition;
pub use router::{BatchSummary, DispatchOutcome, HandlerPanicked, Router};
