//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing and handlers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (outcome counters, handler latency, batch sizes)
//!
//! Consumers:
//!     → Log aggregation (stderr, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Message id flows through every dispatch log event
//! - Metrics are cheap (no-ops until an exporter is installed)

pub mod logging;
pub mod metrics;
