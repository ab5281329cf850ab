//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Handler fails or defers a message:
//!     → backoff.rs (delay grows with the attempt count, capped)
//!     → message.retry({ delaySeconds })
//!     → queue platform redelivers later
//! ```
//!
//! # Design Decisions
//! - The router never retries internally; redelivery belongs to the platform
//! - Linear growth keeps delays predictable for operators
//! - Delays are capped to the platform's maximum

pub mod backoff;
