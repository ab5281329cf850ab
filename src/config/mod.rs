//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → Router::from_config builds the route table once
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; routes are never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{HandlerKind, LogFormat, ObservabilityConfig, RetryConfig, RouteConfig, RouterConfig};
pub use validation::{validate_config, ValidationError};
