//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route pattern parses
//! - Validate value ranges (retry delays, metrics address)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Overlapping routes are legal: declaration order decides

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::{PathPattern, PatternError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty name")]
    EmptyRouteName { index: usize },

    #[error("duplicate route name `{0}`")]
    DuplicateRouteName(String),

    #[error("route `{route}` has an empty action")]
    EmptyAction { route: String },

    #[error("route `{route}`: {source}")]
    InvalidPattern { route: String, source: PatternError },

    #[error("retry.step_secs must be greater than zero")]
    ZeroRetryStep,

    #[error("retry.max_delay_secs ({max}) is below retry.step_secs ({step})")]
    MaxDelayBelowStep { step: u32, max: u32 },

    #[error("observability.metrics_address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName { index });
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }

        if route.action.is_empty() {
            errors.push(ValidationError::EmptyAction {
                route: route.name.clone(),
            });
        }

        if let Err(source) = PathPattern::parse(&route.pattern) {
            errors.push(ValidationError::InvalidPattern {
                route: route.name.clone(),
                source,
            });
        }
    }

    let retry = &config.retry;
    if retry.step_secs == 0 {
        errors.push(ValidationError::ZeroRetryStep);
    } else if retry.max_delay_secs < retry.step_secs {
        errors.push(ValidationError::MaxDelayBelowStep {
            step: retry.step_secs,
            max: retry.max_delay_secs,
        });
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
