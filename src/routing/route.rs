//! Route definitions.

use std::fmt;
use std::sync::Arc;

use crate::handlers::Handler;
use crate::routing::pattern::{Params, PathPattern};

/// An `(action, pattern, handler)` triple. Immutable once created.
pub struct RouteDefinition<E = (), C = ()> {
    action: String,
    matcher: PathPattern,
    handler: Arc<dyn Handler<E, C>>,
}

impl<E, C> RouteDefinition<E, C> {
    pub fn new(action: impl Into<String>, matcher: PathPattern, handler: Arc<dyn Handler<E, C>>) -> Self {
        Self {
            action: action.into(),
            matcher,
            handler,
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn matcher(&self) -> &PathPattern {
        &self.matcher
    }

    pub fn handler(&self) -> &Arc<dyn Handler<E, C>> {
        &self.handler
    }

    /// Parameters captured when both the action and the key match.
    pub fn matches(&self, action: &str, key: &str) -> Option<Params> {
        if self.action != action {
            return None;
        }
        self.matcher.match_path(key)
    }
}

impl<E, C> Clone for RouteDefinition<E, C> {
    fn clone(&self) -> Self {
        Self {
            action: self.action.clone(),
            matcher: self.matcher.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<E, C> fmt::Debug for RouteDefinition<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("action", &self.action)
            .field("pattern", &self.matcher.as_str())
            .field("handler", &"dyn Handler")
            .finish()
    }
}
