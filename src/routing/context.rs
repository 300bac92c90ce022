//! Per-request match context.

use crate::routing::params::Params;

/// Result of matching a request against a route.
///
/// Created fresh for every dispatched request and moved into the handler.
#[derive(Debug, Clone)]
pub struct RouteContext {
    params: Params,
    pattern: String,
}

impl RouteContext {
    pub fn new(params: Params, pattern: impl Into<String>) -> Self {
        Self {
            params,
            pattern: pattern.into(),
        }
    }

    /// Captured value for the parameter `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Template of the route that matched.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}
