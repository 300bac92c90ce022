//! A single registered endpoint.

use std::fmt;

use crate::routing::handler::Handler;
use crate::routing::params::Params;
use crate::routing::pattern::Pattern;

/// A `(method, pattern, handler)` entry in the route table.
pub struct Route {
    method: String,
    pattern: Pattern,
    handler: Box<dyn Handler>,
}

impl Route {
    pub fn new(method: impl Into<String>, pattern: Pattern, handler: impl Handler) -> Self {
        Self {
            method: method.into(),
            pattern,
            handler: Box::new(handler),
        }
    }

    /// Captured parameters if both `method` (exact, case-sensitive) and
    /// `path` match this route.
    pub fn matches(&self, method: &str, path: &str) -> Option<Params> {
        if self.method != method {
            return None;
        }
        self.pattern.captures(path)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}
