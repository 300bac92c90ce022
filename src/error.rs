//! Error types shared across the router.

use thiserror::Error;

/// Boxed error produced by handlers and middlewares.
///
/// The dispatcher never inspects these; they travel back to whoever called
/// [`Router::serve`](crate::routing::Router::serve).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building a router.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A path template could not be compiled.
    #[error("invalid route pattern `{pattern}`: {reason}")]
    Pattern { pattern: String, reason: String },
}

impl RouterError {
    pub(crate) fn pattern(pattern: &str, reason: impl Into<String>) -> Self {
        RouterError::Pattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
