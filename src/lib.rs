//! Minimal HTTP request router.
//!
//! Routes are `(method, path template, handler)` triples matched in
//! registration order after a chain of global middlewares. The crate hosts
//! the router on axum/hyper, but [`Router::serve`] is independent of any
//! server and can be driven directly.

// Core
pub mod error;
pub mod routing;

// Hosting
pub mod config;
pub mod http;
pub mod hooks;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use error::{BoxError, RouterError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Flow, RouteContext, Router};
