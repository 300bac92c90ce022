//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (axum / hyper)
//!     → server.rs (layers: request ID, trace, timeout)
//!     → service.rs (tower::Service over Arc<Router>)
//!     → routing::Router::serve
//!     → response.rs (fixed 404 / 500 bodies)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod service;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::HttpServer;
pub use service::DispatchService;
