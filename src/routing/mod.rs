//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     (method, template, handler)
//!     → pattern.rs (compile template to anchored regex)
//!     → route.rs (append to ordered route table)
//!
//! Incoming Request
//!     → middleware.rs (each hook in order; Respond short-circuits)
//!     → router.rs (first route whose method and pattern match)
//!     → handler.rs (invoke with RouteContext)
//!     → Return: handler response, or fixed 404 Not Found
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable once shared
//! - First match wins (registration order, not specificity)
//! - Method comparison is exact and case-sensitive
//! - Deterministic: same input always matches same route

pub mod context;
pub mod handler;
pub mod middleware;
pub mod params;
pub mod pattern;
pub mod route;
pub mod router;

pub use context::RouteContext;
pub use handler::{Handler, HandlerResult, IntoReply};
pub use middleware::{Flow, IntoFlow, Middleware};
pub use params::Params;
pub use pattern::Pattern;
pub use route::Route;
pub use router::Router;
