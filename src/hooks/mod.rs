//! Ready-made middlewares.
//!
//! - `logging.rs`: log every request, never short-circuits
//! - `access.rs`: reject requests missing a required header

pub mod access;
pub mod logging;

pub use access::require_header;
pub use logging::log_requests;
