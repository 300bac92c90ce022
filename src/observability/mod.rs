//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router and HTTP server produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the HTTP server's trace spans
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
