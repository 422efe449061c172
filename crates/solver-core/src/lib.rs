//! Core message router for the Waku solver.
//!
//! This module provides the transport adapter at the heart of the solver:
//! it owns the topic subscriptions, filters inbound requests by operation
//! type, delegates interpretation to the integrator's handler, validates
//! and signs the resulting proposal, and dispatches the signed response to
//! the correct reply channel with the correct encryption parameters. A thin
//! service façade wraps the router's lifecycle behind a single entry point.

/// The pluggable handler contract exposed to integrators.
pub mod handler;
/// The message router owning subscriptions and the response pipeline.
pub mod router;
/// Service lifecycle façade wrapping the router.
pub mod service;

pub use handler::*;
pub use router::*;
pub use service::*;
