//! Handler contract exposed to integrators.
//!
//! A solver is parameterized by one piece of user logic: the proposal
//! handler, invoked once per admitted inbound message. The handler should
//! return `Ok(None)` when it has nothing to propose; a returned error is
//! tolerated by the router and treated the same way, after logging.

use async_trait::async_trait;
use solver_types::{ProposalResponse, WakuMessage};

/// Error type crossing the integrator boundary.
///
/// Handlers are user code, so no error enum is prescribed; anything
/// printable is accepted and logged.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Trait implemented by the integrator's proposal-building logic.
#[async_trait]
pub trait ProposalHandler: Send + Sync {
	/// Builds a proposal for an admitted request, or `None` when this
	/// solver has nothing to offer for it.
	async fn handle(&self, message: &WakuMessage)
		-> Result<Option<ProposalResponse>, HandlerError>;
}
