//! Service lifecycle façade for the Waku solver.
//!
//! Exposes the single public entry point integrators use: construct
//! configuration, build the router, start it, and hand back a handle whose
//! only other operation is `stop`.

use crate::handler::ProposalHandler;
use crate::router::{MessageRouter, RouterError};
use solver_config::{Config, ConfigError};
use solver_waku::WakuTransport;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while starting or stopping the service.
#[derive(Debug, Error)]
pub enum ServiceError {
	/// Error constructing the solver configuration.
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),
	/// Error from the message router.
	#[error("Router error: {0}")]
	Router(#[from] RouterError),
}

/// Handle to a running solver service.
pub struct SolverService {
	router: MessageRouter,
}

impl SolverService {
	/// Starts a solver with configuration read from the environment.
	///
	/// Fails on configuration errors (missing private key, mismatched
	/// encryption key) and on transport-initialization errors; in either
	/// case no partial router is left running.
	pub async fn start(
		transport: Arc<dyn WakuTransport>,
		handler: Arc<dyn ProposalHandler>,
	) -> Result<Self, ServiceError> {
		let config = Config::from_env()?;
		Self::start_with_config(config, transport, handler).await
	}

	/// Starts a solver with an explicitly constructed configuration.
	pub async fn start_with_config(
		config: Config,
		transport: Arc<dyn WakuTransport>,
		handler: Arc<dyn ProposalHandler>,
	) -> Result<Self, ServiceError> {
		let mut router = MessageRouter::new(transport, config, handler);
		router.start().await?;
		Ok(Self { router })
	}

	/// Stops the service, tearing down the transport connection.
	///
	/// Consumes the handle; a stopped service cannot be restarted.
	pub async fn stop(mut self) -> Result<(), ServiceError> {
		self.router.stop().await?;
		Ok(())
	}
}
