//! Main entry point for the Waku solver node.
//!
//! This binary wires a demo proposal handler into the message router over
//! the in-memory loopback transport and runs until interrupted. It shows
//! the complete integration surface: environment configuration, transport
//! construction, handler implementation, and service lifecycle. A real
//! deployment swaps the loopback transport for a Waku binding implementing
//! the same trait.

use async_trait::async_trait;
use clap::Parser;
use solver_core::{HandlerError, ProposalHandler, SolverService};
use solver_types::{NumericValue, ProposalResponse, Transaction, WakuMessage};
use solver_waku::implementations::memory::MemoryTransport;
use std::sync::Arc;

/// Command-line arguments for the solver node.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Demo handler proposing a single self-transfer for swap requests.
///
/// Placeholder for the integrator's actual solving logic; it exists so the
/// node exercises the full pipeline end to end.
struct DemoSwapHandler;

#[async_trait]
impl ProposalHandler for DemoSwapHandler {
	async fn handle(
		&self,
		message: &WakuMessage,
	) -> Result<Option<ProposalResponse>, HandlerError> {
		if !message.body.message_type.eq_ignore_ascii_case("swap") {
			return Ok(None);
		}

		let Some(recipient) = message.body.recipient_address.clone() else {
			tracing::debug!("Swap request without recipientAddress, nothing to propose");
			return Ok(None);
		};
		let amount = message.body.amount.clone().unwrap_or_else(|| "0".to_string());

		Ok(Some(ProposalResponse {
			description: format!("Transfer {} to {}", amount, recipient),
			titles: vec!["Transfer".to_string()],
			calls: vec![format!("transfer({}, {})", recipient, amount)],
			transactions: Some(vec![Transaction {
				chain_id: 1,
				to: recipient,
				value: NumericValue::Text(amount),
				data: "0x".to_string(),
				gas_limit: None,
				gas_price: None,
			}]),
			partial_transactions: None,
		}))
	}
}

/// Main entry point for the solver node.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Starts the solver service with environment configuration
/// 4. Runs until interrupted, then stops the service
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Starting solver node");

	let transport = Arc::new(MemoryTransport::new());
	let service = SolverService::start(transport, Arc::new(DemoSwapHandler)).await?;
	tracing::info!("Solver running; press ctrl-c to stop");

	tokio::signal::ctrl_c().await?;

	service.stop().await?;
	tracing::info!("Stopped solver node");
	Ok(())
}
