//! Message router for the Waku solver.
//!
//! The router owns up to three subscriptions — public, handshake, and
//! confidential — and runs the shared response pipeline for each inbound
//! message: type filter, handler invocation, proposal validation, signing,
//! and dispatch to the requester's reply topic. Startup-time failures
//! propagate to the caller; per-message failures are logged and isolated so
//! a single bad message never takes the router down.

use crate::handler::ProposalHandler;
use solver_config::Config;
use solver_signer::SignerService;
use solver_types::{HandshakeAck, MessageResponse, WakuMessage};
use solver_waku::{
	SubscribeOptions, TransportError, WakuTransport, CONFIDENTIAL_EXPIRATION_SECS, DEFAULT_TOPIC,
	HANDSHAKE_TOPIC,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Errors that can occur while starting or stopping the router.
#[derive(Debug, Error)]
pub enum RouterError {
	/// Error from the underlying transport.
	#[error("Transport error: {0}")]
	Transport(#[from] TransportError),
	/// The transport has no encryption public key although encryption was
	/// configured. This is a startup precondition, not a per-message
	/// failure.
	#[error("Encryption public key unavailable")]
	PublicKeyUnavailable,
	/// The router was stopped; a stopped router cannot be restarted.
	#[error("Router already stopped")]
	Stopped,
}

/// The three logical channels the router listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
	Public,
	Handshake,
	Confidential,
}

impl Channel {
	fn name(&self) -> &'static str {
		match self {
			Channel::Public => "public",
			Channel::Handshake => "handshake",
			Channel::Confidential => "confidential",
		}
	}
}

/// The transport adapter owning subscriptions and the response pipeline.
///
/// Lifecycle: `Uninitialized → Running → Stopped`. Start is idempotent once
/// it has succeeded; any subscription failure propagates unmodified and
/// leaves the router uninitialized with no channel task running. Stop is
/// one-way; a fresh router must be constructed to run again.
pub struct MessageRouter {
	context: Arc<RouterContext>,
	initialized: bool,
	stopped: bool,
	/// Channel consumer tasks; they end on their own when the transport
	/// closes their receivers.
	tasks: Vec<JoinHandle<()>>,
}

/// Shared state the channel tasks operate on.
struct RouterContext {
	transport: Arc<dyn WakuTransport>,
	config: Config,
	signer: SignerService,
	handler: Arc<dyn ProposalHandler>,
	encryption_enabled: bool,
}

impl MessageRouter {
	/// Creates a new router over the given transport, configuration, and
	/// handler. Nothing is subscribed until [`start`](Self::start).
	pub fn new(
		transport: Arc<dyn WakuTransport>,
		config: Config,
		handler: Arc<dyn ProposalHandler>,
	) -> Self {
		let encryption_enabled = config.encryption_enabled();
		let signer = SignerService::new(config.private_key.clone());
		Self {
			context: Arc::new(RouterContext {
				transport,
				config,
				signer,
				handler,
				encryption_enabled,
			}),
			initialized: false,
			stopped: false,
			tasks: Vec::new(),
		}
	}

	/// Whether the router has started successfully and not yet stopped.
	pub fn is_initialized(&self) -> bool {
		self.initialized
	}

	/// Subscribes to the solver channels and starts consuming them.
	///
	/// Channel order: public, handshake, confidential. The handshake and
	/// confidential channels exist only when an encryption key was
	/// configured; the confidential topic is the transport's own public
	/// key, so that key must be available at startup. All subscriptions
	/// are acquired before any consumer task is spawned, so a failure
	/// leaves no channel partially active.
	pub async fn start(&mut self) -> Result<(), RouterError> {
		if self.stopped {
			return Err(RouterError::Stopped);
		}
		if self.initialized {
			return Ok(());
		}

		let transport = &self.context.transport;

		let public_rx = transport
			.subscribe(DEFAULT_TOPIC, SubscribeOptions::default())
			.await?;

		let encrypted_channels = if self.context.encryption_enabled {
			let handshake_rx = transport
				.subscribe(
					HANDSHAKE_TOPIC,
					SubscribeOptions {
						encrypted: false,
						expiration_seconds: None,
					},
				)
				.await?;

			let own_key = transport
				.public_key()
				.ok_or(RouterError::PublicKeyUnavailable)?;
			let confidential_rx = transport
				.subscribe(
					&own_key,
					SubscribeOptions {
						encrypted: true,
						expiration_seconds: Some(CONFIDENTIAL_EXPIRATION_SECS),
					},
				)
				.await?;

			Some((handshake_rx, confidential_rx))
		} else {
			None
		};

		self.tasks
			.push(Self::spawn_channel(self.context.clone(), public_rx, Channel::Public));
		if let Some((handshake_rx, confidential_rx)) = encrypted_channels {
			self.tasks.push(Self::spawn_channel(
				self.context.clone(),
				handshake_rx,
				Channel::Handshake,
			));
			self.tasks.push(Self::spawn_channel(
				self.context.clone(),
				confidential_rx,
				Channel::Confidential,
			));
		}

		self.initialized = true;
		tracing::info!(
			encryption_enabled = self.context.encryption_enabled,
			"Message router started"
		);
		Ok(())
	}

	/// Stops the transport and marks the router stopped.
	///
	/// In-flight message tasks are neither awaited nor cancelled; they run
	/// to completion against a stopped transport and their sends fail with
	/// a logged error.
	pub async fn stop(&mut self) -> Result<(), RouterError> {
		self.context.transport.stop().await?;
		self.initialized = false;
		self.stopped = true;
		tracing::info!("Message router stopped");
		Ok(())
	}

	/// Spawns the consumer task for one channel. Each inbound payload is
	/// processed in its own task so in-flight messages interleave and a
	/// slow handler does not block the channel.
	fn spawn_channel(
		context: Arc<RouterContext>,
		mut receiver: mpsc::UnboundedReceiver<serde_json::Value>,
		channel: Channel,
	) -> JoinHandle<()> {
		tokio::spawn(async move {
			while let Some(event) = receiver.recv().await {
				let context = context.clone();
				tokio::spawn(async move {
					match channel {
						Channel::Public => context.on_public_message(event).await,
						Channel::Handshake => context.on_handshake_message(event).await,
						Channel::Confidential => context.on_confidential_message(event).await,
					}
				});
			}
			tracing::debug!(channel = channel.name(), "Channel subscription closed");
		})
	}
}

impl RouterContext {
	/// Validates and deserializes a raw transport payload, logging and
	/// dropping anything malformed.
	fn decode(&self, event: &serde_json::Value, channel: Channel) -> Option<WakuMessage> {
		match WakuMessage::from_value(event) {
			Ok(message) => Some(message),
			Err(e) => {
				tracing::warn!(channel = channel.name(), "Dropping malformed message: {}", e);
				None
			},
		}
	}

	/// Applies the type filter shared by all channels.
	fn accepts_type(&self, message: &WakuMessage, channel: Channel) -> bool {
		let accepted = self.config.accepts_type(&message.body.message_type);
		if !accepted {
			tracing::debug!(
				channel = channel.name(),
				message_type = %message.body.message_type,
				"Dropping message outside accepted types"
			);
		}
		accepted
	}

	/// The response pipeline shared by the public and confidential
	/// channels: handler, proposal validation, signing.
	///
	/// Every failure mode ends here — a handler error, an invalid
	/// proposal, a signing failure — logged and mapped to "no response".
	async fn build_response(&self, message: &WakuMessage) -> Option<MessageResponse> {
		let proposal = match self.handler.handle(message).await {
			Ok(Some(proposal)) => proposal,
			Ok(None) => return None,
			Err(e) => {
				tracing::error!(body = ?message.body, "Proposal handler failed: {}", e);
				return None;
			},
		};

		if let Err(e) = proposal.validate() {
			tracing::warn!(body = ?message.body, "Rejecting invalid proposal: {}", e);
			return None;
		}

		self.signer.sign_proposal(Some(proposal))
	}

	/// Serializes an outbound payload; serialization of our own types only
	/// fails on pathological data, but the failure still must not escape
	/// the message task.
	fn encode<T: serde::Serialize>(&self, payload: &T) -> Option<serde_json::Value> {
		match serde_json::to_value(payload) {
			Ok(value) => Some(value),
			Err(e) => {
				tracing::error!("Failed to serialize outbound payload: {}", e);
				None
			},
		}
	}

	async fn on_public_message(&self, event: serde_json::Value) {
		let Some(message) = self.decode(&event, Channel::Public) else {
			return;
		};
		if !self.accepts_type(&message, Channel::Public) {
			return;
		}

		let Some(response) = self.build_response(&message).await else {
			return;
		};
		let Some(reply_to) = message.reply_to.as_deref() else {
			tracing::debug!("Public message carries no replyTo, dropping response");
			return;
		};
		let Some(payload) = self.encode(&response) else {
			return;
		};

		// The reply topic doubles as the route-back address on the public
		// channel; no distinct per-message identity is used.
		if let Err(e) = self.transport.send(payload, reply_to, reply_to, None).await {
			tracing::error!(reply_to, "Failed to send public response: {}", e);
		}
	}

	async fn on_handshake_message(&self, event: serde_json::Value) {
		let Some(message) = self.decode(&event, Channel::Handshake) else {
			return;
		};
		if !self.accepts_type(&message, Channel::Handshake) {
			return;
		}

		// The ack proves control of the signing key with a signature over
		// an empty payload.
		let signed = match self.signer.sign(&serde_json::json!({})) {
			Ok(signed) => signed,
			Err(e) => {
				tracing::error!("Failed to sign handshake ack: {}", e);
				return;
			},
		};

		let Some(own_key) = self.transport.public_key() else {
			tracing::error!("Own public key unavailable, cannot acknowledge handshake");
			return;
		};
		let Some(reply_to) = message.reply_to.as_deref() else {
			tracing::error!("Handshake message carries no replyTo");
			return;
		};

		let ack = HandshakeAck {
			signer: signed.signer,
			signature: signed.signature,
			signer_pub_key: own_key.clone(),
		};
		let Some(payload) = self.encode(&ack) else {
			return;
		};

		if let Err(e) = self.transport.send(payload, reply_to, &own_key, None).await {
			tracing::error!(reply_to, "Failed to send handshake ack: {}", e);
		}
	}

	async fn on_confidential_message(&self, event: serde_json::Value) {
		let Some(message) = self.decode(&event, Channel::Confidential) else {
			return;
		};

		// The peer's key is required before anything else happens, even the
		// type filter: without it no encrypted reply can be addressed.
		let Some(peer_key) = message.body.signer_pub_key.clone() else {
			tracing::error!(body = ?message.body, "Confidential message missing signerPubKey");
			return;
		};

		if !self.accepts_type(&message, Channel::Confidential) {
			return;
		}

		let Some(response) = self.build_response(&message).await else {
			return;
		};
		let Some(own_key) = self.transport.public_key() else {
			tracing::error!("Own public key unavailable, cannot send confidential response");
			return;
		};
		let Some(reply_to) = message.reply_to.as_deref() else {
			tracing::error!("Confidential message carries no replyTo");
			return;
		};
		let Some(payload) = self.encode(&response) else {
			return;
		};

		if let Err(e) = self
			.transport
			.send(payload, reply_to, &own_key, Some(&peer_key))
			.await
		{
			tracing::error!(reply_to, "Failed to send confidential response: {}", e);
		}
	}
}
