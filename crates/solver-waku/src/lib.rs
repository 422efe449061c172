//! Transport abstraction for the Waku solver.
//!
//! The underlying pub/sub network is a black box to the rest of the
//! workspace: it propagates topics, enforces message expiration, and
//! handles its own encryption and key exchange. This module defines the
//! trait the router consumes — subscribe, send, own public key, stop — plus
//! the topic names and subscription options of the solver protocol. An
//! in-memory implementation backs the tests and the node's loopback mode;
//! a production Waku binding implements the same trait out-of-tree.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
}

/// The default (public) topic carrying unencrypted requests.
pub const DEFAULT_TOPIC: &str = "";
/// The fixed topic peers use to request this node's encryption public key.
pub const HANDSHAKE_TOPIC: &str = "handshake";
/// Retention window for confidential messages, in seconds (24 hours).
pub const CONFIDENTIAL_EXPIRATION_SECS: u64 = 24 * 60 * 60;

/// Errors that can occur during transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
	/// Error that occurs when connecting or subscribing fails.
	#[error("Connection error: {0}")]
	Connection(String),
	/// Error that occurs when sending a message fails.
	#[error("Send error: {0}")]
	Send(String),
	/// Error that occurs when the transport has already been stopped.
	#[error("Transport stopped")]
	Stopped,
}

/// Options applied when installing a subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscribeOptions {
	/// Whether messages on this topic are encrypted; the transport
	/// decrypts them before delivery.
	pub encrypted: bool,
	/// How long the network retains undelivered messages on this topic.
	/// `None` means the transport's default, effectively unbounded for the
	/// handshake topic.
	pub expiration_seconds: Option<u64>,
}

/// Trait defining the interface the message router consumes.
///
/// The source contract's per-message callback is modeled as an unbounded
/// channel: the transport pushes each raw JSON payload it delivers for a
/// topic, and a router task drains the receiver.
#[async_trait]
pub trait WakuTransport: Send + Sync {
	/// Subscribes to a topic, returning the stream of raw payloads
	/// delivered for it.
	async fn subscribe(
		&self,
		topic: &str,
		options: SubscribeOptions,
	) -> Result<mpsc::UnboundedReceiver<serde_json::Value>, TransportError>;

	/// Publishes a payload to a topic.
	///
	/// `sender_key` is the identity the message is addressed from. When
	/// `recipient_key` is given the transport encrypts the payload to that
	/// key; otherwise it is sent in the clear.
	async fn send(
		&self,
		payload: serde_json::Value,
		reply_to: &str,
		sender_key: &str,
		recipient_key: Option<&str>,
	) -> Result<(), TransportError>;

	/// This node's own encryption public key, available once the transport
	/// is ready. `None` when the transport runs without encryption support.
	fn public_key(&self) -> Option<String>;

	/// Tears down the transport connection. Subscribed receivers are
	/// closed; no further messages are delivered.
	async fn stop(&self) -> Result<(), TransportError>;
}
