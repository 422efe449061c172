//! In-memory transport implementation for the solver service.
//!
//! This module provides a memory-based implementation of the WakuTransport
//! trait, useful for testing and the node's loopback mode where no real
//! pub/sub network is available. Sent messages are both routed to local
//! subscribers of the target topic and recorded with their addressing
//! parameters so tests can assert on them.

use crate::{SubscribeOptions, TransportError, WakuTransport};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::{mpsc, Notify};

/// A message recorded by [`MemoryTransport::send`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
	pub payload: serde_json::Value,
	pub reply_to: String,
	pub sender_key: String,
	pub recipient_key: Option<String>,
}

/// In-memory transport implementation.
///
/// Subscriptions are HashMap entries from topic to an unbounded channel
/// sender; `inject` pushes inbound payloads into them and `stop` drops them
/// all, closing every receiver.
pub struct MemoryTransport {
	/// Active topic subscriptions.
	topics: Mutex<HashMap<String, mpsc::UnboundedSender<serde_json::Value>>>,
	/// Subscriptions installed so far, with their options.
	subscriptions: Mutex<Vec<(String, SubscribeOptions)>>,
	/// Messages published through `send`.
	sent: Mutex<Vec<SentMessage>>,
	/// Signals arrival of a new sent message.
	sent_notify: Notify,
	/// The node's own encryption public key, if configured.
	public_key: Option<String>,
	stopped: AtomicBool,
}

impl MemoryTransport {
	/// Creates a transport without encryption support.
	pub fn new() -> Self {
		Self::with_public_key(None)
	}

	/// Creates a transport advertising the given encryption public key.
	pub fn with_public_key(public_key: Option<String>) -> Self {
		Self {
			topics: Mutex::new(HashMap::new()),
			subscriptions: Mutex::new(Vec::new()),
			sent: Mutex::new(Vec::new()),
			sent_notify: Notify::new(),
			public_key,
			stopped: AtomicBool::new(false),
		}
	}

	/// Delivers an inbound payload to the subscriber of a topic, as the
	/// network would. Returns false when nothing is subscribed to it.
	pub fn inject(&self, topic: &str, payload: serde_json::Value) -> bool {
		let topics = self.topics.lock().expect("topic registry poisoned");
		match topics.get(topic) {
			Some(sender) => sender.send(payload).is_ok(),
			None => false,
		}
	}

	/// Topics subscribed so far together with their options.
	pub fn subscriptions(&self) -> Vec<(String, SubscribeOptions)> {
		self.subscriptions
			.lock()
			.expect("subscription registry poisoned")
			.clone()
	}

	/// Snapshot of everything published through `send`.
	pub fn sent_messages(&self) -> Vec<SentMessage> {
		self.sent.lock().expect("sent registry poisoned").clone()
	}

	/// Waits until at least `count` messages have been sent, or the
	/// timeout elapses. Returns the messages sent so far either way.
	pub async fn wait_for_sent(&self, count: usize, timeout: Duration) -> Vec<SentMessage> {
		let deadline = tokio::time::Instant::now() + timeout;
		loop {
			let sent = self.sent_messages();
			if sent.len() >= count {
				return sent;
			}
			tokio::select! {
				_ = self.sent_notify.notified() => {},
				_ = tokio::time::sleep_until(deadline) => return self.sent_messages(),
			}
		}
	}
}

impl Default for MemoryTransport {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl WakuTransport for MemoryTransport {
	async fn subscribe(
		&self,
		topic: &str,
		options: SubscribeOptions,
	) -> Result<mpsc::UnboundedReceiver<serde_json::Value>, TransportError> {
		if self.stopped.load(Ordering::SeqCst) {
			return Err(TransportError::Stopped);
		}

		let (sender, receiver) = mpsc::unbounded_channel();
		self.topics
			.lock()
			.expect("topic registry poisoned")
			.insert(topic.to_string(), sender);
		self.subscriptions
			.lock()
			.expect("subscription registry poisoned")
			.push((topic.to_string(), options));

		Ok(receiver)
	}

	async fn send(
		&self,
		payload: serde_json::Value,
		reply_to: &str,
		sender_key: &str,
		recipient_key: Option<&str>,
	) -> Result<(), TransportError> {
		if self.stopped.load(Ordering::SeqCst) {
			return Err(TransportError::Stopped);
		}

		// Loop the payload back to any local subscriber of the topic.
		self.inject(reply_to, payload.clone());

		self.sent
			.lock()
			.expect("sent registry poisoned")
			.push(SentMessage {
				payload,
				reply_to: reply_to.to_string(),
				sender_key: sender_key.to_string(),
				recipient_key: recipient_key.map(str::to_string),
			});
		self.sent_notify.notify_waiters();

		Ok(())
	}

	fn public_key(&self) -> Option<String> {
		self.public_key.clone()
	}

	async fn stop(&self) -> Result<(), TransportError> {
		self.stopped.store(true, Ordering::SeqCst);
		// Dropping the senders closes every subscribed receiver.
		self.topics
			.lock()
			.expect("topic registry poisoned")
			.clear();
		Ok(())
	}
}
