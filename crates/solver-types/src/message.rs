//! Wire message types for the solver protocol.
//!
//! The transport delivers JSON envelopes; this module defines the typed
//! forms of those envelopes, the request body they carry, and the outbound
//! responses the router publishes. Field names follow the camelCase wire
//! contract shared with peers.

use crate::proposal::ProposalResponse;
use crate::schemas;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// The semantic payload of a request.
///
/// Only `type` and `fromChain` are guaranteed present; every other field is
/// operation-specific, and consumers must tolerate its absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMessage {
	/// Case-insensitive operation discriminator, e.g. "SWAP" or "YIELD".
	#[serde(rename = "type")]
	pub message_type: String,
	/// Chain the request originates from.
	pub from_chain: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub amount: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub from_token: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub from_address: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub to_token: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub recipient_address: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub recipient_chain: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub protocol: Option<String>,
	/// Ordered protocol route when the request spans several protocols.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub protocols: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transaction_hash: Option<String>,
	/// The requester's encryption public key, required on the confidential
	/// channel so the reply can be encrypted back to them.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub signer_pub_key: Option<String>,
}

/// The transport envelope wrapping a request body.
///
/// Constructed from the raw JSON the transport delivers, immutable, and
/// discarded after one pipeline pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WakuMessage {
	/// Message creation time as a unix timestamp.
	pub timestamp: i64,
	/// Topic the response must be sent to, when the requester expects one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reply_to: Option<String>,
	/// The request body.
	pub body: BodyMessage,
}

impl WakuMessage {
	/// Validates a raw transport payload against the envelope schema and
	/// deserializes it.
	pub fn from_value(value: &serde_json::Value) -> Result<Self, ValidationError> {
		schemas::envelope_schema().validate(value)?;
		serde_json::from_value(value.clone())
			.map_err(|e| ValidationError::Deserialization(e.to_string()))
	}
}

/// The signed outbound envelope sent back to a requester.
///
/// Constructed once per successful handler invocation and sent exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
	/// The validated proposal being returned.
	pub proposal: ProposalResponse,
	/// Public address or identity of the signing key.
	pub signer: String,
	/// Signature over the serialized proposal: hex for EVM, base64 for
	/// Solana.
	pub signature: String,
}

/// Acknowledgment body sent on the handshake channel.
///
/// Lets a peer learn this node's encryption public key (and verify the node
/// controls its signing key) before sending confidential traffic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandshakeAck {
	pub signer: String,
	pub signature: String,
	pub signer_pub_key: String,
}
