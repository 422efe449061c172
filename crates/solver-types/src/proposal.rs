//! Transaction proposal types produced by solver handlers.
//!
//! A handler answers a request with a [`ProposalResponse`]: a described,
//! ordered set of transaction steps. Steps are either fully-specified
//! [`Transaction`]s ready to broadcast, or [`PartialTransaction`] templates
//! whose missing fields a downstream system derives from opaque instruction
//! blobs.

use crate::schemas;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// A numeric wire value that peers encode either as a JSON number or as a
/// decimal string. Large amounts exceed what a JSON number can carry, so
/// the string form is common.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
	Number(u64),
	Text(String),
}

impl From<u64> for NumericValue {
	fn from(value: u64) -> Self {
		Self::Number(value)
	}
}

impl From<&str> for NumericValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

/// A ready-to-broadcast chain call. Fully specified; the recipient needs no
/// further resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	pub chain_id: u64,
	pub to: String,
	pub value: NumericValue,
	/// Hex-encoded calldata.
	pub data: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gas_limit: Option<NumericValue>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gas_price: Option<NumericValue>,
}

/// A template transaction used when the solver cannot fully resolve the
/// call on its own.
///
/// `call_data` and `call_value` are opaque, protocol-specific instruction
/// blobs describing how a downstream system should derive the missing
/// `data`/`value` fields. Their structure is not defined by this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTransaction {
	pub chain_id: u64,
	pub to: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<NumericValue>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub call_data: Option<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub call_value: Option<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gas_limit: Option<NumericValue>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gas_price: Option<NumericValue>,
}

/// A handler's answer to a request: a human-readable description of the
/// proposed steps plus the transactions implementing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalResponse {
	/// Overall description of the proposal.
	pub description: String,
	/// One title per transaction step.
	pub titles: Vec<String>,
	/// One human-readable call description per step.
	pub calls: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transactions: Option<Vec<Transaction>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub partial_transactions: Option<Vec<PartialTransaction>>,
}

impl ProposalResponse {
	/// Validates this proposal against the wire schema and the cross-field
	/// rule: at least one of `transactions` and `partial_transactions` must
	/// be present and non-empty. A proposal with neither is unusable and
	/// must be rejected.
	pub fn validate(&self) -> Result<(), ValidationError> {
		let value = serde_json::to_value(self)
			.map_err(|e| ValidationError::Deserialization(e.to_string()))?;
		schemas::proposal_schema().validate(&value)?;

		let has_transactions = self
			.transactions
			.as_ref()
			.is_some_and(|txs| !txs.is_empty());
		let has_partials = self
			.partial_transactions
			.as_ref()
			.is_some_and(|txs| !txs.is_empty());
		if !has_transactions && !has_partials {
			return Err(ValidationError::InvalidValue {
				field: "transactions".to_string(),
				message: "at least one of transactions or partialTransactions must be non-empty"
					.to_string(),
			});
		}

		Ok(())
	}
}
