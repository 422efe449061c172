//! Schema definitions for messages crossing the transport boundary.
//!
//! These schemas describe the wire contract of the solver protocol: the
//! inbound envelope with its request body, and the proposal shape a handler
//! must return before it is signed and sent back. Fields not named here are
//! ignored so unknown extensions from newer peers do not break older nodes.

use crate::validation::{Field, FieldType, Schema};

/// Schema for the request body carried inside an envelope.
///
/// Only `type` and `fromChain` are guaranteed by the transport contract;
/// everything else is operation-specific and optional.
pub fn body_schema() -> Schema {
	Schema::new(
		vec![
			Field::new("type", FieldType::String),
			Field::new("fromChain", FieldType::String),
		],
		vec![
			Field::new("amount", FieldType::String),
			Field::new("fromToken", FieldType::String),
			Field::new("fromAddress", FieldType::String),
			Field::new("toToken", FieldType::String),
			Field::new("recipientAddress", FieldType::String),
			Field::new("recipientChain", FieldType::String),
			Field::new("description", FieldType::String),
			Field::new("protocol", FieldType::String),
			Field::new("protocols", FieldType::Array(Box::new(FieldType::String))),
			Field::new("transactionHash", FieldType::String),
			Field::new("signerPubKey", FieldType::String),
		],
	)
}

/// Schema for the transport envelope delivered to subscription callbacks.
pub fn envelope_schema() -> Schema {
	Schema::new(
		vec![
			Field::new(
				"timestamp",
				FieldType::Integer {
					min: Some(0),
					max: None,
				},
			),
			Field::new("body", FieldType::Object(body_schema())),
		],
		vec![Field::new("replyTo", FieldType::String)],
	)
}

/// Schema for a fully-specified, ready-to-broadcast transaction.
pub fn transaction_schema() -> Schema {
	Schema::new(
		vec![
			Field::new(
				"chainId",
				FieldType::Integer {
					min: Some(0),
					max: None,
				},
			),
			Field::new("to", FieldType::String),
			Field::new("value", FieldType::NumberOrString),
			Field::new("data", FieldType::String),
		],
		vec![
			Field::new("gasLimit", FieldType::NumberOrString),
			Field::new("gasPrice", FieldType::NumberOrString),
		],
	)
}

/// Schema for a template transaction whose value/data are resolved
/// downstream from the opaque instruction blobs.
pub fn partial_transaction_schema() -> Schema {
	Schema::new(
		vec![
			Field::new(
				"chainId",
				FieldType::Integer {
					min: Some(0),
					max: None,
				},
			),
			Field::new("to", FieldType::String),
		],
		vec![
			Field::new("value", FieldType::NumberOrString),
			Field::new("data", FieldType::String),
			Field::new("callData", FieldType::Any),
			Field::new("callValue", FieldType::Any),
			Field::new("gasLimit", FieldType::NumberOrString),
			Field::new("gasPrice", FieldType::NumberOrString),
		],
	)
}

/// Schema for a handler-produced proposal.
///
/// The cross-field rule (at least one of `transactions` and
/// `partialTransactions` non-empty) lives in
/// [`ProposalResponse::validate`](crate::proposal::ProposalResponse::validate)
/// on top of this structural check.
pub fn proposal_schema() -> Schema {
	Schema::new(
		vec![
			Field::new("description", FieldType::String),
			Field::new("titles", FieldType::Array(Box::new(FieldType::String))),
			Field::new("calls", FieldType::Array(Box::new(FieldType::String))),
		],
		vec![
			Field::new(
				"transactions",
				FieldType::Array(Box::new(FieldType::Object(transaction_schema()))),
			),
			Field::new(
				"partialTransactions",
				FieldType::Array(Box::new(FieldType::Object(partial_transaction_schema()))),
			),
		],
	)
}
