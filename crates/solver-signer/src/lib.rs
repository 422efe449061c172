//! Signing module for the Waku solver.
//!
//! This module turns a validated proposal into a signed response. Two
//! signing paths exist, selected by the tag on the configured
//! [`SolverKey`]: EVM personal-message signing for "0x"-prefixed hex keys,
//! and detached Ed25519 signing for Solana keys supplied as JSON integer
//! arrays.
//!
//! Signatures are produced over the literal compact JSON serialization of
//! the payload, not a structured hash. Any independent verifier must
//! replicate the same serialization (struct field order, no extra
//! whitespace) or the signatures will not verify.

use serde::Serialize;
use solver_types::{MessageResponse, ProposalResponse, SolverKey};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm;
	pub mod solana;
}

/// Errors that can occur during signing operations.
#[derive(Debug, Error)]
pub enum SignerError {
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when the signing primitive fails.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when the payload cannot be serialized.
	#[error("Serialization failed: {0}")]
	Serialization(String),
}

/// A signature together with the public identity of the key that produced
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedPayload {
	/// Algorithm-specific signature encoding: "0x"-hex for EVM, base64 for
	/// Solana.
	pub signature: String,
	/// Checksummed address (EVM) or base58 public key (Solana).
	pub signer: String,
}

/// Service that signs arbitrary JSON-serializable payloads with the
/// configured solver key.
pub struct SignerService {
	key: SolverKey,
}

impl SignerService {
	/// Creates a new SignerService for the given key.
	pub fn new(key: SolverKey) -> Self {
		Self { key }
	}

	/// Signs the compact JSON serialization of a payload.
	///
	/// Dispatches on the key tag decided at configuration load; no string
	/// sniffing happens here.
	pub fn sign<T: Serialize>(&self, payload: &T) -> Result<SignedPayload, SignerError> {
		let message =
			serde_json::to_string(payload).map_err(|e| SignerError::Serialization(e.to_string()))?;

		match &self.key {
			SolverKey::Evm(key) => implementations::evm::sign_message(message.as_bytes(), key),
			SolverKey::Solana(key) => implementations::solana::sign_message(message.as_bytes(), key),
		}
	}

	/// Wraps a proposal into a signed [`MessageResponse`].
	///
	/// Returns `None` immediately when no proposal is given, and `None`
	/// after logging when signing fails. This function never surfaces an
	/// error to its caller; an unsignable proposal simply produces no
	/// response.
	pub fn sign_proposal(&self, proposal: Option<ProposalResponse>) -> Option<MessageResponse> {
		let proposal = proposal?;

		match self.sign(&proposal) {
			Ok(signed) => Some(MessageResponse {
				proposal,
				signer: signed.signer,
				signature: signed.signature,
			}),
			Err(e) => {
				tracing::error!("Failed to sign proposal: {}", e);
				None
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use solver_types::{NumericValue, SecretString, Transaction};

	const EVM_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
	const EVM_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

	fn evm_signer() -> SignerService {
		SignerService::new(SolverKey::classify(SecretString::from(EVM_KEY)))
	}

	fn solana_signer() -> SignerService {
		// 32-byte seed as a JSON integer array.
		let seed: Vec<u8> = (1..=32).collect();
		let key = serde_json::to_string(&seed).unwrap();
		SignerService::new(SolverKey::classify(SecretString::from(key.as_str())))
	}

	fn proposal() -> ProposalResponse {
		ProposalResponse {
			description: "send funds".to_string(),
			titles: vec!["Send".to_string()],
			calls: vec!["transfer(to, amount)".to_string()],
			transactions: Some(vec![Transaction {
				chain_id: 1,
				to: "0x1234567890123456789012345678901234567890".to_string(),
				value: NumericValue::from("1000"),
				data: "0x".to_string(),
				gas_limit: None,
				gas_price: None,
			}]),
			partial_transactions: None,
		}
	}

	#[test]
	fn test_evm_path_produces_hex_signature_and_checksummed_address() {
		let signed = evm_signer().sign(&proposal()).unwrap();
		assert_eq!(signed.signer, EVM_ADDRESS);
		assert!(signed.signature.starts_with("0x"));
		// 65 signature bytes hex-encoded plus the prefix.
		assert_eq!(signed.signature.len(), 132);
	}

	#[test]
	fn test_evm_signing_is_deterministic() {
		let first = evm_signer().sign(&proposal()).unwrap();
		let second = evm_signer().sign(&proposal()).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn test_solana_path_produces_base64_signature_and_base58_signer() {
		use base64::Engine;

		let signed = solana_signer().sign(&proposal()).unwrap();
		let signature_bytes = base64::engine::general_purpose::STANDARD
			.decode(&signed.signature)
			.unwrap();
		assert_eq!(signature_bytes.len(), 64);
		let signer_bytes = bs58::decode(&signed.signer).into_vec().unwrap();
		assert_eq!(signer_bytes.len(), 32);
	}

	#[test]
	fn test_solana_signing_is_deterministic() {
		let first = solana_signer().sign(&proposal()).unwrap();
		let second = solana_signer().sign(&proposal()).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn test_sign_proposal_none_returns_none() {
		assert!(evm_signer().sign_proposal(None).is_none());
	}

	#[test]
	fn test_sign_proposal_wraps_result() {
		let response = evm_signer().sign_proposal(Some(proposal())).unwrap();
		assert_eq!(response.signer, EVM_ADDRESS);
		assert_eq!(response.proposal, proposal());
		assert!(response.signature.starts_with("0x"));
	}

	#[test]
	fn test_sign_proposal_swallows_bad_key() {
		let broken = SignerService::new(SolverKey::classify(SecretString::from("0xnothex")));
		assert!(broken.sign_proposal(Some(proposal())).is_none());
	}

	#[test]
	fn test_malformed_solana_key_errors() {
		let broken = SignerService::new(SolverKey::classify(SecretString::from("not json")));
		assert!(matches!(
			broken.sign(&proposal()),
			Err(SignerError::InvalidKey(_))
		));
	}
}
