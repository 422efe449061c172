//! Tagged signing-key type for the solver.
//!
//! The raw key string is the only discriminator available for selecting a
//! signing algorithm: a "0x"-prefixed hex string is an EVM private key,
//! anything else is expected to be a Solana keypair encoded as a JSON array
//! of integers. Rather than re-sniffing the string on every signing call,
//! the key is classified once when the configuration is loaded and carried
//! as a tagged variant from then on.

use crate::secret_string::SecretString;
use std::fmt;

/// A solver signing key, tagged with the chain family it belongs to.
#[derive(Clone, PartialEq, Eq)]
pub enum SolverKey {
	/// A "0x"-prefixed hex-encoded secp256k1 private key.
	Evm(SecretString),
	/// An Ed25519 keypair or seed encoded as a JSON array of integers.
	Solana(SecretString),
}

impl SolverKey {
	/// Classifies a raw key string by its format.
	///
	/// This dispatch rule must match the one used by peers verifying the
	/// resulting signatures, so it is deliberately format-based and nothing
	/// more: "0x" prefix selects EVM, everything else Solana.
	pub fn classify(key: SecretString) -> Self {
		if key.expose_secret().starts_with("0x") {
			Self::Evm(key)
		} else {
			Self::Solana(key)
		}
	}

	/// Returns the underlying secret regardless of tag.
	pub fn secret(&self) -> &SecretString {
		match self {
			Self::Evm(key) | Self::Solana(key) => key,
		}
	}
}

impl fmt::Debug for SolverKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Evm(_) => write!(f, "SolverKey::Evm(***REDACTED***)"),
			Self::Solana(_) => write!(f, "SolverKey::Solana(***REDACTED***)"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hex_prefix_classifies_as_evm() {
		let key = SolverKey::classify(SecretString::from(
			"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
		));
		assert!(matches!(key, SolverKey::Evm(_)));
	}

	#[test]
	fn test_json_array_classifies_as_solana() {
		let key = SolverKey::classify(SecretString::from("[1,2,3,4]"));
		assert!(matches!(key, SolverKey::Solana(_)));
	}

	#[test]
	fn test_debug_is_redacted() {
		let key = SolverKey::classify(SecretString::from("0xdeadbeef"));
		let debug_str = format!("{:?}", key);
		assert!(!debug_str.contains("deadbeef"));
		assert!(debug_str.contains("Evm"));
	}
}
