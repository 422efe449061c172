//! Solana signing path.
//!
//! Signs the payload bytes with the detached Ed25519 primitive and reports
//! the signer identity as the base58-encoded public key. Keys arrive as a
//! JSON array of integers holding either a full 64-byte keypair (the
//! standard Solana keypair-file format) or a bare 32-byte seed.

use crate::{SignedPayload, SignerError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signer, SigningKey, KEYPAIR_LENGTH, SECRET_KEY_LENGTH};
use solver_types::SecretString;
use zeroize::Zeroizing;

/// Signs a message with an Ed25519 key parsed from its JSON-array form.
pub(crate) fn sign_message(
	message: &[u8],
	key: &SecretString,
) -> Result<SignedPayload, SignerError> {
	let signing_key = parse_key(key)?;

	let signature = signing_key.sign(message);

	Ok(SignedPayload {
		signature: BASE64.encode(signature.to_bytes()),
		signer: bs58::encode(signing_key.verifying_key().to_bytes()).into_string(),
	})
}

/// Parses a JSON integer array into an Ed25519 signing key.
fn parse_key(key: &SecretString) -> Result<SigningKey, SignerError> {
	let bytes: Zeroizing<Vec<u8>> = Zeroizing::new(
		serde_json::from_str(key.expose_secret())
			.map_err(|e| SignerError::InvalidKey(format!("expected JSON byte array: {}", e)))?,
	);

	match bytes.len() {
		KEYPAIR_LENGTH => {
			let mut keypair = Zeroizing::new([0u8; KEYPAIR_LENGTH]);
			keypair.copy_from_slice(&bytes);
			SigningKey::from_keypair_bytes(&keypair)
				.map_err(|e| SignerError::InvalidKey(e.to_string()))
		},
		SECRET_KEY_LENGTH => {
			let mut seed = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
			seed.copy_from_slice(&bytes);
			Ok(SigningKey::from_bytes(&seed))
		},
		other => Err(SignerError::InvalidKey(format!(
			"expected {} or {} key bytes, got {}",
			SECRET_KEY_LENGTH, KEYPAIR_LENGTH, other
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ed25519_dalek::{Signature, Verifier};

	fn seed_key() -> SecretString {
		let seed: Vec<u8> = (1..=32).collect();
		SecretString::new(serde_json::to_string(&seed).unwrap())
	}

	fn keypair_key() -> SecretString {
		let seed: Vec<u8> = (1..=32).collect();
		let mut seed_bytes = [0u8; 32];
		seed_bytes.copy_from_slice(&seed);
		let signing_key = SigningKey::from_bytes(&seed_bytes);
		let keypair = signing_key.to_keypair_bytes().to_vec();
		SecretString::new(serde_json::to_string(&keypair).unwrap())
	}

	#[test]
	fn test_seed_and_keypair_forms_agree() {
		let from_seed = sign_message(b"{}", &seed_key()).unwrap();
		let from_keypair = sign_message(b"{}", &keypair_key()).unwrap();
		assert_eq!(from_seed, from_keypair);
	}

	#[test]
	fn test_signature_verifies() {
		let message = b"{\"type\":\"SWAP\"}";
		let signed = sign_message(message, &seed_key()).unwrap();

		let signing_key = parse_key(&seed_key()).unwrap();
		let signature_bytes = BASE64.decode(&signed.signature).unwrap();
		let signature = Signature::from_slice(&signature_bytes).unwrap();
		assert!(signing_key
			.verifying_key()
			.verify(message, &signature)
			.is_ok());
	}

	#[test]
	fn test_rejects_wrong_length() {
		let result = sign_message(b"{}", &SecretString::from("[1,2,3]"));
		assert!(matches!(result, Err(SignerError::InvalidKey(_))));
	}

	#[test]
	fn test_rejects_non_array_key() {
		let result = sign_message(b"{}", &SecretString::from("\"a string\""));
		assert!(matches!(result, Err(SignerError::InvalidKey(_))));
	}
}
