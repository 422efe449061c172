//! EVM signing path.
//!
//! Signs the payload bytes with the chain's personal-message scheme
//! (EIP-191 prefix applied by the signer) and reports the signer identity
//! as the EIP-55 checksummed account address.

use crate::{SignedPayload, SignerError};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use solver_types::SecretString;
use zeroize::Zeroizing;

/// Signs a message with a hex-encoded secp256k1 private key.
///
/// The key may carry an optional "0x" prefix. Signatures are returned as
/// "0x"-prefixed hex over the 65 r||s||v bytes.
pub(crate) fn sign_message(
	message: &[u8],
	key: &SecretString,
) -> Result<SignedPayload, SignerError> {
	let raw = Zeroizing::new(
		hex::decode(key.expose_secret().trim_start_matches("0x"))
			.map_err(|e| SignerError::InvalidKey(e.to_string()))?,
	);
	let signer =
		PrivateKeySigner::from_slice(&raw).map_err(|e| SignerError::InvalidKey(e.to_string()))?;

	let signature = signer
		.sign_message_sync(message)
		.map_err(|e| SignerError::SigningFailed(e.to_string()))?;

	Ok(SignedPayload {
		signature: format!("0x{}", hex::encode(signature.as_bytes())),
		signer: signer.address().to_checksum(None),
	})
}
