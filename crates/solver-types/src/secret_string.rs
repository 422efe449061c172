//! Secure string type for private key material.
//!
//! `SecretString` wraps sensitive string data so that it is zeroed on drop
//! and redacted in logs, debug output, and serialized form. Every private
//! key in the solver configuration travels inside this type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

/// A string whose contents are zeroed on drop and never exposed through
/// `Debug`, `Display`, or `Serialize`.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	/// Wraps an owned string as secret material.
	pub fn new(s: String) -> Self {
		Self(Zeroizing::new(s))
	}

	/// Exposes the underlying secret.
	///
	/// The caller is responsible for not logging or persisting the
	/// returned slice.
	pub fn expose_secret(&self) -> &str {
		&self.0
	}

	/// Returns true if the secret holds no data.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretString(***REDACTED***)")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "***REDACTED***")
	}
}

impl From<String> for SecretString {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

impl From<&str> for SecretString {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		self.0.as_str() == other.0.as_str()
	}
}

impl Eq for SecretString {}

// Serializing a secret always emits the redacted marker. Configuration is
// read from the environment, never round-tripped through serde, so nothing
// legitimate depends on the real value surviving serialization.
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("***REDACTED***")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(SecretString::new(s))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_debug_is_redacted() {
		let secret = SecretString::from("0xdeadbeef");
		let debug_str = format!("{:?}", secret);
		assert_eq!(debug_str, "SecretString(***REDACTED***)");
		assert!(!debug_str.contains("deadbeef"));
	}

	#[test]
	fn test_display_is_redacted() {
		let secret = SecretString::from("0xdeadbeef");
		assert_eq!(format!("{}", secret), "***REDACTED***");
	}

	#[test]
	fn test_serialize_is_redacted() {
		let secret = SecretString::from("0xdeadbeef");
		let json = serde_json::to_string(&secret).unwrap();
		assert_eq!(json, "\"***REDACTED***\"");
	}

	#[test]
	fn test_expose_secret() {
		let secret = SecretString::from("0xdeadbeef");
		assert_eq!(secret.expose_secret(), "0xdeadbeef");
	}

	#[test]
	fn test_eq() {
		assert_eq!(SecretString::from("a"), SecretString::from("a"));
		assert_ne!(SecretString::from("a"), SecretString::from("b"));
	}
}
