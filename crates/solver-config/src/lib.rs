//! Configuration module for the Waku solver.
//!
//! Environment-variable reads are isolated to a single startup step that
//! produces an immutable [`Config`] value, which is then passed by
//! ownership into the message router. No other component reads ambient
//! environment state, so tests can construct configurations directly.
//!
//! Validation here is fatal: a solver with a missing private key or a
//! mismatched encryption key must not start.

use solver_types::{SecretString, SolverKey};
use std::collections::HashSet;
use thiserror::Error;

/// Environment variable holding the required signing key.
pub const SOLVER_PRIVATE_KEY: &str = "SOLVER_PRIVATE_KEY";
/// Environment variable holding the optional encryption key.
pub const WAKU_ENCRYPTION_PRIVATE_KEY: &str = "WAKU_ENCRYPTION_PRIVATE_KEY";
/// Environment variable holding the comma-separated accepted types.
pub const AVAILABLE_TYPES: &str = "AVAILABLE_TYPES";

/// Errors that can occur during configuration construction.
///
/// All of these abort startup; there is no recovery path for a
/// misconfigured solver.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The required private key is missing or empty.
	#[error("Missing required configuration: {0}")]
	MissingPrivateKey(&'static str),
	/// An encryption key was configured but does not match the private key.
	///
	/// The solver uses a single-key design: the encryption key, when set,
	/// must be the same key the solver signs with.
	#[error("Encryption private key must equal the solver private key")]
	EncryptionKeyMismatch,
}

/// Immutable solver configuration, initialized once at startup.
///
/// Owned by the message router for its process lifetime; never serialized
/// and never logged with secrets exposed.
#[derive(Debug, Clone)]
pub struct Config {
	/// The signing key, classified into its chain family at load time.
	pub private_key: SolverKey,
	/// Optional encryption key enabling the handshake and confidential
	/// channels. Always equal to `private_key` when present.
	pub encryption_private_key: Option<SecretString>,
	/// Uppercased operation types this solver accepts. Empty means accept
	/// all types.
	pub available_types: HashSet<String>,
}

impl Config {
	/// Builds a configuration from explicit values, applying the same
	/// validation as [`Config::from_env`].
	pub fn new(
		private_key: SecretString,
		encryption_private_key: Option<SecretString>,
		available_types: Option<&str>,
	) -> Result<Self, ConfigError> {
		if private_key.is_empty() {
			return Err(ConfigError::MissingPrivateKey(SOLVER_PRIVATE_KEY));
		}

		if let Some(encryption_key) = &encryption_private_key {
			if encryption_key != &private_key {
				return Err(ConfigError::EncryptionKeyMismatch);
			}
		}

		let available_types = available_types
			.unwrap_or_default()
			.split(',')
			.map(|entry| entry.trim().to_uppercase())
			.filter(|entry| !entry.is_empty())
			.collect();

		Ok(Self {
			private_key: SolverKey::classify(private_key),
			encryption_private_key,
			available_types,
		})
	}

	/// Builds a configuration from the process environment.
	///
	/// Reads `SOLVER_PRIVATE_KEY` (required), `WAKU_ENCRYPTION_PRIVATE_KEY`
	/// (optional, must equal the private key), and `AVAILABLE_TYPES`
	/// (optional comma-separated list).
	pub fn from_env() -> Result<Self, ConfigError> {
		let private_key = std::env::var(SOLVER_PRIVATE_KEY)
			.map_err(|_| ConfigError::MissingPrivateKey(SOLVER_PRIVATE_KEY))?;
		let encryption_private_key = std::env::var(WAKU_ENCRYPTION_PRIVATE_KEY).ok();
		let available_types = std::env::var(AVAILABLE_TYPES).ok();

		Self::new(
			SecretString::new(private_key),
			encryption_private_key.map(SecretString::new),
			available_types.as_deref(),
		)
	}

	/// True when an encryption key was configured, enabling the handshake
	/// and confidential channels.
	pub fn encryption_enabled(&self) -> bool {
		self.encryption_private_key.is_some()
	}

	/// Type filter: accepts every type when no types were configured,
	/// otherwise matches case-insensitively against the configured set.
	pub fn accepts_type(&self, message_type: &str) -> bool {
		self.available_types.is_empty()
			|| self.available_types.contains(&message_type.to_uppercase())
	}
}
