//! Common types module for the Waku solver.
//!
//! This module defines the data model shared by every crate in the
//! workspace: the wire envelope and request body, transaction proposals,
//! the tagged signing-key type, and the JSON validation framework applied
//! at the message boundary.

/// Tagged signing-key type selecting the EVM or Solana signing path.
pub mod key;
/// Wire envelope, request body and outbound response types.
pub mod message;
/// Transaction proposal types produced by solver handlers.
pub mod proposal;
/// Schema definitions for the messages crossing the transport boundary.
pub mod schemas;
/// Secure string type for private keys.
pub mod secret_string;
/// JSON validation framework for ensuring well-formed messages.
pub mod validation;

// Re-export all types for convenient access
pub use key::*;
pub use message::*;
pub use proposal::*;
pub use secret_string::*;
pub use validation::*;
