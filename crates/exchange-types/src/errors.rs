//! Error types for order encoding and validation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EncodingError>;

/// Input validation errors raised before anything reaches the hasher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
	#[error("Invalid address: {0}")]
	InvalidAddress(String),

	#[error("Invalid token id: {0}")]
	InvalidTokenId(String),

	#[error("Invalid amount: {0}")]
	InvalidAmount(String),

	#[error("Invalid salt: {0}")]
	InvalidSalt(String),

	#[error("Invalid signature: {0}")]
	InvalidSignature(String),

	#[error("Unknown asset class: {0}")]
	UnknownAssetClass(String),

	#[error("Malformed asset data for {class}: {message}")]
	MalformedAssetData { class: String, message: String },
}
