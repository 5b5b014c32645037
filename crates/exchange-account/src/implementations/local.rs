//! Local private-key signer.
//!
//! Signs the way a compliant wallet does: it parses the JSON typed-data
//! envelope and signs the hash computed from it, so anything the envelope gets
//! wrong shows up here and not only in a browser wallet.

use crate::{SignerError, TypedDataSigner};
use alloy_primitives::Address;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use exchange_order::TypedMessage;
use exchange_types::{ConfigSchema, Field, FieldType, Schema, Signature, ValidationError};
use tracing::debug;

/// Signer backed by a private key held in memory.
///
/// Meant for tests, scripts and backend services; interactive users sign
/// through their own wallet instead.
pub struct LocalWallet {
	signer: PrivateKeySigner,
}

impl LocalWallet {
	/// Creates a wallet from a hex-encoded private key, with or without `0x`.
	pub fn new(private_key_hex: &str) -> Result<Self, SignerError> {
		let signer = private_key_hex
			.parse::<PrivateKeySigner>()
			.map_err(|e| SignerError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signer })
	}

	pub fn random() -> Self {
		Self {
			signer: PrivateKeySigner::random(),
		}
	}
}

/// Configuration schema for [`LocalWallet`].
pub struct LocalWalletSchema;

impl ConfigSchema for LocalWalletSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![Field::new("private_key", FieldType::HexBytes { len: 32 })],
			vec![Field::new(
				"timeout_secs",
				FieldType::Integer {
					min: Some(1),
					max: None,
				},
			)],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl TypedDataSigner for LocalWallet {
	async fn address(&self) -> Result<Address, SignerError> {
		Ok(self.signer.address())
	}

	async fn sign_typed_data(
		&self,
		from: Address,
		message: &TypedMessage,
	) -> Result<Signature, SignerError> {
		if from != self.signer.address() {
			return Err(SignerError::Rejected(format!(
				"wallet {} cannot sign for {}",
				self.signer.address(),
				from
			)));
		}

		let hash = message
			.to_typed_data()?
			.eip712_signing_hash()
			.map_err(|e| SignerError::InvalidMessage(format!("Failed to hash typed data: {}", e)))?;
		debug!(%from, %hash, "Signing typed data locally");

		let signature = self
			.signer
			.sign_hash(&hash)
			.await
			.map_err(|e| SignerError::InvalidKey(format!("Failed to sign typed data: {}", e)))?;

		Ok(signature.into())
	}
}

/// Creates a local wallet from a signer config table.
pub fn create_account(config: &toml::Value) -> Result<Box<dyn TypedDataSigner>, SignerError> {
	LocalWalletSchema
		.validate(config)
		.map_err(|e| SignerError::InvalidKey(e.to_string()))?;

	let private_key = config
		.get("private_key")
		.and_then(|v| v.as_str())
		.ok_or_else(|| SignerError::InvalidKey("private_key is required".to_string()))?;

	Ok(Box::new(LocalWallet::new(private_key)?))
}
