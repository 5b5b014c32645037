//! Signing capability for exchange orders.
//!
//! The private key never enters the order crates. Signing goes through an
//! injected [`TypedDataSigner`], which may be a local key, a hardware device or
//! a remote wallet reached over RPC. [`AccountService`] wraps the optional
//! signer with a deadline and keeps signing failures distinct from encoding
//! failures so callers can tell a retry from an abort.

use alloy_primitives::Address;
use async_trait::async_trait;
use exchange_order::{build_typed_message, Domain, OrderError, SignedOrder, TypedMessage};
use exchange_types::{Field, FieldType, Order, Schema, Signature};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub mod implementations {
	pub mod local;
}

pub use implementations::local::{create_account, LocalWallet, LocalWalletSchema};

/// Errors reported by a signing capability.
#[derive(Debug, Error)]
pub enum SignerError {
	/// No signer has been configured.
	#[error("No signer available")]
	Unavailable,
	/// The user or device declined to sign.
	#[error("Signing rejected: {0}")]
	Rejected(String),
	/// The signer did not answer before the deadline.
	#[error("Signing timed out after {0:?}")]
	Timeout(Duration),
	/// The transport to the signer failed.
	#[error("Signer transport error: {0}")]
	Transport(String),
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// The signer answered with something that is not a usable signature.
	#[error("Invalid signer response: {0}")]
	InvalidResponse(String),
	/// The message could not be prepared for signing.
	#[error("Invalid message: {0}")]
	InvalidMessage(String),
}

impl From<OrderError> for SignerError {
	fn from(err: OrderError) -> Self {
		SignerError::InvalidMessage(err.to_string())
	}
}

impl SignerError {
	/// Whether the same request may succeed if sent again.
	pub fn is_retryable(&self) -> bool {
		matches!(self, SignerError::Timeout(_) | SignerError::Transport(_))
	}
}

/// An injected capability that signs typed order messages.
///
/// Implementations receive the full typed message so they can show the user
/// what is being signed and hash it themselves, the way a wallet handling
/// `eth_signTypedData_v4` does.
#[async_trait]
pub trait TypedDataSigner: Send + Sync {
	/// Address whose key this signer holds.
	async fn address(&self) -> Result<Address, SignerError>;

	/// Signs `message` on behalf of `from`.
	async fn sign_typed_data(
		&self,
		from: Address,
		message: &TypedMessage,
	) -> Result<Signature, SignerError>;
}

/// Parses the `0x`-prefixed hex signature a wallet returns over RPC.
pub fn signature_from_response(raw: &str) -> Result<Signature, SignerError> {
	raw.parse::<Signature>()
		.map_err(|e| SignerError::InvalidResponse(e.to_string()))
}

/// Signs orders through an optional injected signer.
pub struct AccountService {
	signer: Option<Box<dyn TypedDataSigner>>,
	timeout: Option<Duration>,
}

impl AccountService {
	pub fn new(signer: Box<dyn TypedDataSigner>) -> Self {
		Self {
			signer: Some(signer),
			timeout: None,
		}
	}

	/// A service with no signer; every signing call fails with
	/// [`SignerError::Unavailable`].
	pub fn without_signer() -> Self {
		Self {
			signer: None,
			timeout: None,
		}
	}

	/// Attaches an injected signer, replacing any configured one.
	pub fn with_signer(mut self, signer: Box<dyn TypedDataSigner>) -> Self {
		self.signer = Some(signer);
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Builds the service from a signer config table.
	///
	/// A table without `private_key` yields a service with no signer; attach
	/// one with [`AccountService::with_signer`]. `timeout_secs` sets the
	/// signing deadline and must be at least one second.
	pub fn from_config(config: &toml::Value) -> Result<Self, SignerError> {
		Schema::new(
			vec![],
			vec![Field::new(
				"timeout_secs",
				FieldType::Integer {
					min: Some(1),
					max: None,
				},
			)],
		)
		.validate(config)
		.map_err(|e| SignerError::InvalidKey(e.to_string()))?;

		let mut service = if config.get("private_key").is_some() {
			Self::new(create_account(config)?)
		} else {
			Self::without_signer()
		};

		if let Some(secs) = config.get("timeout_secs").and_then(|v| v.as_integer()) {
			let secs = u64::try_from(secs)
				.map_err(|_| SignerError::InvalidKey(format!("Invalid timeout_secs: {}", secs)))?;
			service = service.with_timeout(Duration::from_secs(secs));
		}

		Ok(service)
	}

	pub fn has_signer(&self) -> bool {
		self.signer.is_some()
	}

	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}

	pub async fn address(&self) -> Result<Address, SignerError> {
		self.signer()?.address().await
	}

	/// Signs a typed message for its maker.
	///
	/// A failed or timed-out attempt leaves nothing behind; the same message
	/// can be signed again.
	pub async fn sign(&self, message: &TypedMessage) -> Result<Signature, SignerError> {
		let signer = self.signer()?;
		let from = message.signer();
		let request = signer.sign_typed_data(from, message);

		let result = match self.timeout {
			Some(limit) => tokio::time::timeout(limit, request)
				.await
				.map_err(|_| SignerError::Timeout(limit))
				.and_then(|result| result),
			None => request.await,
		};

		let signature = match result {
			Ok(signature) => signature,
			Err(e) => {
				warn!(maker = %from, error = %e, "Signing failed");
				return Err(e);
			}
		};

		signature
			.y_parity()
			.map_err(|e| SignerError::InvalidResponse(e.to_string()))?;

		info!(maker = %from, "Order message signed");
		Ok(signature)
	}

	/// Computes the order key, builds the typed message and signs it.
	pub async fn sign_order(
		&self,
		domain: &Domain,
		order: Order,
	) -> Result<SignedOrder, SignerError> {
		let message = build_typed_message(domain, &order);
		let signature = self.sign(&message).await?;
		Ok(SignedOrder::new(order, signature))
	}

	fn signer(&self) -> Result<&dyn TypedDataSigner, SignerError> {
		self.signer.as_deref().ok_or(SignerError::Unavailable)
	}
}
