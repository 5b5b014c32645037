//! Order hashing and signing payloads for the exchange.
//!
//! This crate turns an [`exchange_types::Order`] into everything the rest of
//! the system needs from it: the order key the contract indexes orders by,
//! the EIP-712 message a wallet signs, the snake case form the order book
//! stores, and calldata for the exchange entry points.

use alloy_primitives::B256;
use exchange_types::EncodingError;
use thiserror::Error;

pub mod calldata;
pub mod eip712;
pub mod hashing;
pub mod signed;
pub mod typed_data;
pub mod wire;

pub use calldata::{cancel_calldata, match_orders_calldata};
pub use hashing::{hash_asset_type, hash_key, struct_hash, OrderKey};
pub use signed::SignedOrder;
pub use typed_data::{build_typed_message, Domain, SignTypedDataRequest, TypedMessage};
pub use wire::{OrderBookEntry, TradeSide, WireAsset};

/// Errors that can occur while preparing an order for signing or submission.
#[derive(Debug, Error)]
pub enum OrderError {
	/// An order field or asset could not be encoded.
	#[error("Encoding error: {0}")]
	Encoding(#[from] EncodingError),
	/// The typed-data envelope could not be built.
	#[error("Typed data error: {0}")]
	TypedData(String),
	/// A received order key does not belong to the order it came with.
	#[error("Order key mismatch: expected {expected}, computed {actual}")]
	KeyMismatch { expected: B256, actual: B256 },
}
