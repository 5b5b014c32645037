//! Common types used throughout the exchange crates.

use crate::errors::{EncodingError, Result};
use std::str::FromStr;

// Re-export commonly used ethereum types
pub use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};

/// Timestamp (Unix seconds). Zero means "unbounded".
pub type Timestamp = u64;

/// Four byte selector identifying an asset class or an order data format.
pub type Selector = FixedBytes<4>;

/// Parses an on-chain address, requiring the `0x` prefix and 20 bytes of hex.
pub fn parse_address(value: &str) -> Result<Address> {
	let digits = value
		.strip_prefix("0x")
		.or_else(|| value.strip_prefix("0X"))
		.ok_or_else(|| EncodingError::InvalidAddress(value.to_string()))?;

	if digits.len() != 40 {
		return Err(EncodingError::InvalidAddress(value.to_string()));
	}

	Address::from_str(digits).map_err(|_| EncodingError::InvalidAddress(value.to_string()))
}

/// Parses a non-negative integer literal that must fit in 256 bits.
///
/// Accepts decimal or `0x`-prefixed hex.
pub fn parse_u256(value: &str) -> std::result::Result<U256, String> {
	if value.is_empty() {
		return Err("empty value".to_string());
	}

	let parsed = match value.strip_prefix("0x") {
		Some("") => return Err(format!("'{}' has no digits", value)),
		Some(hex_digits) if hex_digits.bytes().all(|b| b.is_ascii_hexdigit()) => {
			U256::from_str_radix(hex_digits, 16)
		}
		Some(_) => return Err(format!("'{}' is not valid hex", value)),
		None if value.bytes().all(|b| b.is_ascii_digit()) => U256::from_str_radix(value, 10),
		None => return Err(format!("'{}' is not a non-negative integer", value)),
	};

	parsed.map_err(|e| format!("'{}': {}", value, e))
}

/// Serde helper for `U256` values carried as decimal strings on the wire.
pub mod u256_decimal {
	use super::{parse_u256, U256};
	use serde::{de, Deserialize, Deserializer, Serializer};

	pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&value.to_string())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		parse_u256(&s).map_err(de::Error::custom)
	}
}
