//! Order salts.
//!
//! The salt is the only field that separates two orders with the same maker
//! and assets, so it is drawn from the operating system's CSPRNG rather than
//! assembled from smaller random pieces.

use crate::common::U256;
use crate::errors::{EncodingError, Result};
use rand::{rngs::OsRng, RngCore};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of random bytes drawn for a fresh salt.
pub const SALT_BYTES: usize = 32;

/// Uniqueness value hashed into the order key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Salt(pub U256);

impl Salt {
	pub fn random() -> Self {
		let mut bytes = [0u8; SALT_BYTES];
		OsRng.fill_bytes(&mut bytes);
		Self(U256::from_be_bytes(bytes))
	}

	pub const fn value(&self) -> U256 {
		self.0
	}
}

impl From<U256> for Salt {
	fn from(value: U256) -> Self {
		Self(value)
	}
}

impl From<u64> for Salt {
	fn from(value: u64) -> Self {
		Self(U256::from(value))
	}
}

/// `0x` followed by the minimal lowercase hex form of the value.
impl fmt::Display for Salt {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{:x}", self.0)
	}
}

impl FromStr for Salt {
	type Err = EncodingError;

	fn from_str(s: &str) -> Result<Self> {
		let digits = s
			.strip_prefix("0x")
			.filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()))
			.ok_or_else(|| EncodingError::InvalidSalt(format!("'{}' is not 0x-prefixed hex", s)))?;

		U256::from_str_radix(digits, 16)
			.map(Self)
			.map_err(|e| EncodingError::InvalidSalt(format!("'{}': {}", s, e)))
	}
}

impl Serialize for Salt {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Salt {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(de::Error::custom)
	}
}

/// Generates a fresh salt rendered as a `0x`-prefixed hex string.
pub fn new_salt() -> String {
	Salt::random().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn test_salts_are_unique() {
		let salts: HashSet<String> = (0..1000).map(|_| new_salt()).collect();
		assert_eq!(salts.len(), 1000);
	}

	#[test]
	fn test_salt_has_at_least_128_bits_of_entropy_room() {
		// A 256 bit draw lands below 2^128 with probability 2^-128.
		let salt = Salt::random();
		assert!(salt.value() > U256::from(u128::MAX));
	}

	#[test]
	fn test_salt_formatting() {
		assert_eq!(Salt::from(0x0102030405060708u64).to_string(), "0x102030405060708");
		assert_eq!(Salt::from(1u64).to_string(), "0x1");
		assert_eq!(Salt::default().to_string(), "0x0");
	}

	#[test]
	fn test_salt_parsing() {
		let salt: Salt = "0x0102030405060708".parse().unwrap();
		assert_eq!(salt, Salt::from(0x0102030405060708u64));

		assert!("0102".parse::<Salt>().is_err());
		assert!("0x".parse::<Salt>().is_err());
		assert!("0xnothex".parse::<Salt>().is_err());
		assert!("0x1_0".parse::<Salt>().is_err());
		assert!(" 0x10".parse::<Salt>().is_err());
		assert!("0x10 ".parse::<Salt>().is_err());
	}

	#[test]
	fn test_salt_serde() {
		let salt = Salt::from(255u64);
		let json = serde_json::to_string(&salt).unwrap();
		assert_eq!(json, "\"0xff\"");
		assert_eq!(serde_json::from_str::<Salt>(&json).unwrap(), salt);
	}
}
