//! Order signatures in the standard Ethereum `r ‖ s ‖ v` layout.

use crate::common::{Address, B256, U256};
use crate::errors::{EncodingError, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 65 byte ECDSA signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Signature {
	pub r: B256,
	pub s: B256,
	pub v: u8,
}

impl Signature {
	pub const LEN: usize = 65;

	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		if bytes.len() != Self::LEN {
			return Err(EncodingError::InvalidSignature(format!(
				"expected {} bytes, got {}",
				Self::LEN,
				bytes.len()
			)));
		}

		Ok(Self {
			r: B256::from_slice(&bytes[..32]),
			s: B256::from_slice(&bytes[32..64]),
			v: bytes[64],
		})
	}

	pub fn as_bytes(&self) -> [u8; 65] {
		let mut bytes = [0u8; Self::LEN];
		bytes[..32].copy_from_slice(self.r.as_slice());
		bytes[32..64].copy_from_slice(self.s.as_slice());
		bytes[64] = self.v;
		bytes
	}

	/// `0x` followed by 130 hex characters.
	pub fn to_hex(&self) -> String {
		format!("0x{}", hex::encode(self.as_bytes()))
	}

	/// Parity of the curve point's y coordinate. Accepts both `27/28` and `0/1`.
	pub fn y_parity(&self) -> Result<bool> {
		match self.v {
			0 | 27 => Ok(false),
			1 | 28 => Ok(true),
			v => Err(EncodingError::InvalidSignature(format!(
				"unsupported recovery id {}",
				v
			))),
		}
	}

	/// Recovers the address that signed `prehash`.
	pub fn recover(&self, prehash: &B256) -> Result<Address> {
		let signature = alloy_primitives::Signature::new(
			U256::from_be_bytes(self.r.0),
			U256::from_be_bytes(self.s.0),
			self.y_parity()?,
		);

		signature
			.recover_address_from_prehash(prehash)
			.map_err(|e| EncodingError::InvalidSignature(e.to_string()))
	}
}

impl From<alloy_primitives::Signature> for Signature {
	fn from(sig: alloy_primitives::Signature) -> Self {
		Self {
			r: B256::from(sig.r().to_be_bytes::<32>()),
			s: B256::from(sig.s().to_be_bytes::<32>()),
			v: if sig.v() { 28 } else { 27 },
		}
	}
}

impl fmt::Display for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

impl FromStr for Signature {
	type Err = EncodingError;

	fn from_str(s: &str) -> Result<Self> {
		let digits = s.strip_prefix("0x").unwrap_or(s);
		let bytes = hex::decode(digits)
			.map_err(|e| EncodingError::InvalidSignature(format!("'{}': {}", s, e)))?;
		Self::from_bytes(&bytes)
	}
}

impl Serialize for Signature {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_hex())
	}
}

impl<'de> Deserialize<'de> for Signature {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::b256;

	fn sample() -> Signature {
		Signature {
			r: b256!("159bad4cdce8e9eeb34f4450941e6e512cd2ceaba2809f6928ad91ce58700064"),
			s: b256!("4cd8e52110ca7d1ba7493828bb811969115aff9d8358a5071bd2e7d15c1362bd"),
			v: 0x1b,
		}
	}

	#[test]
	fn test_signature_hex_shape() {
		let hex = sample().to_hex();
		assert!(hex.starts_with("0x"));
		assert_eq!(hex.len(), 2 + 130);
		assert!(hex.ends_with("1b"));
	}

	#[test]
	fn test_signature_parts_round_trip() {
		let signature = sample();
		let parsed: Signature = signature.to_hex().parse().unwrap();
		assert_eq!(parsed, signature);
		assert_eq!(parsed.r, signature.r);
		assert_eq!(parsed.s, signature.s);
		assert_eq!(parsed.v, signature.v);
		assert_eq!(parsed.to_hex(), signature.to_hex());
	}

	#[test]
	fn test_signature_rejects_wrong_length() {
		assert!(matches!(
			Signature::from_bytes(&[0u8; 64]),
			Err(EncodingError::InvalidSignature(_))
		));
		assert!("0x1234".parse::<Signature>().is_err());
	}

	#[test]
	fn test_signature_serde() {
		let value = serde_json::to_value(sample()).unwrap();
		assert_eq!(value, serde_json::Value::String(sample().to_hex()));
		let back: Signature = serde_json::from_value(value).unwrap();
		assert_eq!(back, sample());
	}

	#[test]
	fn test_y_parity() {
		let mut signature = sample();
		assert!(!signature.y_parity().unwrap());
		signature.v = 28;
		assert!(signature.y_parity().unwrap());
		signature.v = 1;
		assert!(signature.y_parity().unwrap());
		signature.v = 35;
		assert!(signature.y_parity().is_err());
	}

	#[test]
	fn test_from_alloy_signature_normalizes_v() {
		let alloy = alloy_primitives::Signature::new(U256::from(1), U256::from(2), true);
		let signature = Signature::from(alloy);
		assert_eq!(signature.v, 28);
		assert_eq!(signature.r, B256::with_last_byte(1));
		assert_eq!(signature.s, B256::with_last_byte(2));
	}
}
