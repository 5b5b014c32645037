//! Asset classes and the canonical encoding of an asset's on-chain identity.
//!
//! An asset is described to the exchange contract as an `AssetType`: a four
//! byte class selector plus opaque `data` bytes. The data is ABI encoded the
//! same way the contract decodes it, so any change here changes every order
//! key and signature built on top of it.

use crate::common::{parse_address, parse_u256, Address, Bytes, Selector, U256};
use crate::errors::{EncodingError, Result};
use alloy_primitives::{fixed_bytes, keccak256};
use alloy_sol_types::SolValue;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The literal used for "no data". Marks the native asset, which has no contract.
pub const NO_DATA: &str = "0x";

/// `bytes4(keccak256("ETH"))`
pub const ETH: Selector = fixed_bytes!("aaaebeba");
/// `bytes4(keccak256("ERC20"))`
pub const ERC20: Selector = fixed_bytes!("8ae85d84");
/// `bytes4(keccak256("ERC721"))`
pub const ERC721: Selector = fixed_bytes!("73ad2146");
/// `bytes4(keccak256("ERC1155"))`
pub const ERC1155: Selector = fixed_bytes!("973bb640");
/// `bytes4(keccak256("COLLECTION"))`
pub const COLLECTION: Selector = fixed_bytes!("f63c2825");

/// Derives the four byte selector for a class name: the first four bytes of
/// the keccak256 hash of the name's UTF-8 bytes.
pub fn class_id(name: &str) -> Selector {
	let hash = keccak256(name.as_bytes());
	Selector::from_slice(&hash[..4])
}

/// Same as [`class_id`], rendered as `0x` followed by eight hex characters.
pub fn class_id_hex(name: &str) -> String {
	format!("0x{}", hex::encode(class_id(name)))
}

/// Asset classes understood by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
	Native,
	Fungible,
	NftSingle,
	NftMulti,
	Collection,
}

impl AssetClass {
	pub const ALL: [AssetClass; 5] = [
		AssetClass::Native,
		AssetClass::Fungible,
		AssetClass::NftSingle,
		AssetClass::NftMulti,
		AssetClass::Collection,
	];

	/// Canonical name the selector is derived from.
	pub const fn name(&self) -> &'static str {
		match self {
			AssetClass::Native => "ETH",
			AssetClass::Fungible => "ERC20",
			AssetClass::NftSingle => "ERC721",
			AssetClass::NftMulti => "ERC1155",
			AssetClass::Collection => "COLLECTION",
		}
	}

	pub const fn id(&self) -> Selector {
		match self {
			AssetClass::Native => ETH,
			AssetClass::Fungible => ERC20,
			AssetClass::NftSingle => ERC721,
			AssetClass::NftMulti => ERC1155,
			AssetClass::Collection => COLLECTION,
		}
	}

	pub fn from_id(id: Selector) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|class| class.id() == id)
			.ok_or_else(|| EncodingError::UnknownAssetClass(format!("0x{}", hex::encode(id))))
	}

	/// Whether the identity of this class carries a token id.
	pub const fn has_token_id(&self) -> bool {
		matches!(self, AssetClass::NftSingle | AssetClass::NftMulti)
	}
}

impl fmt::Display for AssetClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Parses either a canonical name (`"ERC721"`) or a selector (`"0x73ad2146"`).
impl FromStr for AssetClass {
	type Err = EncodingError;

	fn from_str(s: &str) -> Result<Self> {
		if let Some(class) = Self::ALL.into_iter().find(|class| class.name() == s) {
			return Ok(class);
		}

		let selector = s
			.strip_prefix("0x")
			.and_then(|digits| Selector::from_str(digits).ok())
			.ok_or_else(|| EncodingError::UnknownAssetClass(s.to_string()))?;
		Self::from_id(selector)
	}
}

/// Serialized as the selector, which is what the contract sees.
impl Serialize for AssetClass {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&format!("0x{}", hex::encode(self.id())))
	}
}

impl<'de> Deserialize<'de> for AssetClass {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(de::Error::custom)
	}
}

/// Encoded on-chain identity of an asset.
///
/// Empty for the native asset; renders as [`NO_DATA`] in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetData(Bytes);

impl AssetData {
	pub fn no_data() -> Self {
		Self(Bytes::new())
	}

	pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
		Self(bytes.into())
	}

	pub fn is_no_data(&self) -> bool {
		self.0.is_empty()
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn to_hex(&self) -> String {
		format!("0x{}", hex::encode(&self.0))
	}

	/// Decodes the data with the `(address)` or `(address,uint256)` parameter layout.
	pub fn decode_token(&self) -> Result<(Address, Option<U256>)> {
		match self.0.len() {
			32 => {
				let token = Address::abi_decode(&self.0).map_err(|e| malformed("address", e))?;
				Ok((token, None))
			}
			64 => {
				let (token, token_id) = <(Address, U256)>::abi_decode_params(&self.0)
					.map_err(|e| malformed("address,uint256", e))?;
				Ok((token, Some(token_id)))
			}
			len => Err(EncodingError::MalformedAssetData {
				class: "token".to_string(),
				message: format!("unexpected length {}", len),
			}),
		}
	}
}

fn malformed(layout: &str, e: impl fmt::Display) -> EncodingError {
	EncodingError::MalformedAssetData {
		class: layout.to_string(),
		message: e.to_string(),
	}
}

impl fmt::Display for AssetData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

impl AsRef<[u8]> for AssetData {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

/// Encodes an asset identity from its textual parts.
///
/// With a token id the pair is encoded as `(address,uint256)`. Without one the
/// address is encoded alone, except for the [`NO_DATA`] sentinel which is
/// passed through untouched.
pub fn encode_identity(address: &str, token_id: Option<&str>) -> Result<AssetData> {
	match token_id {
		Some(token_id) => {
			let token = parse_address(address)?;
			let token_id = parse_u256(token_id).map_err(EncodingError::InvalidTokenId)?;
			Ok(encode_token_with_id(token, token_id))
		}
		None if address == NO_DATA => Ok(AssetData::no_data()),
		None => Ok(encode_token(parse_address(address)?)),
	}
}

fn encode_token(token: Address) -> AssetData {
	AssetData(token.abi_encode().into())
}

fn encode_token_with_id(token: Address, token_id: U256) -> AssetData {
	AssetData((token, token_id).abi_encode_params().into())
}

/// Parses an amount given as a decimal (or `0x` hex) integer string.
pub fn parse_amount(value: &str) -> Result<U256> {
	parse_u256(value).map_err(EncodingError::InvalidAmount)
}

/// Typed view of an asset identity. Each variant knows its class and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
	Native,
	Fungible { token: Address },
	NftSingle { token: Address, token_id: U256 },
	NftMulti { token: Address, token_id: U256 },
	Collection { token: Address },
}

impl AssetKind {
	pub const fn class(&self) -> AssetClass {
		match self {
			AssetKind::Native => AssetClass::Native,
			AssetKind::Fungible { .. } => AssetClass::Fungible,
			AssetKind::NftSingle { .. } => AssetClass::NftSingle,
			AssetKind::NftMulti { .. } => AssetClass::NftMulti,
			AssetKind::Collection { .. } => AssetClass::Collection,
		}
	}

	pub fn encode(&self) -> AssetData {
		match *self {
			AssetKind::Native => AssetData::no_data(),
			AssetKind::Fungible { token } | AssetKind::Collection { token } => encode_token(token),
			AssetKind::NftSingle { token, token_id } | AssetKind::NftMulti { token, token_id } => {
				encode_token_with_id(token, token_id)
			}
		}
	}

	/// Contract address of the asset, if it has one.
	pub const fn token(&self) -> Option<Address> {
		match *self {
			AssetKind::Native => None,
			AssetKind::Fungible { token }
			| AssetKind::Collection { token }
			| AssetKind::NftSingle { token, .. }
			| AssetKind::NftMulti { token, .. } => Some(token),
		}
	}

	/// Rebuilds the typed view from a class and its encoded data.
	pub fn from_asset_type(class: AssetClass, data: &AssetData) -> Result<Self> {
		let mismatch = |message: &str| EncodingError::MalformedAssetData {
			class: class.name().to_string(),
			message: message.to_string(),
		};

		if class == AssetClass::Native {
			return if data.is_no_data() {
				Ok(AssetKind::Native)
			} else {
				Err(mismatch("native asset carries no data"))
			};
		}

		match (class, data.decode_token()?) {
			(AssetClass::Fungible, (token, None)) => Ok(AssetKind::Fungible { token }),
			(AssetClass::Collection, (token, None)) => Ok(AssetKind::Collection { token }),
			(AssetClass::NftSingle, (token, Some(token_id))) => {
				Ok(AssetKind::NftSingle { token, token_id })
			}
			(AssetClass::NftMulti, (token, Some(token_id))) => {
				Ok(AssetKind::NftMulti { token, token_id })
			}
			(_, (_, None)) => Err(mismatch("missing token id")),
			(_, (_, Some(_))) => Err(mismatch("unexpected token id")),
		}
	}
}
