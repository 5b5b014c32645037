//! Order-book wire form.
//!
//! The order book stores orders in snake case with decimal amounts and hex
//! keys. Whether an order is a buy offer comes from the trade being placed,
//! not from the order itself.

use crate::hashing::OrderKey;
use crate::signed::SignedOrder;
use crate::OrderError;
use alloy_primitives::{Address, Bytes, U256};
use exchange_types::{
	parse_u256, u256_decimal, Asset, AssetClass, AssetData, AssetKind, AssetType, EncodingError,
	Order, Salt, Selector, Signature, Timestamp,
};
use serde::{Deserialize, Serialize};

/// Semantic side of the trade an order was created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
	/// The maker lists an asset for sale.
	Sell,
	/// The maker offers payment for someone else's asset.
	Buy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAsset {
	/// Canonical class name, e.g. `"ERC721"`.
	pub asset_class: String,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub contract: Option<Address>,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub token_id: Option<String>,
	pub data: AssetData,
	#[serde(with = "u256_decimal")]
	pub value: U256,
}

impl WireAsset {
	fn from_asset(asset: &Asset) -> Result<Self, OrderError> {
		let kind = asset.asset_type.kind()?;
		let token_id = match kind {
			AssetKind::NftSingle { token_id, .. } | AssetKind::NftMulti { token_id, .. } => {
				Some(token_id.to_string())
			}
			_ => None,
		};

		Ok(Self {
			asset_class: asset.class().name().to_string(),
			contract: kind.token(),
			token_id,
			data: asset.asset_type.data.clone(),
			value: asset.value,
		})
	}

	fn to_asset(&self) -> Result<Asset, OrderError> {
		let asset_class: AssetClass = self.asset_class.parse()?;
		let asset_type = AssetType::new(asset_class, self.data.clone());
		// Reject data that does not decode for its class.
		let kind = asset_type.kind()?;
		self.check_metadata(&kind)?;

		Ok(Asset {
			asset_type,
			value: self.value,
		})
	}

	/// The displayed contract and token id must match what `data` encodes,
	/// since only `data` is covered by the key and signature.
	fn check_metadata(&self, kind: &AssetKind) -> Result<(), EncodingError> {
		let mismatch = |message: String| EncodingError::MalformedAssetData {
			class: self.asset_class.clone(),
			message,
		};

		if self.contract != kind.token() {
			return Err(mismatch(format!(
				"contract {:?} does not match asset data",
				self.contract
			)));
		}

		let encoded_id = match kind {
			AssetKind::NftSingle { token_id, .. } | AssetKind::NftMulti { token_id, .. } => {
				Some(*token_id)
			}
			_ => None,
		};
		let displayed_id = self
			.token_id
			.as_deref()
			.map(parse_u256)
			.transpose()
			.map_err(EncodingError::InvalidTokenId)?;
		if displayed_id != encoded_id {
			return Err(mismatch(format!(
				"token id {:?} does not match asset data",
				self.token_id
			)));
		}

		Ok(())
	}
}

/// What the order book receives for a newly signed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookEntry {
	pub order_key_hash: OrderKey,
	pub maker: Address,
	pub taker: Address,
	pub make_asset: WireAsset,
	pub take_asset: WireAsset,
	pub salt: Salt,
	pub start: Timestamp,
	pub end: Timestamp,
	pub data_type: Selector,
	pub data: Bytes,
	pub signature: Signature,
	pub is_buy_offer: bool,
}

impl OrderBookEntry {
	pub fn new(signed: &SignedOrder, side: TradeSide) -> Result<Self, OrderError> {
		let order = signed.order();
		Ok(Self {
			order_key_hash: signed.order_key(),
			maker: order.maker,
			taker: order.taker,
			make_asset: WireAsset::from_asset(&order.make_asset)?,
			take_asset: WireAsset::from_asset(&order.take_asset)?,
			salt: order.salt,
			start: order.start,
			end: order.end,
			data_type: order.data_type,
			data: order.data.clone(),
			signature: *signed.signature(),
			is_buy_offer: side == TradeSide::Buy,
		})
	}

	/// Rebuilds the signed order, rejecting entries whose key does not match.
	pub fn to_signed_order(&self) -> Result<SignedOrder, OrderError> {
		let order = Order {
			maker: self.maker,
			make_asset: self.make_asset.to_asset()?,
			taker: self.taker,
			take_asset: self.take_asset.to_asset()?,
			salt: self.salt,
			start: self.start,
			end: self.end,
			data_type: self.data_type,
			data: self.data.clone(),
		};
		SignedOrder::from_parts(order, self.order_key_hash, self.signature)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, B256};

	const MAKER: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1111");
	const NFT: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2222");

	fn listing() -> SignedOrder {
		let order = Order::new(
			MAKER,
			Asset::new(
				AssetKind::NftSingle {
					token: NFT,
					token_id: U256::from(4),
				},
				U256::from(1),
			),
			Asset::native(U256::from(10).pow(U256::from(21))),
		)
		.with_salt(0x0102030405060708u64);
		let signature = Signature {
			r: B256::repeat_byte(1),
			s: B256::repeat_byte(2),
			v: 27,
		};
		SignedOrder::new(order, signature)
	}

	#[test]
	fn test_wire_form_is_snake_case() {
		let signed = listing();
		let entry = OrderBookEntry::new(&signed, TradeSide::Sell).unwrap();
		let value = serde_json::to_value(&entry).unwrap();

		assert_eq!(
			value["order_key_hash"],
			serde_json::to_value(signed.order_key()).unwrap()
		);
		assert_eq!(value["salt"], "0x102030405060708");
		assert_eq!(value["signature"], signed.signature().to_hex());
		assert_eq!(value["is_buy_offer"], false);
		assert_eq!(value["make_asset"]["asset_class"], "ERC721");
		assert_eq!(value["make_asset"]["token_id"], "4");
		assert_eq!(value["take_asset"]["asset_class"], "ETH");
		assert_eq!(value["take_asset"]["data"], "0x");
		assert_eq!(value["take_asset"]["value"], "1000000000000000000000");
		assert!(value["take_asset"].get("contract").is_none());
	}

	#[test]
	fn test_buy_offer_flag_comes_from_side() {
		let entry = OrderBookEntry::new(&listing(), TradeSide::Buy).unwrap();
		assert!(entry.is_buy_offer);
	}

	#[test]
	fn test_wire_round_trip_and_key_check() {
		let signed = listing();
		let entry = OrderBookEntry::new(&signed, TradeSide::Sell).unwrap();
		let json = serde_json::to_string(&entry).unwrap();
		let parsed: OrderBookEntry = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed.to_signed_order().unwrap(), signed);

		let mut tampered = parsed;
		tampered.salt = Salt::from(1u64);
		assert!(matches!(
			tampered.to_signed_order(),
			Err(OrderError::KeyMismatch { .. })
		));
	}

	#[test]
	fn test_wire_rejects_mismatched_asset_data() {
		let mut entry = OrderBookEntry::new(&listing(), TradeSide::Sell).unwrap();
		entry.take_asset.asset_class = "ERC20".to_string();
		assert!(matches!(
			entry.to_signed_order(),
			Err(OrderError::Encoding(_))
		));
	}

	#[test]
	fn test_wire_rejects_contradicting_metadata() {
		let entry = OrderBookEntry::new(&listing(), TradeSide::Sell).unwrap();

		let mut wrong_id = entry.clone();
		wrong_id.make_asset.token_id = Some("999".to_string());
		assert!(matches!(
			wrong_id.to_signed_order(),
			Err(OrderError::Encoding(EncodingError::MalformedAssetData { .. }))
		));

		let mut wrong_contract = entry.clone();
		wrong_contract.make_asset.contract = Some(Address::with_last_byte(7));
		assert!(matches!(
			wrong_contract.to_signed_order(),
			Err(OrderError::Encoding(EncodingError::MalformedAssetData { .. }))
		));

		let mut contract_on_native = entry.clone();
		contract_on_native.take_asset.contract = Some(NFT);
		assert!(matches!(
			contract_on_native.to_signed_order(),
			Err(OrderError::Encoding(EncodingError::MalformedAssetData { .. }))
		));

		let mut missing_id = entry;
		missing_id.make_asset.token_id = None;
		assert!(matches!(
			missing_id.to_signed_order(),
			Err(OrderError::Encoding(EncodingError::MalformedAssetData { .. }))
		));
	}
}
