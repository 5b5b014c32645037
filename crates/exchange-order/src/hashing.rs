//! Order key and struct hashing.
//!
//! The order key must match the exchange contract's `LibOrder.hashKey` bit for
//! bit. It covers only the maker, both asset types and the salt, so amounts and
//! the time window can differ between two orders sharing a key.

use crate::eip712;
use alloy_primitives::{b256, keccak256, B256};
use alloy_sol_types::{SolStruct, SolValue};
use exchange_types::{AssetData, AssetType, Order, Selector};

/// 32 byte identifier of an order in the order book and on chain.
pub type OrderKey = B256;

/// `keccak256("AssetType(bytes4 assetClass,bytes data)")`
pub const ASSET_TYPE_TYPEHASH: B256 =
	b256!("452a0dc408cb0d27ffc3b3caff933a5208040a53a9dbecd8d89cad2c0d40e00c");

/// `keccak256("Asset(AssetType assetType,uint256 value)AssetType(bytes4 assetClass,bytes data)")`
pub const ASSET_TYPEHASH: B256 =
	b256!("db6f72e915676cfc289da13bc4ece054fd17b1df6d77ffc4a60510718c236b08");

/// Type hash of the full `Order` type string, including referenced types.
pub const ORDER_TYPEHASH: B256 =
	b256!("477ed43b8020849b755512278536c3766a3b4ab547519949a75f483372493f8d");

/// `keccak256("")`, the hash the contract uses for the native asset's empty data.
///
/// Kept as data. Hashing the `"0x"` text instead of zero bytes gives a
/// different value that the contract will never produce.
pub const EMPTY_DATA_HASH: B256 =
	b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");

/// `keccak256(abi.encode(ASSET_TYPE_TYPEHASH, assetClass, keccak256(data)))`
pub fn hash_asset_type(asset_class: Selector, data: &AssetData) -> B256 {
	let data_hash = if data.is_no_data() {
		EMPTY_DATA_HASH
	} else {
		keccak256(data.as_bytes())
	};

	keccak256((ASSET_TYPE_TYPEHASH, asset_class, data_hash).abi_encode())
}

fn hash_type_of(asset_type: &AssetType) -> B256 {
	hash_asset_type(asset_type.asset_class.id(), &asset_type.data)
}

/// `keccak256(abi.encode(maker, hash(makeAssetType), hash(takeAssetType), salt))`
pub fn hash_key(order: &Order) -> OrderKey {
	keccak256(
		(
			order.maker,
			hash_type_of(&order.make_asset.asset_type),
			hash_type_of(&order.take_asset.asset_type),
			order.salt.value(),
		)
			.abi_encode(),
	)
}

/// EIP-712 `hashStruct(order)`.
pub fn struct_hash(order: &Order) -> B256 {
	eip712::Order::from(order).eip712_hash_struct()
}
