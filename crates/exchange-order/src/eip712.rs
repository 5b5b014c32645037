//! Solidity mirrors of the exchange contract's order structs.
//!
//! Field names and order must match the contract exactly: they make up the
//! EIP-712 type string, and therefore every type hash.

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::sol;
use exchange_types::{AssetClass, AssetData, EncodingError, Salt};

sol! {
	#[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
	struct AssetType {
		bytes4 assetClass;
		bytes data;
	}

	#[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
	struct Asset {
		AssetType assetType;
		uint256 value;
	}

	#[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
	struct Order {
		address maker;
		Asset makeAsset;
		address taker;
		Asset takeAsset;
		uint256 salt;
		uint256 start;
		uint256 end;
		bytes4 dataType;
		bytes data;
	}

	/// Entry points of the exchange contract that take signed orders.
	interface IExchange {
		function matchOrders(Order orderLeft, bytes signatureLeft, Order orderRight, bytes signatureRight) external payable;
		function cancel(Order order) external;
	}
}

impl From<&exchange_types::AssetType> for AssetType {
	fn from(asset_type: &exchange_types::AssetType) -> Self {
		Self {
			assetClass: asset_type.asset_class.id(),
			data: Bytes::copy_from_slice(asset_type.data.as_bytes()),
		}
	}
}

impl From<&exchange_types::Asset> for Asset {
	fn from(asset: &exchange_types::Asset) -> Self {
		Self {
			assetType: (&asset.asset_type).into(),
			value: asset.value,
		}
	}
}

impl From<&exchange_types::Order> for Order {
	fn from(order: &exchange_types::Order) -> Self {
		Self {
			maker: order.maker,
			makeAsset: (&order.make_asset).into(),
			taker: order.taker,
			takeAsset: (&order.take_asset).into(),
			salt: order.salt.value(),
			start: U256::from(order.start),
			end: U256::from(order.end),
			dataType: order.data_type,
			data: order.data.clone(),
		}
	}
}

impl TryFrom<AssetType> for exchange_types::AssetType {
	type Error = EncodingError;

	fn try_from(asset_type: AssetType) -> Result<Self, Self::Error> {
		Ok(Self {
			asset_class: AssetClass::from_id(asset_type.assetClass)?,
			data: AssetData::from_bytes(asset_type.data),
		})
	}
}

impl TryFrom<Asset> for exchange_types::Asset {
	type Error = EncodingError;

	fn try_from(asset: Asset) -> Result<Self, Self::Error> {
		Ok(Self {
			asset_type: asset.assetType.try_into()?,
			value: asset.value,
		})
	}
}

impl TryFrom<Order> for exchange_types::Order {
	type Error = EncodingError;

	fn try_from(order: Order) -> Result<Self, Self::Error> {
		let timestamp = |value: U256, field: &str| {
			u64::try_from(value)
				.map_err(|_| EncodingError::InvalidAmount(format!("{} {} exceeds u64", field, value)))
		};

		Ok(Self {
			maker: order.maker,
			make_asset: order.makeAsset.try_into()?,
			taker: order.taker,
			take_asset: order.takeAsset.try_into()?,
			salt: Salt(order.salt),
			start: timestamp(order.start, "start")?,
			end: timestamp(order.end, "end")?,
			data_type: order.dataType,
			data: order.data,
		})
	}
}
