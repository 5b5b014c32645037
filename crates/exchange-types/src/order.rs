//! Order model.
//!
//! An order pairs what the maker gives (`make_asset`) with what they want in
//! return (`take_asset`). Every field feeds either the order key or the
//! EIP-712 struct hash, so an order is never edited after it is signed; a
//! changed intent is a new order.

use crate::asset::{AssetClass, AssetData, AssetKind};
use crate::common::{u256_decimal, Address, Bytes, Selector, Timestamp, U256};
use crate::errors::Result;
use crate::salt::Salt;
use alloy_primitives::fixed_bytes;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Data type selector meaning "no extra order data".
pub const NO_EXTRA_DATA: Selector = fixed_bytes!("ffffffff");

/// Class and encoded identity of an asset, as the contract sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetType {
	pub asset_class: AssetClass,
	pub data: AssetData,
}

impl AssetType {
	pub fn new(asset_class: AssetClass, data: AssetData) -> Self {
		Self { asset_class, data }
	}

	/// Typed view of this asset type. Fails when the data does not match the class.
	pub fn kind(&self) -> Result<AssetKind> {
		AssetKind::from_asset_type(self.asset_class, &self.data)
	}
}

impl From<AssetKind> for AssetType {
	fn from(kind: AssetKind) -> Self {
		Self {
			asset_class: kind.class(),
			data: kind.encode(),
		}
	}
}

/// One leg of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
	pub asset_type: AssetType,
	#[serde(with = "u256_decimal")]
	pub value: U256,
}

impl Asset {
	pub fn new(kind: AssetKind, value: U256) -> Self {
		Self {
			asset_type: kind.into(),
			value,
		}
	}

	pub fn native(value: U256) -> Self {
		Self::new(AssetKind::Native, value)
	}

	pub fn class(&self) -> AssetClass {
		self.asset_type.asset_class
	}
}

/// A trade intent in its canonical, signable form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	pub maker: Address,
	pub make_asset: Asset,
	/// Zero address for an offer anyone can take.
	pub taker: Address,
	pub take_asset: Asset,
	pub salt: Salt,
	/// Zero means no lower bound.
	pub start: Timestamp,
	/// Zero means no upper bound.
	pub end: Timestamp,
	pub data_type: Selector,
	pub data: Bytes,
}

impl Order {
	/// Creates an open order with a fresh salt, no time window and no extra data.
	pub fn new(maker: Address, make_asset: Asset, take_asset: Asset) -> Self {
		Self {
			maker,
			make_asset,
			taker: Address::ZERO,
			take_asset,
			salt: Salt::random(),
			start: 0,
			end: 0,
			data_type: NO_EXTRA_DATA,
			data: Bytes::new(),
		}
	}

	pub fn with_taker(mut self, taker: Address) -> Self {
		self.taker = taker;
		self
	}

	pub fn with_salt(mut self, salt: impl Into<Salt>) -> Self {
		self.salt = salt.into();
		self
	}

	pub fn with_window(mut self, start: Timestamp, end: Timestamp) -> Self {
		self.start = start;
		self.end = end;
		self
	}

	/// Opens the order now and closes it after `duration`.
	pub fn starting_now(self, duration: Duration) -> Self {
		let now = chrono::Utc::now().timestamp().max(0) as Timestamp;
		self.with_window(now, now.saturating_add(duration.as_secs()))
	}

	pub fn with_extra_data(mut self, data_type: Selector, data: impl Into<Bytes>) -> Self {
		self.data_type = data_type;
		self.data = data.into();
		self
	}

	pub fn is_open_offer(&self) -> bool {
		self.taker == Address::ZERO
	}

	/// Whether `timestamp` falls inside the order's window. Zero bounds are open.
	pub fn is_active_at(&self, timestamp: Timestamp) -> bool {
		(self.start == 0 || self.start <= timestamp) && (self.end == 0 || timestamp < self.end)
	}
}
