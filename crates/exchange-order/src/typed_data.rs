//! EIP-712 typed-data envelope for orders.
//!
//! The JSON envelope is what a wallet receives through `eth_signTypedData_v4`.
//! It carries the full type schema so the wallet can recompute the struct hash
//! on its own; [`TypedMessage::to_typed_data`] parses it back with alloy to
//! keep the envelope and [`TypedMessage::signing_hash`] in agreement.

use crate::{eip712, hashing, OrderError};
use alloy_dyn_abi::TypedData;
use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct};
use exchange_types::{Asset, Order};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

pub const DEFAULT_DOMAIN_NAME: &str = "Exchange";
pub const DEFAULT_DOMAIN_VERSION: &str = "2";
pub const PRIMARY_TYPE: &str = "Order";
pub const SIGN_TYPED_DATA_METHOD: &str = "eth_signTypedData_v4";

/// Signing domain of the exchange contract.
///
/// A signature is only valid on the chain and contract named here. Nothing in
/// this crate can tell that the domain matches the network the order will be
/// submitted to: a mismatched domain still signs fine and is only rejected at
/// settlement. Always take the domain from the same network configuration the
/// order is submitted through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
	pub name: String,
	pub version: String,
	pub chain_id: u64,
	pub verifying_contract: Address,
}

impl Domain {
	pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
		Self {
			name: DEFAULT_DOMAIN_NAME.to_string(),
			version: DEFAULT_DOMAIN_VERSION.to_string(),
			chain_id,
			verifying_contract,
		}
	}

	pub fn eip712_domain(&self) -> Eip712Domain {
		Eip712Domain::new(
			Some(self.name.clone().into()),
			Some(self.version.clone().into()),
			Some(U256::from(self.chain_id)),
			Some(self.verifying_contract),
			None,
		)
	}

	/// EIP-712 domain separator.
	pub fn separator(&self) -> B256 {
		self.eip712_domain().separator()
	}
}

/// An order wrapped in its signing domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedMessage {
	domain: Domain,
	order: Order,
}

/// Wraps `order` for signing under `domain`.
pub fn build_typed_message(domain: &Domain, order: &Order) -> TypedMessage {
	debug!(
		maker = %order.maker,
		chain_id = domain.chain_id,
		verifying_contract = %domain.verifying_contract,
		"Building typed order message"
	);

	TypedMessage {
		domain: domain.clone(),
		order: order.clone(),
	}
}

impl TypedMessage {
	pub fn domain(&self) -> &Domain {
		&self.domain
	}

	pub fn order(&self) -> &Order {
		&self.order
	}

	/// Address expected to sign: the order's maker.
	pub fn signer(&self) -> Address {
		self.order.maker
	}

	pub fn struct_hash(&self) -> B256 {
		hashing::struct_hash(&self.order)
	}

	/// `keccak256(0x1901 ‖ domainSeparator ‖ hashStruct(order))`
	pub fn signing_hash(&self) -> B256 {
		eip712::Order::from(&self.order).eip712_signing_hash(&self.domain.eip712_domain())
	}

	/// Type schema for the `types` member of the envelope.
	pub fn types() -> Value {
		json!({
			"EIP712Domain": [
				{ "name": "name", "type": "string" },
				{ "name": "version", "type": "string" },
				{ "name": "chainId", "type": "uint256" },
				{ "name": "verifyingContract", "type": "address" },
			],
			"AssetType": [
				{ "name": "assetClass", "type": "bytes4" },
				{ "name": "data", "type": "bytes" },
			],
			"Asset": [
				{ "name": "assetType", "type": "AssetType" },
				{ "name": "value", "type": "uint256" },
			],
			"Order": [
				{ "name": "maker", "type": "address" },
				{ "name": "makeAsset", "type": "Asset" },
				{ "name": "taker", "type": "address" },
				{ "name": "takeAsset", "type": "Asset" },
				{ "name": "salt", "type": "uint256" },
				{ "name": "start", "type": "uint256" },
				{ "name": "end", "type": "uint256" },
				{ "name": "dataType", "type": "bytes4" },
				{ "name": "data", "type": "bytes" },
			],
		})
	}

	/// The standard `eth_signTypedData_v4` JSON envelope.
	pub fn to_json(&self) -> Value {
		let order = &self.order;
		json!({
			"types": Self::types(),
			"domain": {
				"name": self.domain.name,
				"version": self.domain.version,
				"chainId": self.domain.chain_id,
				"verifyingContract": self.domain.verifying_contract.to_string(),
			},
			"primaryType": PRIMARY_TYPE,
			"message": {
				"maker": order.maker.to_string(),
				"makeAsset": asset_json(&order.make_asset),
				"taker": order.taker.to_string(),
				"takeAsset": asset_json(&order.take_asset),
				"salt": order.salt.to_string(),
				"start": order.start,
				"end": order.end,
				"dataType": order.data_type.to_string(),
				"data": order.data.to_string(),
			},
		})
	}

	/// Parses the JSON envelope into alloy's dynamic typed data, the form a
	/// wallet works from.
	pub fn to_typed_data(&self) -> Result<TypedData, OrderError> {
		serde_json::from_value(self.to_json()).map_err(|e| OrderError::TypedData(e.to_string()))
	}

	/// The JSON-RPC request a wallet expects: `[from, typedMessageJSON]`.
	pub fn rpc_request(&self) -> SignTypedDataRequest {
		SignTypedDataRequest {
			method: SIGN_TYPED_DATA_METHOD.to_string(),
			params: (self.signer(), self.to_json().to_string()),
		}
	}
}

fn asset_json(asset: &Asset) -> Value {
	json!({
		"assetType": {
			"assetClass": asset.asset_type.asset_class.id().to_string(),
			"data": asset.asset_type.data.to_hex(),
		},
		"value": asset.value.to_string(),
	})
}

/// Request shape of a typed-data signing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignTypedDataRequest {
	pub method: String,
	pub params: (Address, String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, b256};
	use alloy_signer::SignerSync;
	use alloy_signer_local::PrivateKeySigner;
	use exchange_types::{AssetKind, Signature};

	const EXCHANGE: Address = address!("9757F2d2b135150BBeb65308D4a91804107cd8D6");
	const NFT: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2222");

	fn order_for(maker: Address) -> Order {
		Order::new(
			maker,
			Asset::native(U256::from(200)),
			Asset::new(
				AssetKind::NftSingle {
					token: NFT,
					token_id: U256::from(4),
				},
				U256::from(1),
			),
		)
		.with_salt(0x0102030405060708u64)
		.with_window(1, 0xffffffff)
	}

	fn sign(signer: &PrivateKeySigner, message: &TypedMessage) -> Signature {
		signer
			.sign_hash_sync(&message.signing_hash())
			.unwrap()
			.into()
	}

	#[test]
	fn test_domain_separator_vector() {
		let domain = Domain::new(1, EXCHANGE);
		assert_eq!(
			domain.separator(),
			b256!("ffced377f36967de579f54f0861d77c69d56f957a02e36397e7d58a2200eb56e")
		);
	}

	#[test]
	fn test_signing_hash_vector() {
		let maker = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1111");
		let message = build_typed_message(&Domain::new(1, EXCHANGE), &order_for(maker));
		assert_eq!(
			message.signing_hash(),
			b256!("a625688ed27e2a4cb3f80cecc6a2464c717acb334721fbf72548f0ac1bb1857a")
		);
	}

	#[test]
	fn test_json_envelope_hashes_like_struct() {
		let maker = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1111");
		let message = build_typed_message(&Domain::new(1, EXCHANGE), &order_for(maker));

		let typed = message.to_typed_data().unwrap();
		assert_eq!(typed.primary_type, PRIMARY_TYPE);
		assert_eq!(typed.eip712_signing_hash().unwrap(), message.signing_hash());
	}

	#[test]
	fn test_json_envelope_matches_alloy_from_struct() {
		let maker = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1111");
		let domain = Domain::new(137, EXCHANGE);
		let message = build_typed_message(&domain, &order_for(maker));

		let sol = eip712::Order::from(message.order());
		let from_struct = TypedData::from_struct(&sol, Some(domain.eip712_domain()));
		assert_eq!(
			from_struct.eip712_signing_hash().unwrap(),
			message.to_typed_data().unwrap().eip712_signing_hash().unwrap()
		);
	}

	#[test]
	fn test_rpc_request_shape() {
		let maker = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1111");
		let message = build_typed_message(&Domain::new(1, EXCHANGE), &order_for(maker));
		let request = serde_json::to_value(message.rpc_request()).unwrap();

		assert_eq!(request["method"], "eth_signTypedData_v4");
		let params = request["params"].as_array().unwrap();
		assert_eq!(params.len(), 2);
		assert_eq!(params[0], serde_json::to_value(maker).unwrap());

		let envelope: Value = serde_json::from_str(params[1].as_str().unwrap()).unwrap();
		assert_eq!(envelope["primaryType"], "Order");
		assert_eq!(envelope["message"]["makeAsset"]["assetType"]["data"], "0x");
		assert_eq!(envelope["message"]["makeAsset"]["value"], "200");
		assert_eq!(envelope["message"]["salt"], "0x102030405060708");
	}

	#[test]
	fn test_signature_recovers_maker() {
		let signer = PrivateKeySigner::random();
		let message = build_typed_message(&Domain::new(1, EXCHANGE), &order_for(signer.address()));

		let signature = sign(&signer, &message);
		assert_eq!(signature.to_hex().len(), 132);
		assert_eq!(
			signature.recover(&message.signing_hash()).unwrap(),
			signer.address()
		);
	}

	#[test]
	fn test_signature_fails_for_mutated_order() {
		let signer = PrivateKeySigner::random();
		let domain = Domain::new(1, EXCHANGE);
		let order = order_for(signer.address());
		let signature = sign(&signer, &build_typed_message(&domain, &order));

		let mut mutations = vec![
			order.clone().with_window(2, 0xffffffff),
			order.clone().with_window(1, 0),
			order.clone().with_salt(1u64),
			order.clone().with_taker(Address::with_last_byte(7)),
		];
		let mut other_value = order.clone();
		other_value.make_asset.value = U256::from(201);
		mutations.push(other_value);

		for mutated in mutations {
			let hash = build_typed_message(&domain, &mutated).signing_hash();
			assert_ne!(signature.recover(&hash).unwrap(), signer.address());
		}
	}

	#[test]
	fn test_signature_fails_for_other_domain() {
		let signer = PrivateKeySigner::random();
		let order = order_for(signer.address());
		let signature = sign(&signer, &build_typed_message(&Domain::new(1, EXCHANGE), &order));

		let other_chain = build_typed_message(&Domain::new(5, EXCHANGE), &order);
		assert_ne!(
			signature.recover(&other_chain.signing_hash()).unwrap(),
			signer.address()
		);
	}
}
