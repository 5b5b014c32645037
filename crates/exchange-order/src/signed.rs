//! Signed orders handed to the order book and the contract layer.

use crate::hashing::{hash_key, OrderKey};
use crate::typed_data::{build_typed_message, Domain};
use crate::OrderError;
use exchange_types::{Order, Signature};

/// An order together with its key and the maker's signature.
///
/// Read-only: a changed intent needs a new order, a new key and a new signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedOrder {
	order: Order,
	order_key: OrderKey,
	signature: Signature,
}

impl SignedOrder {
	pub fn new(order: Order, signature: Signature) -> Self {
		let order_key = hash_key(&order);
		Self {
			order,
			order_key,
			signature,
		}
	}

	/// Rebuilds a signed order received from elsewhere, checking the claimed key.
	pub fn from_parts(
		order: Order,
		order_key: OrderKey,
		signature: Signature,
	) -> Result<Self, OrderError> {
		let signed = Self::new(order, signature);
		if signed.order_key != order_key {
			return Err(OrderError::KeyMismatch {
				expected: order_key,
				actual: signed.order_key,
			});
		}
		Ok(signed)
	}

	pub fn order(&self) -> &Order {
		&self.order
	}

	pub fn order_key(&self) -> OrderKey {
		self.order_key
	}

	pub fn signature(&self) -> &Signature {
		&self.signature
	}

	/// Checks off-chain that the maker signed this order under `domain`.
	pub fn is_signed_by_maker(&self, domain: &Domain) -> Result<bool, OrderError> {
		let hash = build_typed_message(domain, &self.order).signing_hash();
		let signer = self.signature.recover(&hash)?;
		Ok(signer == self.order.maker)
	}

	pub fn into_parts(self) -> (Order, OrderKey, Signature) {
		(self.order, self.order_key, self.signature)
	}
}
