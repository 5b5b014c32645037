//! Calldata for the exchange entry points that take signed orders.

use crate::eip712::{self, IExchange};
use crate::signed::SignedOrder;
use alloy_primitives::Bytes;
use alloy_sol_types::SolCall;
use exchange_types::{Order, Signature};
use tracing::debug;

fn signature_bytes(signature: Option<&Signature>) -> Bytes {
	signature
		.map(|signature| Bytes::from(signature.as_bytes().to_vec()))
		.unwrap_or_default()
}

/// `cancel(order)`; only the maker can send it.
pub fn cancel_calldata(order: &Order) -> Bytes {
	IExchange::cancelCall {
		order: eip712::Order::from(order),
	}
	.abi_encode()
	.into()
}

/// `matchOrders(left, sigLeft, right, sigRight)`.
///
/// The taker side usually has no signature: the contract accepts an empty one
/// when the transaction sender is the right order's maker.
pub fn match_orders_calldata(
	left: &SignedOrder,
	right: &Order,
	right_signature: Option<&Signature>,
) -> Bytes {
	debug!(
		left_key = %left.order_key(),
		right_maker = %right.maker,
		"Encoding matchOrders call"
	);

	IExchange::matchOrdersCall {
		orderLeft: left.order().into(),
		signatureLeft: signature_bytes(Some(left.signature())),
		orderRight: right.into(),
		signatureRight: signature_bytes(right_signature),
	}
	.abi_encode()
	.into()
}
