// SPDX-License-Identifier: GPL-3.0

use crate::errors::Error;
use std::fmt::{Display, Formatter};
use subxt::dynamic::Value;

/// Chain identifier of Ethereum mainnet.
pub const ETHEREUM_MAINNET: u64 = 1;

/// Wrapped Ether, bridged from Ethereum.
pub const WETH: TokenDescriptor = TokenDescriptor {
	symbol: "WETH",
	decimals: 18,
	chain_id: ETHEREUM_MAINNET,
	contract: [
		0xc0, 0x2a, 0xaa, 0x39, 0xb2, 0x23, 0xfe, 0x8d, 0x0a, 0x0e, 0x5c, 0x4f, 0x27, 0xea, 0xd9,
		0x08, 0x3c, 0x75, 0x6c, 0xc2,
	],
};

/// Wrapped Bitcoin, bridged from Ethereum.
pub const WBTC: TokenDescriptor = TokenDescriptor {
	symbol: "WBTC",
	decimals: 8,
	chain_id: ETHEREUM_MAINNET,
	contract: [
		0x22, 0x60, 0xfa, 0xc5, 0xe5, 0x54, 0x2a, 0x77, 0x3a, 0xa4, 0x4f, 0xbc, 0xfe, 0xdf, 0x7c,
		0x19, 0x3b, 0xc2, 0xc5, 0x99,
	],
};

/// An ERC-20 token living on an Ethereum-compatible chain, reachable through the bridge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TokenDescriptor {
	/// The ticker symbol of the token.
	pub symbol: &'static str,
	/// The number of decimals used by the token contract.
	pub decimals: u8,
	/// The chain identifier of the network the contract is deployed on.
	pub chain_id: u64,
	/// The contract address of the token.
	pub contract: [u8; 20],
}

impl TokenDescriptor {
	/// The location of the token, as seen from a parachain of the relay chain:
	/// `{ parents: 2, interior: X2[GlobalConsensus(Ethereum { chain_id }), AccountKey20 { .. }] }`.
	pub fn location(&self) -> Value {
		Value::named_composite([
			("parents", Value::u128(2)),
			(
				"interior",
				Value::unnamed_variant(
					"X2",
					[Value::unnamed_composite([
						global_consensus(self.chain_id),
						account_key_20(self.contract),
					])],
				),
			),
		])
	}

	/// Scales a whole token amount to the base units of the token.
	///
	/// # Arguments
	/// * `whole` - The amount in whole tokens.
	pub fn units(&self, whole: u128) -> Result<u128, Error> {
		10u128
			.checked_pow(u32::from(self.decimals))
			.and_then(|scale| whole.checked_mul(scale))
			.ok_or_else(|| Error::AmountOverflow { amount: whole, symbol: self.symbol.into() })
	}

	/// The contract address as `0x`-prefixed hex.
	pub fn contract_hex(&self) -> String {
		format!("0x{}", hex::encode(self.contract))
	}
}

impl Display for TokenDescriptor {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} ({})", self.symbol, self.contract_hex())
	}
}

/// The tokens whose order is swapped between the two transfer variants, in declaration order.
pub fn supported_tokens() -> [&'static TokenDescriptor; 2] {
	[&WETH, &WBTC]
}

/// Finds a token by its symbol, ignoring case.
///
/// # Arguments
/// * `symbol` - The symbol of the token to find.
pub fn find_token_by_symbol(symbol: &str) -> Result<&'static TokenDescriptor, Error> {
	supported_tokens()
		.into_iter()
		.find(|t| t.symbol.eq_ignore_ascii_case(symbol))
		.ok_or_else(|| Error::UnknownToken(symbol.to_string()))
}

/// The location of an Ethereum-compatible network, as seen from a parachain of the relay chain.
///
/// # Arguments
/// * `chain_id` - The chain identifier of the network.
pub fn ethereum_location(chain_id: u64) -> Value {
	Value::named_composite([
		("parents", Value::u128(2)),
		(
			"interior",
			Value::unnamed_variant("X1", [Value::unnamed_composite([global_consensus(chain_id)])]),
		),
	])
}

/// Parses a 20-byte address, with or without the `0x` prefix.
///
/// # Arguments
/// * `address` - The hex encoded address.
pub fn parse_h160(address: &str) -> Result<[u8; 20], Error> {
	let bytes = hex::decode(address.trim_start_matches("0x"))
		.map_err(|e| Error::InvalidAddress(format!("{address}: {e}")))?;
	bytes.try_into().map_err(|b: Vec<u8>| {
		Error::InvalidAddress(format!("{address}: expected 20 bytes, got {}", b.len()))
	})
}

/// A variant without fields, such as `None` or `Unlimited`.
pub(crate) fn unit_variant(name: &str) -> Value {
	Value::unnamed_variant(name, Vec::<Value>::new())
}

pub(crate) fn global_consensus(chain_id: u64) -> Value {
	Value::unnamed_variant(
		"GlobalConsensus",
		[Value::named_variant("Ethereum", [("chain_id", Value::u128(chain_id.into()))])],
	)
}

pub(crate) fn account_key_20(key: [u8; 20]) -> Value {
	Value::named_variant(
		"AccountKey20",
		[("network", unit_variant("None")), ("key", Value::from_bytes(key))],
	)
}
