// SPDX-License-Identifier: GPL-3.0

use crate::{
	assets::{TokenDescriptor, account_key_20, ethereum_location, supported_tokens, unit_variant},
	errors::Error,
};
use serde::Serialize;
use strum::{EnumMessage as _, IntoEnumIterator as _};
use strum_macros::{AsRefStr, Display, EnumIter, EnumMessage, EnumString};
use subxt::{dynamic::Value, tx::DynamicPayload};

/// The order in which the two assets are listed in the transfer.
#[derive(
	AsRefStr,
	Clone,
	Copy,
	Debug,
	Display,
	EnumIter,
	EnumMessage,
	EnumString,
	Eq,
	Hash,
	PartialEq,
	Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssetOrder {
	/// The assets are listed in declaration order.
	#[strum(message = "Declaration order")]
	Forward,
	/// The assets are listed with their positions swapped.
	#[strum(message = "Swapped order")]
	Reverse,
}

impl AssetOrder {
	/// The tokens in the position this order puts them in.
	pub fn tokens(&self) -> [&'static TokenDescriptor; 2] {
		let [first, second] = supported_tokens();
		match self {
			AssetOrder::Forward => [first, second],
			AssetOrder::Reverse => [second, first],
		}
	}

	/// A short description of the order, e.g. `WETH, WBTC`.
	pub fn description(&self) -> String {
		self.tokens().map(|t| t.symbol).join(", ")
	}

	/// A human readable label of the order.
	pub fn label(&self) -> &'static str {
		self.get_message().unwrap_or_default()
	}

	/// Every order, forward first.
	pub fn all() -> Vec<AssetOrder> {
		AssetOrder::iter().collect()
	}
}

/// The XCM version used to wrap locations and assets.
#[derive(AsRefStr, Clone, Copy, Debug, Default, Display, EnumIter, Eq, PartialEq, Serialize)]
pub enum XcmVersion {
	/// XCM v4.
	#[default]
	V4,
	/// XCM v5.
	V5,
}

impl XcmVersion {
	/// The numeric version, as expected by runtime APIs.
	pub fn number(&self) -> u32 {
		match self {
			XcmVersion::V4 => 4,
			XcmVersion::V5 => 5,
		}
	}

	/// Wraps a value in the versioned variant, e.g. `VersionedLocation::V4(value)`.
	pub(crate) fn wrap(&self, value: Value) -> Value {
		Value::unnamed_variant(self.as_ref(), [value])
	}
}

impl TryFrom<u32> for XcmVersion {
	type Error = Error;

	fn try_from(version: u32) -> Result<Self, Self::Error> {
		XcmVersion::iter()
			.find(|v| v.number() == version)
			.ok_or(Error::UnsupportedXcmVersion(version))
	}
}

/// The parameters shared by both transfer variants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferParams {
	/// The account receiving the assets on the destination.
	pub beneficiary: [u8; 20],
	/// The amounts in base units, indexed like [`supported_tokens`].
	pub amounts: [u128; 2],
	/// The index of the asset used to pay fees, within the sent asset list.
	pub fee_asset_item: u32,
	/// The XCM version used to wrap locations and assets.
	pub xcm_version: XcmVersion,
}

impl TransferParams {
	/// Creates parameters from whole token amounts, scaled by each token's decimals.
	///
	/// # Arguments
	/// * `beneficiary` - The account receiving the assets.
	/// * `whole_amounts` - The amounts in whole tokens, indexed like [`supported_tokens`].
	/// * `xcm_version` - The XCM version used to wrap locations and assets.
	pub fn new(
		beneficiary: [u8; 20],
		whole_amounts: [u128; 2],
		xcm_version: XcmVersion,
	) -> Result<Self, Error> {
		let [first, second] = supported_tokens();
		Ok(Self {
			beneficiary,
			amounts: [first.units(whole_amounts[0])?, second.units(whole_amounts[1])?],
			fee_asset_item: 0,
			xcm_version,
		})
	}

	fn amount_of(&self, token: &TokenDescriptor) -> u128 {
		supported_tokens()
			.iter()
			.position(|t| *t == token)
			.map(|i| self.amounts[i])
			.unwrap_or_default()
	}
}

/// Builds the versioned list of assets, in the given order.
///
/// # Arguments
/// * `order` - The order the assets are listed in.
/// * `params` - The transfer parameters.
pub fn build_assets(order: AssetOrder, params: &TransferParams) -> Value {
	let assets = order.tokens().map(|token| {
		Value::named_composite([
			("id", token.location()),
			("fun", Value::unnamed_variant("Fungible", [Value::u128(params.amount_of(token))])),
		])
	});
	params.xcm_version.wrap(Value::unnamed_composite(assets))
}

/// Builds a `PolkadotXcm::transfer_assets` call sending both assets to the beneficiary on the
/// chain the first declared token lives on.
///
/// # Arguments
/// * `order` - The order the assets are listed in.
/// * `params` - The transfer parameters.
pub fn build_transfer(order: AssetOrder, params: &TransferParams) -> DynamicPayload {
	let [first, _] = supported_tokens();
	let version = params.xcm_version;
	let dest = version.wrap(ethereum_location(first.chain_id));
	let beneficiary = version.wrap(Value::named_composite([
		("parents", Value::u128(0)),
		(
			"interior",
			Value::unnamed_variant(
				"X1",
				[Value::unnamed_composite([account_key_20(params.beneficiary)])],
			),
		),
	]));
	subxt::dynamic::tx(
		"PolkadotXcm",
		"transfer_assets",
		vec![
			dest,
			beneficiary,
			build_assets(order, params),
			Value::u128(params.fee_asset_item.into()),
			unit_variant("Unlimited"),
		],
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::assets::{WBTC, WETH};
	use anyhow::Result;
	use scale_value::{Composite, ValueDef};
	use std::str::FromStr;

	const BENEFICIARY: [u8; 20] = [7u8; 20];

	fn params() -> Result<TransferParams> {
		Ok(TransferParams::new(BENEFICIARY, [2, 1], XcmVersion::V4)?)
	}

	// Unwraps `V4([a, b])` into `[a, b]`.
	fn entries(assets: Value) -> Vec<Value> {
		let ValueDef::Variant(variant) = assets.value else { panic!("expected versioned assets") };
		let mut values = variant.values.into_values();
		let Some(ValueDef::Composite(Composite::Unnamed(entries))) = values.next().map(|v| v.value)
		else {
			panic!("expected asset list")
		};
		entries
	}

	fn entry(token: &TokenDescriptor, amount: u128) -> Value {
		Value::named_composite([
			("id", token.location()),
			("fun", Value::unnamed_variant("Fungible", [Value::u128(amount)])),
		])
	}

	#[test]
	fn asset_order_tokens_works() {
		assert_eq!(AssetOrder::Forward.tokens(), [&WETH, &WBTC]);
		assert_eq!(AssetOrder::Reverse.tokens(), [&WBTC, &WETH]);
		assert_eq!(AssetOrder::Forward.description(), "WETH, WBTC");
		assert_eq!(AssetOrder::Reverse.description(), "WBTC, WETH");
		assert_eq!(AssetOrder::all(), vec![AssetOrder::Forward, AssetOrder::Reverse]);
	}

	#[test]
	fn asset_order_strings_work() -> Result<()> {
		assert_eq!(AssetOrder::Forward.to_string(), "forward");
		assert_eq!(AssetOrder::from_str("reverse")?, AssetOrder::Reverse);
		assert_eq!(AssetOrder::Reverse.label(), "Swapped order");
		assert_eq!(serde_json::to_string(&AssetOrder::Reverse)?, "\"reverse\"");
		Ok(())
	}

	#[test]
	fn xcm_version_works() -> Result<()> {
		assert_eq!(XcmVersion::try_from(4)?, XcmVersion::V4);
		assert_eq!(XcmVersion::try_from(5)?, XcmVersion::V5);
		assert!(matches!(XcmVersion::try_from(3), Err(Error::UnsupportedXcmVersion(3))));
		assert_eq!(XcmVersion::V5.number(), 5);
		assert_eq!(
			XcmVersion::V5.wrap(Value::u128(1)),
			Value::unnamed_variant("V5", [Value::u128(1)])
		);
		Ok(())
	}

	#[test]
	fn transfer_params_scales_amounts() -> Result<()> {
		let params = params()?;
		assert_eq!(params.amounts, [2_000_000_000_000_000_000, 100_000_000]);
		assert_eq!(params.amount_of(&WETH), 2_000_000_000_000_000_000);
		assert_eq!(params.amount_of(&WBTC), 100_000_000);
		assert_eq!(params.fee_asset_item, 0);
		assert!(matches!(
			TransferParams::new(BENEFICIARY, [u128::MAX, 1], XcmVersion::V4),
			Err(Error::AmountOverflow { .. })
		));
		Ok(())
	}

	#[test]
	fn build_assets_follows_order() -> Result<()> {
		let params = params()?;
		let forward = entries(build_assets(AssetOrder::Forward, &params));
		assert_eq!(
			forward,
			vec![entry(&WETH, params.amounts[0]), entry(&WBTC, params.amounts[1])]
		);
		let reverse = entries(build_assets(AssetOrder::Reverse, &params));
		assert_eq!(
			reverse,
			vec![entry(&WBTC, params.amounts[1]), entry(&WETH, params.amounts[0])]
		);
		Ok(())
	}

	#[test]
	fn build_assets_variants_differ_only_in_order() -> Result<()> {
		let params = params()?;
		let forward = entries(build_assets(AssetOrder::Forward, &params));
		let mut reverse = entries(build_assets(AssetOrder::Reverse, &params));
		assert_ne!(forward, reverse);
		reverse.reverse();
		assert_eq!(forward, reverse);
		Ok(())
	}

	#[test]
	fn build_assets_is_pure() -> Result<()> {
		let params = params()?;
		assert_eq!(
			build_assets(AssetOrder::Reverse, &params),
			build_assets(AssetOrder::Reverse, &params)
		);
		Ok(())
	}

	#[test]
	fn build_assets_uses_xcm_version() -> Result<()> {
		let params = TransferParams { xcm_version: XcmVersion::V5, ..params()? };
		let ValueDef::Variant(variant) = build_assets(AssetOrder::Forward, &params).value else {
			panic!("expected versioned assets")
		};
		assert_eq!(variant.name, "V5");
		Ok(())
	}

	#[test]
	fn build_transfer_works() -> Result<()> {
		let params = params()?;
		let xt = build_transfer(AssetOrder::Reverse, &params);
		assert_eq!(xt.pallet_name(), "PolkadotXcm");
		assert_eq!(xt.call_name(), "transfer_assets");
		let Composite::Unnamed(args) = xt.call_data().clone() else {
			panic!("expected unnamed call arguments")
		};
		assert_eq!(args.len(), 5);
		assert_eq!(args[0], XcmVersion::V4.wrap(ethereum_location(WETH.chain_id)));
		assert_eq!(args[2], build_assets(AssetOrder::Reverse, &params));
		assert_eq!(args[3], Value::u128(0));
		assert_eq!(args[4], unit_variant("Unlimited"));
		Ok(())
	}
}
