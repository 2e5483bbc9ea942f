// SPDX-License-Identifier: GPL-3.0

use crate::{
	client::Node,
	errors::Error,
	transfer::{AssetOrder, TransferParams, XcmVersion, build_transfer},
};
use serde::Serialize;
use strum_macros::{Display, EnumString};
use subxt::{
	SubstrateConfig,
	config::DefaultExtrinsicParamsBuilder,
	dynamic::Value,
	tx::{DynamicPayload, Signer},
	utils::AccountId32,
};
use subxt_signer::sr25519::Keypair;

pub mod outcome;

pub use outcome::{CallDryRunEffects, DryRunOutcome, classify_dry_run_result};

/// The endpoint used to dry-run a call.
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DryRunMode {
	/// The `DryRunApi::dry_run_call` runtime API.
	#[default]
	RuntimeApi,
	/// The `system_dryRun` RPC, which requires a signed extrinsic.
	Extrinsic,
}

/// How a transfer is dry-run, along with the account it is executed as.
pub enum DryRun {
	/// Dry-run through `DryRunApi::dry_run_call`, dispatched as a signed origin of `origin`.
	RuntimeApi {
		/// The account the call is dispatched as.
		origin: AccountId32,
	},
	/// Dry-run through `system_dryRun`, with the extrinsic signed by `signer`.
	Extrinsic {
		/// The keypair used to sign the extrinsic.
		signer: Keypair,
	},
}

impl DryRun {
	/// The endpoint this dry run goes through.
	pub fn mode(&self) -> DryRunMode {
		match self {
			DryRun::RuntimeApi { .. } => DryRunMode::RuntimeApi,
			DryRun::Extrinsic { .. } => DryRunMode::Extrinsic,
		}
	}

	/// The account the call is executed as.
	pub fn account(&self) -> AccountId32 {
		match self {
			DryRun::RuntimeApi { origin } => origin.clone(),
			DryRun::Extrinsic { signer } =>
				<Keypair as Signer<SubstrateConfig>>::account_id(signer),
		}
	}

	/// Builds the transfer with the assets in the given order and dry-runs it.
	///
	/// # Arguments
	/// * `node` - The node to dry-run the transfer against.
	/// * `order` - The order the assets are listed in.
	/// * `params` - The transfer parameters.
	pub async fn transfer(
		&self,
		node: &Node,
		order: AssetOrder,
		params: &TransferParams,
	) -> Result<DryRunReport, Error> {
		let xt = build_transfer(order, params);
		if log::log_enabled!(log::Level::Debug) {
			log::debug!("{order} call data: {}", node.encode_call_data(&xt)?);
		}
		let effects = match self {
			DryRun::RuntimeApi { origin } =>
				dry_run_call(node, origin, xt, params.xcm_version).await?,
			DryRun::Extrinsic { signer } => CallDryRunEffects {
				outcome: dry_run_extrinsic(node, signer, &xt).await?,
				emitted_events: None,
				forwarded_xcms: None,
			},
		};
		log::debug!("{order} outcome: {}", effects.outcome);
		Ok(DryRunReport::new(order, effects))
	}
}

/// The result of dry-running one variant of the transfer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DryRunReport {
	/// The order the assets were listed in.
	pub order: AssetOrder,
	/// The outcome of the dry run.
	pub outcome: DryRunOutcome,
	/// The number of events emitted, when reported.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub emitted_events: Option<usize>,
	/// The number of XCM messages that would have been sent, when reported.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub forwarded_xcms: Option<usize>,
}

impl DryRunReport {
	/// Creates a report from the effects of a dry run.
	pub fn new(order: AssetOrder, effects: CallDryRunEffects) -> Self {
		Self {
			order,
			outcome: effects.outcome,
			emitted_events: effects.emitted_events,
			forwarded_xcms: effects.forwarded_xcms,
		}
	}
}

/// Whether the outcomes of the reports disagree, i.e. the asset order changed the result.
///
/// # Arguments
/// * `reports` - The reports of the dry runs.
pub fn outcomes_differ(reports: &[DryRunReport]) -> bool {
	reports.windows(2).any(|pair| pair[0].outcome.is_success() != pair[1].outcome.is_success())
}

/// The `OriginCaller::system(RawOrigin::Signed(account))` origin.
///
/// # Arguments
/// * `account` - The signing account.
pub fn signed_origin(account: &AccountId32) -> Value {
	Value::unnamed_variant(
		"system",
		[Value::unnamed_variant("Signed", [Value::from_bytes(account.0)])],
	)
}

/// Dry-runs a call through the `DryRunApi::dry_run_call` runtime API at the latest block.
///
/// # Arguments
/// * `node` - The node to dry-run the call against.
/// * `origin` - The account the call is dispatched as.
/// * `xt` - The call to dry-run.
/// * `xcm_version` - The XCM version of the messages reported back.
pub async fn dry_run_call(
	node: &Node,
	origin: &AccountId32,
	xt: DynamicPayload,
	xcm_version: XcmVersion,
) -> Result<CallDryRunEffects, Error> {
	let payload = subxt::dynamic::runtime_api_call(
		"DryRunApi",
		"dry_run_call",
		vec![signed_origin(origin), xt.into_value(), Value::u128(xcm_version.number().into())],
	);
	let result = node
		.client()
		.runtime_api()
		.at_latest()
		.await
		.map_err(|e| Error::DryRunError(e.to_string()))?
		.call(payload)
		.await
		.map_err(|e| Error::DryRunError(e.to_string()))?
		.to_value()
		.map_err(|e| Error::DryRunError(e.to_string()))?;
	log::debug!("dry_run_call returned {result}");
	outcome::classify_runtime_api_result(&result, Some(&node.client().metadata()))
}

/// Signs a call with the current nonce of the signer and dry-runs it through `system_dryRun`.
///
/// # Arguments
/// * `node` - The node to dry-run the extrinsic against.
/// * `signer` - The keypair used to sign the extrinsic.
/// * `xt` - The call to dry-run.
pub async fn dry_run_extrinsic(
	node: &Node,
	signer: &Keypair,
	xt: &DynamicPayload,
) -> Result<DryRunOutcome, Error> {
	let account_id = <Keypair as Signer<SubstrateConfig>>::account_id(signer);
	let nonce = node
		.client()
		.tx()
		.account_nonce(&account_id)
		.await
		.map_err(|e| Error::DryRunError(e.to_string()))?;
	let params = DefaultExtrinsicParamsBuilder::<SubstrateConfig>::new().nonce(nonce).build();
	let extrinsic = node
		.client()
		.tx()
		.create_partial_offline(xt, params.into())
		.map_err(|e| Error::DryRunError(e.to_string()))?
		.sign(signer);
	let dry_run_result = node
		.rpc()
		.dry_run(extrinsic.encoded(), None)
		.await
		.map_err(|e| Error::DryRunError(e.to_string()))?;

	outcome::classify_dry_run_result(
		dry_run_result.into_dry_run_result(),
		Some(&node.client().metadata()),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::signer::{create_signer, parse_account};
	use anyhow::Result;
	use std::str::FromStr;

	const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

	fn report(order: AssetOrder, outcome: DryRunOutcome) -> DryRunReport {
		DryRunReport::new(
			order,
			CallDryRunEffects { outcome, emitted_events: None, forwarded_xcms: None },
		)
	}

	#[test]
	fn dry_run_mode_strings_work() -> Result<()> {
		assert_eq!(DryRunMode::RuntimeApi.to_string(), "runtime-api");
		assert_eq!(DryRunMode::from_str("extrinsic")?, DryRunMode::Extrinsic);
		assert_eq!(DryRunMode::default(), DryRunMode::RuntimeApi);
		Ok(())
	}

	#[test]
	fn dry_run_account_works() -> Result<()> {
		let origin = parse_account(ALICE)?;
		let dry_run = DryRun::RuntimeApi { origin: origin.clone() };
		assert_eq!(dry_run.mode(), DryRunMode::RuntimeApi);
		assert_eq!(dry_run.account(), origin);

		let dry_run = DryRun::Extrinsic { signer: create_signer("//Alice")? };
		assert_eq!(dry_run.mode(), DryRunMode::Extrinsic);
		assert_eq!(dry_run.account(), origin);
		Ok(())
	}

	#[test]
	fn signed_origin_works() -> Result<()> {
		let origin = parse_account(ALICE)?;
		assert_eq!(
			signed_origin(&origin),
			Value::unnamed_variant(
				"system",
				[Value::unnamed_variant("Signed", [Value::from_bytes(origin.0)])]
			)
		);
		Ok(())
	}

	#[test]
	fn outcomes_differ_works() {
		let success = report(AssetOrder::Forward, DryRunOutcome::Success);
		let failure = report(
			AssetOrder::Reverse,
			DryRunOutcome::ExecutionFailed { error: "BadOrigin".into() },
		);
		let rejected =
			report(AssetOrder::Reverse, DryRunOutcome::Rejected { reason: "Unimplemented".into() });
		assert!(outcomes_differ(&[success.clone(), failure.clone()]));
		assert!(!outcomes_differ(&[failure.clone(), rejected]));
		assert!(!outcomes_differ(&[success.clone(), success]));
		assert!(!outcomes_differ(&[failure]));
		assert!(!outcomes_differ(&[]));
	}

	#[test]
	fn report_serializes() -> Result<()> {
		let report = DryRunReport::new(
			AssetOrder::Reverse,
			CallDryRunEffects {
				outcome: DryRunOutcome::Success,
				emitted_events: Some(4),
				forwarded_xcms: None,
			},
		);
		assert_eq!(
			serde_json::to_value(&report)?,
			serde_json::json!({
				"order": "reverse",
				"outcome": { "status": "success" },
				"emitted_events": 4,
			})
		);
		Ok(())
	}
}
