// SPDX-License-Identifier: GPL-3.0

use crate::{
	cli::traits::*,
	common::{env, urls},
	style::format_url,
};
use anyhow::{Result, anyhow};
use asset_order_chains::{
	AssetOrder, DryRun, DryRunReport, Error, Node, TransferParams, XcmVersion, create_signer,
	outcomes_differ, parse_account, parse_h160, supported_tokens,
};
use clap::{Args, ValueEnum};
use serde::Serialize;
use url::Url;

/// The account dispatching runtime API dry runs, unless another one is given.
const DEFAULT_SENDER: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
/// The Ethereum account receiving the assets, unless another one is given.
const DEFAULT_BENEFICIARY: &str = "0x0000000000000000000000000000000000000001";

/// Which asset orders to dry-run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum OrderSelection {
	/// The assets in declaration order.
	Forward,
	/// The assets with their positions swapped.
	Reverse,
	/// Both orders, one after the other.
	#[default]
	Both,
}

impl OrderSelection {
	fn orders(&self) -> Vec<AssetOrder> {
		match self {
			OrderSelection::Forward => vec![AssetOrder::Forward],
			OrderSelection::Reverse => vec![AssetOrder::Reverse],
			OrderSelection::Both => AssetOrder::all(),
		}
	}
}

/// The endpoint used to dry-run the transfer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum ModeSelection {
	/// The `DryRunApi::dry_run_call` runtime API, executed as `--sender`.
	#[default]
	RuntimeApi,
	/// The `system_dryRun` RPC, with the extrinsic signed by `--suri`.
	Extrinsic,
}

/// The result of dry-running one order, kept when the dry run itself could not complete.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum OrderResult {
	/// The dry run completed with an outcome.
	Completed(DryRunReport),
	/// The dry run could not be completed.
	Errored { order: AssetOrder, error: String },
}

impl OrderResult {
	fn new(order: AssetOrder, result: Result<DryRunReport, Error>) -> Self {
		match result {
			Ok(report) => OrderResult::Completed(report),
			Err(e) => OrderResult::Errored { order, error: e.to_string() },
		}
	}

	fn is_success(&self) -> bool {
		matches!(self, OrderResult::Completed(report) if report.outcome.is_success())
	}
}

/// Dry-runs a transfer of two bridged tokens with the assets in each order.
#[derive(Args, Clone, Debug)]
pub(crate) struct DryRunCommand {
	/// Websocket endpoint of a node.
	#[arg(short, long, env = env::ENDPOINT, default_value = urls::ASSET_HUB)]
	pub(crate) url: Url,
	/// The asset orders to dry-run.
	#[arg(short, long, value_enum, default_value_t = OrderSelection::Both)]
	pub(crate) order: OrderSelection,
	/// The endpoint used to dry-run.
	#[arg(short, long, value_enum, default_value_t = ModeSelection::RuntimeApi)]
	pub(crate) mode: ModeSelection,
	/// The SS58 account dispatching the call, for runtime API dry runs.
	#[arg(long, default_value = DEFAULT_SENDER)]
	pub(crate) sender: String,
	/// Secret key URI for the account signing the extrinsic, for `extrinsic` dry runs.
	///
	/// e.g.
	/// - for a dev account "//Alice"
	/// - with a password "//Alice///SECRET_PASSWORD"
	#[arg(
		short,
		long,
		env = env::SURI,
		hide_env_values = true,
		required_if_eq("mode", "extrinsic")
	)]
	pub(crate) suri: Option<String>,
	/// The Ethereum account receiving the assets.
	#[arg(short, long, default_value = DEFAULT_BENEFICIARY)]
	pub(crate) beneficiary: String,
	/// The amounts to send in whole tokens, in declaration order. A single amount is used for
	/// both tokens.
	#[arg(
		short,
		long = "amount",
		value_name = "WHOLE",
		num_args = 1..=2,
		default_values_t = [1u128, 1]
	)]
	pub(crate) amounts: Vec<u128>,
	/// The XCM version used to wrap locations and assets.
	#[arg(long, default_value_t = 4)]
	pub(crate) xcm_version: u32,
}

impl DryRunCommand {
	/// Executes the command.
	pub(crate) async fn execute(self, cli: &mut impl Cli) -> Result<Vec<OrderResult>> {
		cli.intro("Dry-run an asset transfer in both orders")?;
		let params = self.transfer_params()?;
		let dry_run = self.dry_run()?;
		cli.info(self.display(&dry_run))?;

		let spinner = cli.spinner();
		spinner.start(&format!("Connecting to {}...", self.url));
		let node = match Node::connect(&self.url).await {
			Ok(node) => node,
			Err(e) => {
				spinner.error(&format!("Unable to connect to {}", self.url));
				cli.outro_cancel("Connection failed.")?;
				return Err(e.into());
			},
		};
		spinner.stop(&format!("Connected to {}", format_url(node.url().as_str())));

		let mut results = Vec::new();
		for order in self.order.orders() {
			let result = dry_run.transfer(&node, order, &params).await;
			display_result(order, &result, cli)?;
			results.push(OrderResult::new(order, result));
		}
		display_summary(&results, cli)?;
		Ok(results)
	}

	// Resolves the amounts and beneficiary into transfer parameters.
	fn transfer_params(&self) -> Result<TransferParams> {
		let amounts = match self.amounts.as_slice() {
			[amount] => [*amount, *amount],
			[first, second] => [*first, *second],
			amounts => return Err(anyhow!("expected one or two amounts, got {}", amounts.len())),
		};
		Ok(TransferParams::new(
			parse_h160(&self.beneficiary)?,
			amounts,
			XcmVersion::try_from(self.xcm_version)?,
		)?)
	}

	// Resolves the dry run endpoint along with the account executing the call.
	fn dry_run(&self) -> Result<DryRun> {
		Ok(match self.mode {
			ModeSelection::RuntimeApi => DryRun::RuntimeApi { origin: parse_account(&self.sender)? },
			ModeSelection::Extrinsic => {
				let suri = self.suri.as_deref().ok_or_else(|| {
					anyhow!("a secret key URI (--suri or {}) is required to sign the extrinsic", env::SURI)
				})?;
				DryRun::Extrinsic { signer: create_signer(suri)? }
			},
		})
	}

	// Describes what is about to be dry-run.
	fn display(&self, dry_run: &DryRun) -> String {
		let tokens = supported_tokens().map(|t| t.to_string()).join(", ");
		let orders = self
			.order
			.orders()
			.iter()
			.map(|o| format!("{o} [{}]", o.description()))
			.collect::<Vec<_>>()
			.join(", ");
		format!(
			"Tokens: {tokens}\nOrders: {orders}\nDry run: {} as {}",
			dry_run.mode(),
			dry_run.account()
		)
	}
}

// Prints whether the dry run of an order succeeded or failed.
fn display_result(
	order: AssetOrder,
	result: &Result<DryRunReport, Error>,
	cli: &mut impl Cli,
) -> Result<()> {
	let prefix = format!("{order} [{}]", order.description());
	match result {
		Ok(report) if report.outcome.is_success() => {
			let mut message = format!("✅ {prefix}: {}", report.outcome);
			if let Some(events) = report.emitted_events {
				message.push_str(&format!(" ({events} events"));
				if let Some(xcms) = report.forwarded_xcms {
					message.push_str(&format!(", {xcms} messages forwarded"));
				}
				message.push(')');
			}
			cli.success(message)?;
		},
		Ok(report) => cli.error(format!("❌ {prefix}: {}", report.outcome))?,
		Err(e) => cli.error(format!("❌ {prefix}: {e}"))?,
	}
	Ok(())
}

// Highlights when the order of the assets changed the result. Orders whose dry run could not
// complete count as attempted but not succeeded.
fn display_summary(results: &[OrderResult], cli: &mut impl Cli) -> Result<()> {
	let reports: Vec<DryRunReport> = results
		.iter()
		.filter_map(|result| match result {
			OrderResult::Completed(report) => Some(report.clone()),
			OrderResult::Errored { .. } => None,
		})
		.collect();
	if outcomes_differ(&reports) {
		cli.warning("The order of the assets changed the result of the dry run.")?;
	}
	let succeeded = results.iter().filter(|r| r.is_success()).count();
	cli.outro(format!("{succeeded} of {} dry runs succeeded.", results.len()))?;
	Ok(())
}
