// SPDX-License-Identifier: GPL-3.0

#![doc = include_str!("../README.md")]

/// The tokens whose order is swapped between the transfer variants.
pub mod assets;
mod client;
/// Provides functionality to dry-run transfers and classify their results.
pub mod dry_run;
mod errors;
mod signer;
/// Builds the order-dependent transfer.
pub mod transfer;

pub use assets::{TokenDescriptor, WBTC, WETH, find_token_by_symbol, parse_h160, supported_tokens};
pub use client::{Node, encode_call_data, set_up_client};
pub use dry_run::{
	CallDryRunEffects, DryRun, DryRunMode, DryRunOutcome, DryRunReport, dry_run_call,
	dry_run_extrinsic, outcomes_differ,
};
pub use errors::Error;
pub use signer::{create_signer, parse_account};
pub use transfer::{AssetOrder, TransferParams, XcmVersion, build_assets, build_transfer};
// External export from subxt.
pub use subxt::{OnlineClient, SubstrateConfig, tx::DynamicPayload, utils::AccountId32};
