// SPDX-License-Identifier: GPL-3.0

//! Tests running the `asset-order` binary.

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;

fn asset_order() -> Result<Command> {
	let mut command = Command::cargo_bin("asset-order")?;
	command.env_remove("ASSET_ORDER_SURI").env_remove("RUST_LOG");
	Ok(command)
}

#[test]
fn help_works() -> Result<()> {
	let output = asset_order()?.arg("--help").output()?;
	assert!(output.status.success());
	let stdout = String::from_utf8(output.stdout)?;
	for option in ["--url", "--order", "--mode", "--suri", "--beneficiary", "--amount", "--json"] {
		assert!(stdout.contains(option), "{option} missing from help");
	}
	Ok(())
}

#[test]
fn help_lists_modes() -> Result<()> {
	let output = asset_order()?.arg("--help").output()?;
	let stdout = String::from_utf8(output.stdout)?;
	assert!(stdout.contains("runtime-api"));
	assert!(stdout.contains("extrinsic"));
	Ok(())
}

#[test]
fn invalid_mode_fails() -> Result<()> {
	asset_order()?.args(["--mode", "offline"]).assert().failure();
	Ok(())
}

#[test]
fn invalid_order_fails() -> Result<()> {
	asset_order()?.args(["--order", "sideways"]).assert().failure();
	Ok(())
}

#[test]
fn too_many_amounts_fails() -> Result<()> {
	asset_order()?.args(["--amount", "1", "2", "3"]).assert().failure();
	Ok(())
}

#[test]
fn json_reports_invalid_beneficiary() -> Result<()> {
	let output = asset_order()?
		.args(["--json", "--beneficiary", "0x1234", "--url", "ws://127.0.0.1:1"])
		.output()?;
	assert_eq!(output.status.code(), Some(1));
	let response: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(response["schema_version"], 1);
	assert_eq!(response["success"], false);
	assert!(response["data"].is_null());
	assert_eq!(response["error"]["code"], "INVALID_INPUT");
	assert!(response["error"]["message"].as_str().is_some_and(|m| m.contains("0x1234")));
	Ok(())
}

#[test]
fn extrinsic_mode_requires_suri() -> Result<()> {
	asset_order()?.args(["--mode", "extrinsic"]).assert().failure();
	Ok(())
}

#[test]
fn json_reports_unreachable_node() -> Result<()> {
	let output = asset_order()?.args(["--json", "--url", "ws://127.0.0.1:1"]).output()?;
	assert_eq!(output.status.code(), Some(1));
	let response: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(response["success"], false);
	assert_eq!(response["error"]["code"], "NETWORK_ERROR");
	Ok(())
}

#[cfg(feature = "integration-tests")]
#[test]
fn json_reports_both_orders() -> Result<()> {
	let url = std::env::var("ASSET_HUB_WS")
		.unwrap_or_else(|_| "wss://polkadot-asset-hub-rpc.polkadot.io".to_string());
	let output = asset_order()?.args(["--json", "--url", &url]).output()?;
	assert!(output.status.success());
	let response: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(response["success"], true);
	let orders: Vec<_> = response["data"]
		.as_array()
		.map(|reports| reports.iter().map(|r| r["order"].clone()).collect())
		.unwrap_or_default();
	assert_eq!(orders, ["forward", "reverse"]);
	Ok(())
}
