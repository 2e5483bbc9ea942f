// SPDX-License-Identifier: GPL-3.0

/// Well-known endpoints.
pub(crate) mod urls {
	/// Polkadot Asset Hub public RPC.
	pub(crate) const ASSET_HUB: &str = "wss://polkadot-asset-hub-rpc.polkadot.io";
	/// Local dev node (Substrate default port 9944).
	#[cfg(test)]
	pub(crate) const LOCAL: &str = "ws://localhost:9944/";
}

/// Environment variables read by the CLI.
pub(crate) mod env {
	/// Selects the websocket endpoint of the node.
	pub(crate) const ENDPOINT: &str = "ASSET_HUB_WS";
	/// Secret key URI used to sign extrinsics.
	pub(crate) const SURI: &str = "ASSET_ORDER_SURI";
}
