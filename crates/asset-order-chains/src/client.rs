// SPDX-License-Identifier: GPL-3.0

use crate::errors::Error;
use subxt::{
	OnlineClient, SubstrateConfig,
	backend::{legacy::LegacyRpcMethods, rpc::RpcClient},
	tx::DynamicPayload,
};
use url::Url;

/// Sets up an [OnlineClient] instance for connecting to a blockchain.
///
/// # Arguments
/// * `url` - Endpoint of the node.
pub async fn set_up_client(url: &str) -> Result<OnlineClient<SubstrateConfig>, Error> {
	OnlineClient::<SubstrateConfig>::from_url(url)
		.await
		.map_err(|e| Error::ConnectionFailure(e.to_string()))
}

/// A connection to a node, sharing one socket between the client and the raw RPC methods.
pub struct Node {
	url: Url,
	client: OnlineClient<SubstrateConfig>,
	rpc: LegacyRpcMethods<SubstrateConfig>,
}

impl Node {
	/// Connects to the node at the given endpoint.
	///
	/// # Arguments
	/// * `url` - Endpoint of the node.
	pub async fn connect(url: &Url) -> Result<Self, Error> {
		log::debug!("connecting to {url}");
		let rpc_client = RpcClient::from_url(url.as_str())
			.await
			.map_err(|e| Error::ConnectionFailure(format!("{url}: {e}")))?;
		let client = OnlineClient::<SubstrateConfig>::from_rpc_client(rpc_client.clone())
			.await
			.map_err(|e| Error::ConnectionFailure(format!("{url}: {e}")))?;
		let rpc = LegacyRpcMethods::new(rpc_client);
		log::debug!(
			"connected to {url} (spec version {})",
			client.runtime_version().spec_version
		);
		Ok(Self { url: url.clone(), client, rpc })
	}

	/// The endpoint of the node.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// The client used to interact with the chain.
	pub fn client(&self) -> &OnlineClient<SubstrateConfig> {
		&self.client
	}

	/// The legacy RPC methods, sharing the connection of the client.
	pub fn rpc(&self) -> &LegacyRpcMethods<SubstrateConfig> {
		&self.rpc
	}

	/// Encodes the call data of an extrinsic into a hexadecimal string.
	///
	/// # Arguments
	/// * `xt` - The extrinsic whose call data will be encoded.
	pub fn encode_call_data(&self, xt: &DynamicPayload) -> Result<String, Error> {
		encode_call_data(&self.client, xt)
	}
}

/// Encodes the call data for a given extrinsic into a hexadecimal string.
///
/// # Arguments
/// * `client` - The client used to interact with the chain.
/// * `xt` - The extrinsic whose call data will be encoded and returned.
pub fn encode_call_data(
	client: &OnlineClient<SubstrateConfig>,
	xt: &DynamicPayload,
) -> Result<String, Error> {
	use subxt::tx::Payload as _;
	let call_data = xt
		.encode_call_data(&client.metadata())
		.map_err(|e| Error::CallDataEncodingError(e.to_string()))?;
	Ok(format!("0x{}", hex::encode(call_data)))
}
