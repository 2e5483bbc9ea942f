// SPDX-License-Identifier: GPL-3.0

use thiserror::Error;

/// Represents the various errors that can occur in the crate.
#[derive(Error, Debug)]
pub enum Error {
	#[error("Amount of {amount} {symbol} overflows when scaled to base units")]
	AmountOverflow { amount: u128, symbol: String },
	#[error("Failed to encode call data. {0}")]
	CallDataEncodingError(String),
	#[error("Failed to establish a connection to: {0}")]
	ConnectionFailure(String),
	#[error("Dry run failed: {0}")]
	DryRunError(String),
	#[error("Invalid address: {0}")]
	InvalidAddress(String),
	#[error("Failed to create keypair from URI: {0}")]
	KeyPairCreation(String),
	#[error("Failed to parse secret URI: {0}")]
	ParseSecretURI(String),
	#[error("Failed to parse URL: {0}")]
	ParseError(#[from] url::ParseError),
	#[error("Unknown token: {0}")]
	UnknownToken(String),
	#[error("Unexpected dry run result: {0}")]
	UnexpectedResult(String),
	#[error("Unsupported XCM version: {0}")]
	UnsupportedXcmVersion(u32),
}
