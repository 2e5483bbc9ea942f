// SPDX-License-Identifier: GPL-3.0

use asset_order_chains::Error;
use serde::Serialize;

/// Top-level JSON envelope printed when `--json` is active.
#[derive(Debug, Serialize)]
pub(crate) struct CliResponse<T: Serialize> {
	schema_version: u32,
	success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<CliError>,
}

impl<T: Serialize> CliResponse<T> {
	/// Build a successful response.
	pub(crate) fn ok(data: T) -> Self {
		Self { schema_version: 1, success: true, data: Some(data), error: None }
	}

	/// Print this response as a single JSON line to stdout.
	pub(crate) fn print_json(&self) {
		match serde_json::to_string(self) {
			Ok(json) => println!("{json}"),
			Err(e) => eprintln!("fatal: failed to serialize JSON response: {e}"),
		}
	}
}

impl CliResponse<()> {
	/// Build an error response.
	pub(crate) fn err(error: CliError) -> Self {
		Self { schema_version: 1, success: false, data: None, error: Some(error) }
	}
}

/// Structured error included in the JSON envelope.
#[derive(Debug, Serialize)]
pub(crate) struct CliError {
	code: ErrorCode,
	message: String,
}

impl CliError {
	pub(crate) fn new(code: ErrorCode, message: impl Into<String>) -> Self {
		Self { code, message: message.into() }
	}
}

impl From<&anyhow::Error> for CliError {
	fn from(error: &anyhow::Error) -> Self {
		let code = match error.downcast_ref::<Error>() {
			Some(Error::ConnectionFailure(_)) => ErrorCode::NetworkError,
			Some(Error::DryRunError(_) | Error::UnexpectedResult(_)) => ErrorCode::DryRunError,
			Some(_) => ErrorCode::InvalidInput,
			None => ErrorCode::Internal,
		};
		CliError::new(code, error.to_string())
	}
}

/// Machine-readable error codes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum ErrorCode {
	Internal,
	InvalidInput,
	NetworkError,
	DryRunError,
}
