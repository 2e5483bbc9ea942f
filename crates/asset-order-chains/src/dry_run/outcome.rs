// SPDX-License-Identifier: GPL-3.0

use crate::errors::Error;
use scale_value::{Composite, Value, ValueDef};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use subxt::{
	Metadata,
	backend::legacy::rpc_methods::DryRunResult,
	ext::subxt_rpcs::methods::legacy::DryRunDecodeError,
};

/// The result of dry-running a call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DryRunOutcome {
	/// The call executed without a dispatch error.
	Success,
	/// The call executed but returned a dispatch error.
	ExecutionFailed {
		/// A description of the dispatch error.
		error: String,
	},
	/// The dry run refused to execute the call.
	Rejected {
		/// Why the call was refused.
		reason: String,
	},
}

impl DryRunOutcome {
	/// Whether the call executed without a dispatch error.
	pub fn is_success(&self) -> bool {
		matches!(self, DryRunOutcome::Success)
	}
}

impl Display for DryRunOutcome {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			DryRunOutcome::Success => write!(f, "execution succeeded"),
			DryRunOutcome::ExecutionFailed { error } => write!(f, "execution failed: {error}"),
			DryRunOutcome::Rejected { reason } => write!(f, "dry run rejected: {reason}"),
		}
	}
}

/// The outcome of a `DryRunApi::dry_run_call`, along with the effects it reported.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallDryRunEffects {
	/// The outcome of the call.
	pub outcome: DryRunOutcome,
	/// The number of events emitted by the call.
	pub emitted_events: Option<usize>,
	/// The number of XCM messages the call would have sent.
	pub forwarded_xcms: Option<usize>,
}

/// Classifies the decoded return value of `DryRunApi::dry_run_call`, which has the shape
/// `Result<CallDryRunEffects, XcmDryRunApiError>`.
///
/// # Arguments
/// * `value` - The decoded return value.
/// * `metadata` - The chain metadata, used to name module errors when available.
pub fn classify_runtime_api_result<T>(
	value: &Value<T>,
	metadata: Option<&Metadata>,
) -> Result<CallDryRunEffects, Error> {
	match as_result(value)? {
		Err(error) => Ok(CallDryRunEffects {
			outcome: DryRunOutcome::Rejected { reason: describe(error, metadata) },
			emitted_events: None,
			forwarded_xcms: None,
		}),
		Ok(effects) => {
			let execution_result = field(effects, "execution_result").ok_or_else(|| {
				Error::UnexpectedResult(format!("missing `execution_result` in {effects}"))
			})?;
			let outcome = match as_result(execution_result)? {
				Ok(_) => DryRunOutcome::Success,
				// `DispatchErrorWithPostInfo`.
				Err(error) => DryRunOutcome::ExecutionFailed {
					error: describe(field(error, "error").unwrap_or(error), metadata),
				},
			};
			Ok(CallDryRunEffects {
				outcome,
				emitted_events: field(effects, "emitted_events").and_then(len),
				forwarded_xcms: field(effects, "forwarded_xcms").and_then(|forwarded| {
					// `Vec<(VersionedLocation, Vec<VersionedXcm<()>>)>`.
					values(forwarded)?.map(|entry| values(entry)?.nth(1).and_then(len)).sum()
				}),
			})
		},
	}
}

/// Classifies the decoded result of `system_dryRun`.
///
/// # Arguments
/// * `result` - The decoded dry run result.
/// * `metadata` - The chain metadata, used to decode and name dispatch errors when available.
pub fn classify_dry_run_result(
	result: Result<DryRunResult<'_>, DryRunDecodeError>,
	metadata: Option<&Metadata>,
) -> Result<DryRunOutcome, Error> {
	match result {
		Ok(DryRunResult::Success) => Ok(DryRunOutcome::Success),
		Ok(DryRunResult::DispatchError(bytes)) =>
			Ok(DryRunOutcome::ExecutionFailed { error: describe_encoded(bytes, metadata) }),
		Ok(DryRunResult::TransactionValidityError) =>
			Ok(DryRunOutcome::Rejected { reason: "transaction validity error".into() }),
		Err(DryRunDecodeError::WrongNumberOfBytes) => Err(Error::UnexpectedResult(
			"dry run result was less than 2 bytes, which is invalid".into(),
		)),
		Err(DryRunDecodeError::InvalidBytes) =>
			Err(Error::UnexpectedResult("dry run bytes are not valid".into())),
	}
}

// Decodes a SCALE encoded `DispatchError` before describing it, falling back to its hex encoding.
fn describe_encoded(bytes: &[u8], metadata: Option<&Metadata>) -> String {
	metadata
		.and_then(|metadata| {
			let ty = metadata.dispatch_error_ty()?;
			let error = scale_value::scale::decode_as_type(&mut &*bytes, ty, metadata.types()).ok()?;
			Some(describe(&error, Some(metadata)))
		})
		.unwrap_or_else(|| format!("0x{}", hex::encode(bytes)))
}

/// Describes a dispatch error, e.g. `PolkadotXcm::LocalExecutionIncomplete` or
/// `Token(FundsUnavailable)`.
///
/// # Arguments
/// * `error` - The decoded error.
/// * `metadata` - The chain metadata, used to name module errors when available.
pub fn describe<T>(error: &Value<T>, metadata: Option<&Metadata>) -> String {
	let ValueDef::Variant(variant) = &error.value else {
		return error.to_string();
	};
	let inner = composite_values(&variant.values).next();
	match (variant.name.as_str(), inner) {
		("Module", Some(module_error)) => describe_module_error(module_error, metadata),
		(name, Some(inner)) => format!("{name}({})", describe(inner, metadata)),
		(name, None) => name.to_string(),
	}
}

fn describe_module_error<T>(module_error: &Value<T>, metadata: Option<&Metadata>) -> String {
	let index = field(module_error, "index").and_then(|i| i.as_u128());
	let error = field(module_error, "error")
		.and_then(|e| values(e).and_then(|mut bytes| bytes.next()).and_then(|b| b.as_u128()));
	let (Some(index), Some(error)) = (index, error) else {
		return module_error.to_string();
	};
	let named = metadata.and_then(|metadata| {
		let pallet = metadata.pallet_by_index(u8::try_from(index).ok()?)?;
		let variant = pallet.error_variant_by_index(u8::try_from(error).ok()?)?;
		Some(format!("{}::{}", pallet.name(), variant.name))
	});
	named.unwrap_or_else(|| format!("Module {{ index: {index}, error: {error} }}"))
}

// Splits a decoded `Result` into its inner value.
fn as_result<T>(value: &Value<T>) -> Result<Result<&Value<T>, &Value<T>>, Error> {
	let unexpected = || Error::UnexpectedResult(format!("expected a result, got {value}"));
	let ValueDef::Variant(variant) = &value.value else {
		return Err(unexpected());
	};
	let inner = composite_values(&variant.values).next().ok_or_else(unexpected)?;
	match variant.name.as_str() {
		"Ok" => Ok(Ok(inner)),
		"Err" => Ok(Err(inner)),
		_ => Err(unexpected()),
	}
}

fn field<'a, T>(value: &'a Value<T>, name: &str) -> Option<&'a Value<T>> {
	match &value.value {
		ValueDef::Composite(Composite::Named(fields)) =>
			fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
		_ => None,
	}
}

fn values<T>(value: &Value<T>) -> Option<Box<dyn Iterator<Item = &Value<T>> + '_>> {
	match &value.value {
		ValueDef::Composite(composite) => Some(composite_values(composite)),
		_ => None,
	}
}

fn composite_values<T>(composite: &Composite<T>) -> Box<dyn Iterator<Item = &Value<T>> + '_> {
	match composite {
		Composite::Named(fields) => Box::new(fields.iter().map(|(_, v)| v)),
		Composite::Unnamed(values) => Box::new(values.iter()),
	}
}

fn len<T>(value: &Value<T>) -> Option<usize> {
	values(value).map(|values| values.count())
}
