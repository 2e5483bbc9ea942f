// SPDX-License-Identifier: GPL-3.0

use crate::errors::Error;
use std::str::FromStr;
use subxt::utils::AccountId32;
use subxt_signer::{SecretUri, sr25519::Keypair};

/// Create a keypair from a secret URI.
///
/// # Arguments
/// `suri` - Secret URI string used to generate the `Keypair`.
pub fn create_signer(suri: &str) -> Result<Keypair, Error> {
	let uri = SecretUri::from_str(suri).map_err(|e| Error::ParseSecretURI(format!("{}", e)))?;
	Keypair::from_uri(&uri).map_err(|e| Error::KeyPairCreation(format!("{}", e)))
}

/// Parses an SS58 encoded account.
///
/// # Arguments
/// `account` - The SS58 encoded account.
pub fn parse_account(account: &str) -> Result<AccountId32, Error> {
	AccountId32::from_str(account).map_err(|e| Error::InvalidAddress(format!("{account}: {e}")))
}
