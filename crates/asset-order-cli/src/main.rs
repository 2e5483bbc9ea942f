// SPDX-License-Identifier: GPL-3.0

mod cli;
mod commands;
mod common;
mod output;
mod style;

use anyhow::Result;
use clap::Parser;
use cli::traits::Cli as _;
use commands::dry_run::DryRunCommand;
use output::{CliError, CliResponse};

#[derive(Parser)]
#[command(author, version, about, styles=style::get_styles())]
pub struct Cli {
	/// Print a single JSON document with the results to stdout.
	#[arg(long, global = true)]
	json: bool,
	#[command(flatten)]
	command: DryRunCommand,
}

#[tokio::main]
async fn main() -> Result<()> {
	env_logger::init();
	let args = Cli::parse();
	let mut cli = cli::Cli { json: args.json };
	let result = args.command.execute(&mut cli).await;
	if !cli.is_json() {
		return result.map(|_| ());
	}
	match result {
		Ok(reports) => {
			CliResponse::ok(reports).print_json();
			Ok(())
		},
		Err(e) => {
			log::debug!("{e:?}");
			CliResponse::err(CliError::from(&e)).print_json();
			std::process::exit(1);
		},
	}
}

#[test]
fn verify_cli() {
	// https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_4/index.html
	use clap::CommandFactory;
	Cli::command().debug_assert()
}
