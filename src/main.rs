use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod compiler;
mod config;
mod rpc;
mod tx_builder;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	let default_level = if cli.verbose { "info" } else { "warn" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
		.init();

	match &cli.command {
		Command::Block { number } => commands::block::run(&cli, number).await,
		Command::Transaction { hash } => commands::transaction::run(&cli, hash).await,
		Command::Address { address } => commands::address::run(&cli, address).await,
		Command::Contract { command } => commands::contract::run(&cli, command).await,
		Command::Snapshot => commands::snapshot::run(&cli).await,
	}
}
