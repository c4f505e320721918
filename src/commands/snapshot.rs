use anyhow::Result;

use crate::cli::Cli;
use crate::commands::resolve_rpc;
use crate::config::Config;
use crate::rpc::RpcClient;

pub async fn run(cli: &Cli) -> Result<()> {
	let config = Config::load()?;
	let rpc = RpcClient::new(&resolve_rpc(cli, &config)?);

	let snapshot = rpc.get_snapshot().await?;

	log::info!("snapshot details:");
	println!("{}", serde_json::to_string_pretty(&snapshot)?);
	Ok(())
}
