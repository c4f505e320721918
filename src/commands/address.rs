use anyhow::Result;
use serde::Serialize;

use crate::cli::Cli;
use crate::commands::resolve_rpc;
use crate::config::Config;
use crate::rpc::RpcClient;

/// Balance and deployed code of an account, as printed to the user.
#[derive(Serialize)]
struct AddressDetails {
	/// Balance in wei, as a decimal string.
	balance: String,
	/// Contract code, present only when the account has code.
	#[serde(skip_serializing_if = "Option::is_none")]
	code: Option<String>,
}

pub async fn run(cli: &Cli, address: &str) -> Result<()> {
	let config = Config::load()?;
	let rpc = RpcClient::new(&resolve_rpc(cli, &config)?);

	let balance = rpc.get_balance(address).await?;
	let code = rpc.get_code(address).await?;

	let details = AddressDetails {
		balance: balance.to_string(),
		code: (!is_empty_code(&code)).then_some(code),
	};

	log::info!("address details:");
	println!("{}", serde_json::to_string_pretty(&details)?);
	Ok(())
}

/// Accounts without code report "0x" (or nothing at all on some nodes).
fn is_empty_code(code: &str) -> bool {
	matches!(code, "" | "0x")
}
