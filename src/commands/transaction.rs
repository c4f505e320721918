use anyhow::Result;
use serde_json::Value;

use crate::cli::Cli;
use crate::commands::resolve_rpc;
use crate::config::Config;
use crate::rpc::RpcClient;

pub async fn run(cli: &Cli, hash: &str) -> Result<()> {
	let config = Config::load()?;
	let rpc = RpcClient::new(&resolve_rpc(cli, &config)?);

	let tx = rpc.get_transaction_by_hash(hash).await?;
	let pending = is_pending(&tx);

	log::info!("transaction details:");
	let details = serde_json::json!({
		"transaction": tx,
		"pending": pending,
	});
	println!("{}", serde_json::to_string_pretty(&details)?);
	Ok(())
}

/// A transaction still in the pool has no block number yet.
fn is_pending(tx: &Value) -> bool {
	tx.get("blockNumber").map_or(true, Value::is_null)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn mined_transaction_is_not_pending() {
		let tx = json!({"hash": "0xabc", "blockNumber": "0x10"});
		assert!(!is_pending(&tx));
	}

	#[test]
	fn pool_transaction_is_pending() {
		assert!(is_pending(&json!({"hash": "0xabc", "blockNumber": null})));
		assert!(is_pending(&json!({"hash": "0xabc"})));
	}
}
