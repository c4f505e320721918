use alloy::primitives::U256;
use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use thiserror::Error;

/// How often to poll for a transaction receipt.
const RECEIPT_POLL_INTERVAL: tokio::time::Duration = tokio::time::Duration::from_secs(2);

/// Error object returned by the node for a failed JSON-RPC call.
#[derive(Debug, Error)]
#[error("RPC error {code}: {message}")]
pub struct RpcError {
	pub code: i64,
	pub message: String,
}

/// Thin JSON-RPC 2.0 client for a GoChain/Ethereum node.
///
/// Responses are kept as raw `serde_json::Value`s so that chain data is
/// reprinted exactly as the node reported it. Only the quantities the
/// deploy path needs (nonce, gas price, chain id) get parsed out.
pub struct RpcClient {
	url: String,
	http: reqwest::Client,
}

impl RpcClient {
	pub fn new(url: &str) -> Self {
		Self {
			url: url.to_owned(),
			http: reqwest::Client::new(),
		}
	}

	/// Run a single JSON-RPC call and return its `result` value.
	pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
		let body = json!({
			"id": 1,
			"jsonrpc": "2.0",
			"method": method,
			"params": params
		});

		log::info!("rpc: {method}");
		let resp: Value = self.http.post(&self.url).json(&body).send().await?.json().await?;
		extract_result(resp)
	}

	// -- Chain queries --

	/// Fetch a block by number, or the latest block when `number` is `None`.
	/// Transactions are returned as hashes, not full objects.
	pub async fn get_block_by_number(&self, number: Option<U256>) -> Result<Value> {
		let block = self
			.call("eth_getBlockByNumber", json!([block_tag(number), false]))
			.await?;
		if block.is_null() {
			anyhow::bail!("block not found");
		}
		Ok(block)
	}

	pub async fn get_transaction_by_hash(&self, tx_hash: &str) -> Result<Value> {
		let tx = self
			.call("eth_getTransactionByHash", json!([tx_hash]))
			.await?;
		if tx.is_null() {
			anyhow::bail!("transaction not found: {tx_hash}");
		}
		Ok(tx)
	}

	pub async fn get_balance(&self, address: &str) -> Result<U256> {
		let balance = self.call("eth_getBalance", json!([address, "latest"])).await?;
		quantity(&balance)
	}

	/// Contract code at the address as a hex string ("0x" for none).
	pub async fn get_code(&self, address: &str) -> Result<String> {
		let code = self.call("eth_getCode", json!([address, "latest"])).await?;
		code.as_str()
			.map(str::to_owned)
			.ok_or_else(|| anyhow!("malformed eth_getCode response: {code}"))
	}

	/// The clique consensus snapshot at the latest block.
	pub async fn get_snapshot(&self) -> Result<Value> {
		self.call("clique_getSnapshot", json!(["latest"])).await
	}

	// -- Deployment support --

	pub async fn chain_id(&self) -> Result<u64> {
		let id = self.call("eth_chainId", json!([])).await?;
		quantity_u64(&id)
	}

	/// The account's next nonce, including transactions still in the pool.
	pub async fn get_transaction_count(&self, address: &str) -> Result<u64> {
		let count = self
			.call("eth_getTransactionCount", json!([address, "pending"]))
			.await?;
		quantity_u64(&count)
	}

	pub async fn gas_price(&self) -> Result<u128> {
		let price = self.call("eth_gasPrice", json!([])).await?;
		quantity_u128(&price)
	}

	/// Broadcast a signed raw transaction and return its hash.
	pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<String> {
		let hash = self
			.call("eth_sendRawTransaction", json!([format!("0x{}", hex::encode(raw))]))
			.await?;
		hash.as_str()
			.map(str::to_owned)
			.ok_or_else(|| anyhow!("malformed eth_sendRawTransaction response: {hash}"))
	}

	pub async fn get_transaction_receipt(&self, tx_hash: &str) -> Result<Option<Value>> {
		let receipt = self
			.call("eth_getTransactionReceipt", json!([tx_hash]))
			.await?;
		Ok(if receipt.is_null() { None } else { Some(receipt) })
	}

	/// Poll until the transaction has been mined and return its receipt.
	/// There is no timeout; interrupt with Ctrl-C to give up.
	pub async fn wait_for_receipt(&self, tx_hash: &str) -> Result<Value> {
		loop {
			if let Some(receipt) = self.get_transaction_receipt(tx_hash).await? {
				return Ok(receipt);
			}
			tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
		}
	}
}

// -- Response helpers --

/// Pull the `result` out of a JSON-RPC response, surfacing the node's
/// error object if the call failed.
fn extract_result(resp: Value) -> Result<Value> {
	if let Some(err) = resp.get("error") {
		let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
		let message = err
			.get("message")
			.and_then(Value::as_str)
			.unwrap_or("unknown error")
			.to_owned();
		return Err(RpcError { code, message }.into());
	}
	resp.get("result")
		.cloned()
		.ok_or_else(|| anyhow!("malformed RPC response: no result or error"))
}

/// Render a block number as an RPC block tag.
fn block_tag(number: Option<U256>) -> String {
	match number {
		Some(n) => format!("0x{n:x}"),
		None => "latest".to_owned(),
	}
}

/// Parse a hex quantity ("0x...") from a response value.
fn quantity(value: &Value) -> Result<U256> {
	let s = value
		.as_str()
		.ok_or_else(|| anyhow!("expected a hex quantity, got {value}"))?;
	let digits = s
		.strip_prefix("0x")
		.ok_or_else(|| anyhow!("quantity is missing its 0x prefix: {s:?}"))?;
	U256::from_str_radix(digits, 16).map_err(|e| anyhow!("invalid hex quantity {s:?}: {e}"))
}

fn quantity_u64(value: &Value) -> Result<u64> {
	let q = quantity(value)?;
	u64::try_from(q).map_err(|_| anyhow!("quantity {q} does not fit in 64 bits"))
}

fn quantity_u128(value: &Value) -> Result<u128> {
	let q = quantity(value)?;
	u128::try_from(q).map_err(|_| anyhow!("quantity {q} does not fit in 128 bits"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn block_tag_defaults_to_latest() {
		assert_eq!(block_tag(None), "latest");
	}

	#[test]
	fn block_tag_is_hex_encoded() {
		assert_eq!(block_tag(Some(U256::from(0))), "0x0");
		assert_eq!(block_tag(Some(U256::from(1_000_000))), "0xf4240");
	}

	#[test]
	fn quantity_parses_hex() {
		assert_eq!(quantity(&json!("0x0")).unwrap(), U256::from(0));
		assert_eq!(quantity(&json!("0x10")).unwrap(), U256::from(16));
		assert_eq!(quantity_u64(&json!("0x2a")).unwrap(), 42);
	}

	#[test]
	fn quantity_rejects_garbage() {
		assert!(quantity(&json!("10")).is_err());
		assert!(quantity(&json!("0xzz")).is_err());
		assert!(quantity(&json!(10)).is_err());
		assert!(quantity(&json!(null)).is_err());
	}

	#[test]
	fn quantity_u64_rejects_overflow() {
		let too_big = json!("0x10000000000000000");
		assert!(quantity_u64(&too_big).is_err());
		assert!(quantity_u128(&too_big).is_ok());
	}

	#[test]
	fn extract_result_returns_result() {
		let resp = json!({"jsonrpc": "2.0", "id": 1, "result": {"number": "0x1"}});
		let result = extract_result(resp).unwrap();
		assert_eq!(result["number"], "0x1");
	}

	#[test]
	fn extract_result_surfaces_node_errors() {
		let resp = json!({
			"jsonrpc": "2.0",
			"id": 1,
			"error": {"code": -32000, "message": "header not found"}
		});
		let err = extract_result(resp).unwrap_err();
		let rpc_err = err.downcast::<RpcError>().unwrap();
		assert_eq!(rpc_err.code, -32000);
		assert_eq!(rpc_err.message, "header not found");
	}

	#[test]
	fn extract_result_rejects_malformed_responses() {
		assert!(extract_result(json!({"jsonrpc": "2.0", "id": 1})).is_err());
	}
}
