use alloy::primitives::U256;
use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::commands::resolve_rpc;
use crate::config::Config;
use crate::rpc::RpcClient;

pub async fn run(cli: &Cli, number: &str) -> Result<()> {
	let config = Config::load()?;
	let rpc = RpcClient::new(&resolve_rpc(cli, &config)?);

	let number = parse_block_number(number)?;
	let block = rpc.get_block_by_number(number).await?;

	log::info!("block details:");
	println!("{}", serde_json::to_string_pretty(&block)?);
	Ok(())
}

/// Parse a block number argument, decimal or 0x-hex. An empty string
/// selects the latest block.
fn parse_block_number(value: &str) -> Result<Option<U256>> {
	if value.is_empty() {
		return Ok(None);
	}
	let parsed = match value.strip_prefix("0x") {
		Some(digits) if !digits.is_empty() => U256::from_str_radix(digits, 16).ok(),
		Some(_) => None,
		None => U256::from_str_radix(value, 10).ok(),
	};
	let number =
		parsed.with_context(|| format!("block number must be an integer, got {value:?}"))?;
	Ok(Some(number))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_means_latest() {
		assert_eq!(parse_block_number("").unwrap(), None);
	}

	#[test]
	fn decimal_and_hex_are_accepted() {
		assert_eq!(parse_block_number("0").unwrap(), Some(U256::from(0)));
		assert_eq!(parse_block_number("1234").unwrap(), Some(U256::from(1234)));
		assert_eq!(parse_block_number("0x4d2").unwrap(), Some(U256::from(1234)));
	}

	#[test]
	fn big_numbers_survive() {
		let n = parse_block_number("340282366920938463463374607431768211456").unwrap();
		assert_eq!(n, Some(U256::from(1u128) << 128));
	}

	#[test]
	fn garbage_is_rejected() {
		assert!(parse_block_number("latest").is_err());
		assert!(parse_block_number("12.5").is_err());
		assert!(parse_block_number("0x").is_err());
		assert!(parse_block_number("-1").is_err());
	}
}
