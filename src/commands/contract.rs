use std::path::Path;

use alloy::signers::local::PrivateKeySigner;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use crate::cli::{Cli, ContractCommand};
use crate::commands::resolve_rpc;
use crate::compiler;
use crate::config::Config;
use crate::rpc::RpcClient;
use crate::tx_builder;

pub async fn run(cli: &Cli, cmd: &ContractCommand) -> Result<()> {
	match cmd {
		ContractCommand::Build { file } => build(file),
		ContractCommand::Deploy { file, private_key } => deploy(cli, file, private_key).await,
		ContractCommand::Call { .. } => {
			// TODO: encode the selected function with the contract ABI and
			// submit it via eth_call / eth_sendRawTransaction.
			println!("contract call is not implemented yet");
			Ok(())
		}
	}
}

/// Compile a Solidity source file and write a .bin/.abi pair per contract
/// into the working directory.
fn build(file: &str) -> Result<()> {
	let source =
		std::fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

	log::info!("compiling {file} ({} bytes)", source.len());
	let contracts = compiler::compile_source(&source)?;

	let written = compiler::write_artifacts(&contracts, Path::new("."))?;
	for (contract, (bin_path, abi_path)) in contracts.iter().zip(&written) {
		println!(
			"Compiled {} and wrote: {}, {}",
			contract.name,
			bin_path.display(),
			abi_path.display()
		);
	}
	Ok(())
}

/// Deploy previously compiled bytecode: sign a contract-creation
/// transaction, broadcast it, and wait for the receipt.
async fn deploy(cli: &Cli, file: &str, private_key: &str) -> Result<()> {
	let config = Config::load()?;
	let url = resolve_rpc(cli, &config)?;

	// Read and validate the artifact before touching the network.
	let bytecode_hex =
		std::fs::read_to_string(file).with_context(|| format!("cannot read the bin file {file:?}"))?;
	let bytecode = hex::decode(bytecode_hex.trim().trim_start_matches("0x"))
		.with_context(|| format!("{file:?} is not valid bytecode hex"))?;

	let signer: PrivateKeySigner = private_key
		.parse()
		.map_err(|e| anyhow!("invalid private key: {e}"))?;
	let from = signer.address().to_string();

	let rpc = RpcClient::new(&url);
	let chain_id = rpc.chain_id().await?;
	let nonce = rpc.get_transaction_count(&from).await?;
	let gas_price = rpc.gas_price().await?;
	log::info!("deploying from {from} (chain {chain_id}, nonce {nonce})");

	let tx = tx_builder::build_deployment(chain_id, nonce, gas_price, bytecode);
	let raw = tx_builder::sign_deployment(&signer, tx)?;
	let tx_hash = rpc.send_raw_transaction(&raw).await?;

	log::info!("waiting for receipt of {tx_hash}");
	let receipt = rpc.wait_for_receipt(&tx_hash).await?;
	let deployed = receipt
		.get("contractAddress")
		.and_then(Value::as_str)
		.ok_or_else(|| anyhow!("receipt is missing the contract address"))?
		.to_owned();

	println!("Contract has been successfully deployed with transaction: {tx_hash}");
	println!("Contract address is: {deployed}");
	Ok(())
}
