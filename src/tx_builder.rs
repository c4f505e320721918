use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Bytes, TxKind, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use anyhow::{Context, Result};

/// Gas limit used for contract deployments.
pub const DEPLOY_GAS_LIMIT: u64 = 2_000_000;

/// Build an unsigned legacy transaction that creates a contract from the
/// given init bytecode. The caller supplies chain id, nonce, and gas price
/// as reported by the node.
pub fn build_deployment(chain_id: u64, nonce: u64, gas_price: u128, bytecode: Vec<u8>) -> TxLegacy {
	TxLegacy {
		chain_id: Some(chain_id),
		nonce,
		gas_price,
		gas_limit: DEPLOY_GAS_LIMIT,
		to: TxKind::Create,
		value: U256::ZERO,
		input: Bytes::from(bytecode),
	}
}

/// Sign the deployment with the given key and return the raw encoded
/// transaction, ready for `eth_sendRawTransaction`.
pub fn sign_deployment(signer: &PrivateKeySigner, tx: TxLegacy) -> Result<Vec<u8>> {
	let signature = signer
		.sign_hash_sync(&tx.signature_hash())
		.context("failed to sign the deployment transaction")?;
	let envelope = TxEnvelope::Legacy(tx.into_signed(signature));
	Ok(envelope.encoded_2718())
}
