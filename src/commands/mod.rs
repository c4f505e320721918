pub mod address;
pub mod block;
pub mod contract;
pub mod snapshot;
pub mod transaction;

use anyhow::Result;

use crate::cli::Cli;
use crate::config::Config;

/// Resolve the RPC URL from CLI flags (or their environment mirrors) and
/// config. Giving both --rpc-url and --network is a configuration error,
/// caught here before anything touches the network.
pub fn resolve_rpc(cli: &Cli, config: &Config) -> Result<String> {
	if let Some(url) = &cli.rpc_url {
		if let Some(network) = cli.network {
			anyhow::bail!(
				"cannot set both --rpc-url {:?} and --network {:?}",
				url,
				network.as_str()
			);
		}
		log::info!("rpc url: {url}");
		return Ok(url.clone());
	}

	let network = match cli.network {
		Some(network) => network,
		None => config.default_network()?,
	};
	log::info!("network: {}", network.as_str());

	let url = config.rpc_url(network).to_owned();
	log::info!("rpc url: {url}");
	Ok(url)
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::Parser;

	use crate::cli::Network;

	fn parse(args: &[&str]) -> Cli {
		Cli::try_parse_from(args).unwrap()
	}

	#[test]
	fn network_flag_resolves_from_the_table() {
		let config = Config::default();
		let table = [
			("testnet", "https://testnet-rpc.gochain.io"),
			("mainnet", "https://rpc.gochain.io"),
			("localhost", "http://localhost:8545"),
			("ethereum", "https://main-rpc.linkpool.io"),
			("ropsten", "https://ropsten-rpc.linkpool.io"),
		];
		for (name, url) in table {
			let cli = parse(&["web3", "--network", name, "snapshot"]);
			assert_eq!(resolve_rpc(&cli, &config).unwrap(), url);
		}
	}

	#[test]
	fn explicit_url_wins() {
		let config = Config::default();
		let cli = parse(&["web3", "--rpc-url", "http://node.example:8545", "snapshot"]);
		assert_eq!(
			resolve_rpc(&cli, &config).unwrap(),
			"http://node.example:8545"
		);
	}

	#[test]
	fn both_flags_is_an_error() {
		let config = Config::default();
		let cli = parse(&[
			"web3",
			"--network",
			"testnet",
			"--rpc-url",
			"http://node.example:8545",
			"snapshot",
		]);
		let err = resolve_rpc(&cli, &config).unwrap_err();
		assert!(err.to_string().contains("cannot set both"));
	}

	#[test]
	fn no_flags_falls_back_to_config_default() {
		let mut config = Config::default();
		config.network.default = "mainnet".into();
		let cli = parse(&["web3", "snapshot"]);
		assert_eq!(
			resolve_rpc(&cli, &config).unwrap(),
			config.rpc_url(Network::Mainnet)
		);
	}

	#[test]
	fn bad_config_default_is_an_error() {
		let mut config = Config::default();
		config.network.default = "devnet".into();
		let cli = parse(&["web3", "snapshot"]);
		assert!(resolve_rpc(&cli, &config).is_err());
	}
}
