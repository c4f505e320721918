use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::Network;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	pub network: NetworkConfig,
}

/// The network name to use when neither --network nor --rpc-url is given,
/// plus the RPC endpoint for every known network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
	pub default: String,
	pub testnet_rpc: String,
	pub mainnet_rpc: String,
	pub localhost_rpc: String,
	pub ethereum_rpc: String,
	pub ropsten_rpc: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			network: NetworkConfig {
				default: "testnet".into(),
				testnet_rpc: "https://testnet-rpc.gochain.io".into(),
				mainnet_rpc: "https://rpc.gochain.io".into(),
				localhost_rpc: "http://localhost:8545".into(),
				ethereum_rpc: "https://main-rpc.linkpool.io".into(),
				ropsten_rpc: "https://ropsten-rpc.linkpool.io".into(),
			},
		}
	}
}

impl Config {
	/// Directory where CLI state is stored (~/.web3/).
	pub fn dir() -> PathBuf {
		dirs::home_dir()
			.expect("could not determine home directory")
			.join(".web3")
	}

	/// Path to the config file.
	pub fn path() -> PathBuf {
		Self::dir().join("config.toml")
	}

	/// Load config from disk, falling back to defaults if no file exists.
	/// The config is read-only; edit the file by hand to override endpoints.
	pub fn load() -> anyhow::Result<Self> {
		let path = Self::path();
		if path.exists() {
			let content = std::fs::read_to_string(&path)?;
			Ok(toml::from_str(&content)?)
		} else {
			Ok(Self::default())
		}
	}

	/// The network used when no flag or environment variable selects one.
	pub fn default_network(&self) -> anyhow::Result<Network> {
		Network::from_name(&self.network.default).ok_or_else(|| {
			anyhow::anyhow!("unrecognized network {:?} in config", self.network.default)
		})
	}

	/// Return the RPC URL for the given network.
	pub fn rpc_url(&self, network: Network) -> &str {
		match network {
			Network::Testnet => &self.network.testnet_rpc,
			Network::Mainnet => &self.network.mainnet_rpc,
			Network::Localhost => &self.network.localhost_rpc,
			Network::Ethereum => &self.network.ethereum_rpc,
			Network::Ropsten => &self.network.ropsten_rpc,
		}
	}
}
