use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
	name = "web3",
	about = "CLI for GoChain/Ethereum nodes: chain queries, contract builds and deploys.",
	version
)]
pub struct Cli {
	/// Name of the network to connect to.
	#[arg(long, env = "NETWORK", global = true)]
	pub network: Option<Network>,

	/// Full RPC endpoint URL. Mutually exclusive with --network.
	#[arg(long, env = "RPC_URL", global = true)]
	pub rpc_url: Option<String>,

	/// Enable verbose logging.
	#[arg(long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Network {
	Testnet,
	Mainnet,
	Localhost,
	Ethereum,
	Ropsten,
}

impl Network {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Testnet => "testnet",
			Self::Mainnet => "mainnet",
			Self::Localhost => "localhost",
			Self::Ethereum => "ethereum",
			Self::Ropsten => "ropsten",
		}
	}

	/// Parse a network name as it appears in the config file.
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"testnet" => Some(Self::Testnet),
			"mainnet" => Some(Self::Mainnet),
			"localhost" => Some(Self::Localhost),
			"ethereum" => Some(Self::Ethereum),
			"ropsten" => Some(Self::Ropsten),
			_ => None,
		}
	}
}

#[derive(Subcommand)]
pub enum Command {
	/// Show information about a block.
	#[command(visible_alias = "bl")]
	Block {
		/// Block number, decimal or 0x-hex. Omit for the latest block.
		#[arg(default_value = "")]
		number: String,
	},

	/// Show information about a transaction.
	#[command(visible_alias = "tx")]
	Transaction {
		/// Transaction hash (0x-prefixed).
		hash: String,
	},

	/// Show the balance and contract code of an address.
	#[command(visible_alias = "addr")]
	Address {
		/// Account address (0x-prefixed).
		address: String,
	},

	/// Build, deploy, and call smart contracts.
	#[command(visible_alias = "c")]
	Contract {
		#[command(subcommand)]
		command: ContractCommand,
	},

	/// Show the clique consensus snapshot at the latest block.
	#[command(visible_alias = "sn")]
	Snapshot,
}

// -- Contract subcommands --

#[derive(Subcommand)]
pub enum ContractCommand {
	/// Compile a Solidity source file and write .bin/.abi artifacts.
	Build {
		/// Path to the Solidity source file.
		file: String,
	},

	/// Deploy previously compiled bytecode to the network.
	Deploy {
		/// Path to the .bin artifact to deploy.
		file: String,

		/// Hex-encoded private key used to sign the deployment.
		#[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
		private_key: String,
	},

	/// Call a function of a deployed contract.
	Call {
		/// Name of the function to call.
		#[arg(long)]
		function: Option<String>,

		/// Address of the deployed contract.
		#[arg(long)]
		contract: Option<String>,
	},
}
