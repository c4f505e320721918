//! Solidity compilation via the system `solc` binary.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;

/// One compiled contract: the name, its runtime bytecode (hex text), and
/// its ABI definition.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledContract {
	pub name: String,
	pub runtime_bytecode: String,
	pub abi: Value,
}

/// Shape of `solc --combined-json abi,bin-runtime` output.
#[derive(Deserialize)]
struct CombinedOutput {
	// BTreeMap keeps artifact order stable across runs.
	contracts: BTreeMap<String, ContractEntry>,
}

#[derive(Deserialize)]
struct ContractEntry {
	#[serde(rename = "bin-runtime")]
	bin_runtime: String,
	abi: Value,
}

/// Compile Solidity source text and return every contract it defines.
///
/// The source is piped to `solc` on stdin, so contracts come back
/// qualified as `<stdin>:Name`.
pub fn compile_source(source: &str) -> Result<Vec<CompiledContract>> {
	let mut child = Command::new("solc")
		.args(["--combined-json", "abi,bin-runtime", "-"])
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.context("failed to run solc; is it installed and on PATH?")?;

	{
		let mut stdin = child.stdin.take().ok_or_else(|| anyhow!("failed to open solc stdin"))?;
		stdin
			.write_all(source.as_bytes())
			.context("failed to pipe source to solc")?;
	}

	let output = child.wait_with_output().context("failed to wait for solc")?;
	if !output.status.success() {
		anyhow::bail!("solc failed:\n{}", String::from_utf8_lossy(&output.stderr));
	}

	let stdout = String::from_utf8(output.stdout).context("solc emitted invalid UTF-8")?;
	parse_combined_json(&stdout)
}

/// Parse solc combined-JSON output into compiled contracts.
pub fn parse_combined_json(raw: &str) -> Result<Vec<CompiledContract>> {
	let output: CombinedOutput =
		serde_json::from_str(raw).context("unexpected solc combined-json output")?;

	output
		.contracts
		.into_iter()
		.map(|(qualified, entry)| {
			Ok(CompiledContract {
				name: strip_source_prefix(&qualified).to_owned(),
				runtime_bytecode: entry.bin_runtime,
				abi: normalize_abi(entry.abi)?,
			})
		})
		.collect()
}

/// Write a `<name>.bin` / `<name>.abi` pair for each contract into `dir`
/// and return the paths written.
pub fn write_artifacts(
	contracts: &[CompiledContract],
	dir: &Path,
) -> Result<Vec<(PathBuf, PathBuf)>> {
	let mut written = Vec::with_capacity(contracts.len());

	for contract in contracts {
		let bin_path = dir.join(format!("{}.bin", contract.name));
		let abi_path = dir.join(format!("{}.abi", contract.name));

		std::fs::write(&bin_path, &contract.runtime_bytecode)
			.with_context(|| format!("cannot write the bin file {}", bin_path.display()))?;
		std::fs::write(&abi_path, serde_json::to_string_pretty(&contract.abi)?)
			.with_context(|| format!("cannot write the abi file {}", abi_path.display()))?;

		written.push((bin_path, abi_path));
	}

	Ok(written)
}

// -- Private helpers --

/// solc qualifies contract names as `<source>:<Name>`; keep only the name.
fn strip_source_prefix(qualified: &str) -> &str {
	match qualified.rsplit_once(':') {
		Some((_, name)) => name,
		None => qualified,
	}
}

/// Older solc versions emit the ABI as a JSON-encoded string rather than
/// an array; accept both.
fn normalize_abi(abi: Value) -> Result<Value> {
	match abi {
		Value::String(s) => serde_json::from_str(&s).context("invalid ABI JSON from solc"),
		other => Ok(other),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	const ONE_CONTRACT: &str = r#"{
		"contracts": {
			"<stdin>:Greeter": {
				"abi": [{"type": "function", "name": "greet", "inputs": [], "outputs": [{"type": "string"}]}],
				"bin-runtime": "6080604052600080fd"
			}
		},
		"version": "0.8.24+commit.e11b9ed9"
	}"#;

	#[test]
	fn parses_a_single_contract() {
		let contracts = parse_combined_json(ONE_CONTRACT).unwrap();
		assert_eq!(contracts.len(), 1);
		assert_eq!(contracts[0].name, "Greeter");
		assert_eq!(contracts[0].runtime_bytecode, "6080604052600080fd");
		assert!(contracts[0].abi.is_array());
	}

	#[test]
	fn accepts_string_encoded_abi() {
		let raw = r#"{
			"contracts": {
				"<stdin>:Greeter": {
					"abi": "[{\"type\":\"function\",\"name\":\"greet\"}]",
					"bin-runtime": "60806040"
				}
			}
		}"#;
		let contracts = parse_combined_json(raw).unwrap();
		assert_eq!(contracts[0].abi, json!([{"type": "function", "name": "greet"}]));
	}

	#[test]
	fn strips_qualified_names() {
		assert_eq!(strip_source_prefix("<stdin>:Greeter"), "Greeter");
		assert_eq!(strip_source_prefix("contracts/Token.sol:Token"), "Token");
		assert_eq!(strip_source_prefix("Unqualified"), "Unqualified");
	}

	#[test]
	fn rejects_non_json_output() {
		assert!(parse_combined_json("not json").is_err());
		assert!(parse_combined_json("{}").is_err());
	}

	#[test]
	fn writes_one_artifact_pair_per_contract() {
		let contracts = parse_combined_json(ONE_CONTRACT).unwrap();
		let dir = tempfile::tempdir().unwrap();

		let written = write_artifacts(&contracts, dir.path()).unwrap();
		assert_eq!(written.len(), 1);

		let (bin_path, abi_path) = &written[0];
		assert_eq!(bin_path.file_name().unwrap(), "Greeter.bin");
		assert_eq!(abi_path.file_name().unwrap(), "Greeter.abi");

		let bin = std::fs::read_to_string(bin_path).unwrap();
		assert_eq!(bin, "6080604052600080fd");

		let abi: Value = serde_json::from_str(&std::fs::read_to_string(abi_path).unwrap()).unwrap();
		assert_eq!(abi[0]["name"], "greet");

		// Exactly one pair, nothing else.
		assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
	}
}
