//! Compiled contract artifacts and compiler build information.
//!
//! Both Hardhat (`artifacts/contracts/<Name>.sol/<Name>.json`, bytecode as a
//! hex string) and Foundry (`out/<Name>.sol/<Name>.json`, bytecode under
//! `bytecode.object`) layouts are understood.

use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::JsonAbi;
use alloy_primitives::{hex, Bytes};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Directory nesting searched below the artifacts root.
const MAX_SEARCH_DEPTH: usize = 8;

#[derive(Debug, Error)]
pub enum ArtifactError {
	#[error("Contract artifact '{contract}' not found in {root}")]
	NotFound { contract: String, root: String },
	#[error("Failed to read {path}: {reason}")]
	Io { path: String, reason: String },
	#[error("Invalid artifact {path}: {reason}")]
	Invalid { path: String, reason: String },
	#[error("Contract '{0}' has unlinked library references")]
	Unlinked(String),
	#[error("Constructor argument mismatch: {0}")]
	Encoding(String),
	#[error("Artifact for '{0}' does not record its source file")]
	MissingSourceName(String),
	#[error("No build info for {source_name} in {dir}")]
	BuildInfoNotFound { source_name: String, dir: String },
}

/// A compiled contract: its ABI and creation bytecode.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
	pub contract_name: String,
	/// Source path as given to the compiler, e.g. `contracts/TokenLauncher.sol`.
	pub source_name: Option<String>,
	/// Hardhat 3 build-info file id.
	pub build_info_id: Option<String>,
	pub abi: JsonAbi,
	pub bytecode: Bytes,
}

impl ContractArtifact {
	/// Parses an artifact JSON document.
	pub fn from_json(contract_name: &str, json: &Value, path: &Path) -> Result<Self, ArtifactError> {
		let invalid = |reason: String| ArtifactError::Invalid {
			path: path.display().to_string(),
			reason,
		};

		let abi = match json.get("abi") {
			Some(abi) => serde_json::from_value::<JsonAbi>(abi.clone())
				.map_err(|e| invalid(format!("bad abi: {e}")))?,
			None => return Err(invalid("missing abi".to_string())),
		};

		// Hardhat stores a hex string, Foundry an object with the hex under `object`
		let bytecode = json
			.get("bytecode")
			.and_then(|b| b.as_str().or_else(|| b.get("object").and_then(|o| o.as_str())))
			.ok_or_else(|| invalid("no bytecode found".to_string()))?;

		let hex_str = bytecode.strip_prefix("0x").unwrap_or(bytecode);
		if hex_str.contains("__") {
			return Err(ArtifactError::Unlinked(contract_name.to_string()));
		}
		if hex_str.is_empty() {
			return Err(invalid("empty bytecode (abstract contract or interface?)".to_string()));
		}
		let bytecode = hex::decode(hex_str)
			.map(Bytes::from)
			.map_err(|e| invalid(format!("invalid bytecode hex: {e}")))?;

		let source_name = json
			.get("inputSourceName")
			.or_else(|| json.get("sourceName"))
			.and_then(|s| s.as_str())
			.map(str::to_string)
			.or_else(|| foundry_compilation_target(json));

		let build_info_id = json
			.get("buildInfoId")
			.and_then(|s| s.as_str())
			.map(str::to_string);

		Ok(Self {
			contract_name: contract_name.to_string(),
			source_name,
			build_info_id,
			abi,
			bytecode,
		})
	}

	/// ABI-encodes constructor arguments, checked against the constructor
	/// signature.
	pub fn encode_constructor_args(&self, args: &[DynSolValue]) -> Result<Bytes, ArtifactError> {
		match &self.abi.constructor {
			Some(constructor) => constructor
				.abi_encode_input(args)
				.map(Bytes::from)
				.map_err(|e| ArtifactError::Encoding(e.to_string())),
			None if args.is_empty() => Ok(Bytes::new()),
			None => Err(ArtifactError::Encoding(format!(
				"{} has no constructor but {} arguments were given",
				self.contract_name,
				args.len()
			))),
		}
	}

	/// Creation payload: bytecode followed by the encoded constructor arguments.
	pub fn deploy_data(&self, args: &[DynSolValue]) -> Result<Bytes, ArtifactError> {
		let encoded = self.encode_constructor_args(args)?;
		let mut data = self.bytecode.to_vec();
		data.extend_from_slice(&encoded);
		Ok(Bytes::from(data))
	}
}

fn foundry_compilation_target(json: &Value) -> Option<String> {
	json.get("metadata")?
		.get("settings")?
		.get("compilationTarget")?
		.as_object()?
		.keys()
		.next()
		.cloned()
}

/// Compiler input and version needed to verify a contract's source.
#[derive(Debug, Clone)]
pub struct VerificationSource {
	/// `<source path>:<contract name>`.
	pub contract_identifier: String,
	/// Long compiler version prefixed with `v`, e.g. `v0.8.28+commit.7893614a`.
	pub compiler_version: String,
	/// Solidity standard JSON input.
	pub standard_json_input: Value,
}

/// Looks up artifacts and build info below a compiler output directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
	root: PathBuf,
	build_info_dir: PathBuf,
}

impl ArtifactStore {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		let root = root.into();
		let build_info_dir = root.join("build-info");
		Self {
			root,
			build_info_dir,
		}
	}

	pub fn with_build_info_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.build_info_dir = dir.into();
		self
	}

	/// Loads the artifact for `contract_name`.
	///
	/// # Arguments
	/// * `contract_name` - Contract name, also the artifact file stem
	pub async fn load(&self, contract_name: &str) -> Result<ContractArtifact, ArtifactError> {
		let path = self.find(contract_name).await?;
		let json = read_json(&path).await?;
		debug!(contract = contract_name, path = %path.display(), "Loaded contract artifact");
		ContractArtifact::from_json(contract_name, &json, &path)
	}

	async fn find(&self, contract_name: &str) -> Result<PathBuf, ArtifactError> {
		let sol_dir = format!("{contract_name}.sol");
		let file = format!("{contract_name}.json");

		let possible_paths = [
			self.root.join("contracts").join(&sol_dir).join(&file),
			self.root.join(&sol_dir).join(&file),
		];
		for path in possible_paths {
			if is_file(&path).await {
				return Ok(path);
			}
		}

		// The recursive walk stays off the async workers
		let root = self.root.clone();
		let found = tokio::task::spawn_blocking(move || search(&root, &sol_dir, &file, 0))
			.await
			.map_err(|e| ArtifactError::Io {
				path: self.root.display().to_string(),
				reason: e.to_string(),
			})?;

		found.ok_or_else(|| ArtifactError::NotFound {
			contract: contract_name.to_string(),
			root: self.root.display().to_string(),
		})
	}

	/// Finds the build info that compiled `artifact` and extracts what an
	/// explorer needs to verify it.
	pub async fn verification_source(
		&self,
		artifact: &ContractArtifact,
	) -> Result<VerificationSource, ArtifactError> {
		let source_name = artifact
			.source_name
			.as_deref()
			.ok_or_else(|| ArtifactError::MissingSourceName(artifact.contract_name.clone()))?;

		let candidates = match &artifact.build_info_id {
			Some(id) => vec![self.build_info_dir.join(format!("{id}.json"))],
			None => self.build_info_files().await?,
		};

		for path in candidates {
			if !is_file(&path).await {
				continue;
			}
			let build_info = read_json(&path).await?;
			let Some(input) = build_info.get("input") else {
				continue;
			};
			let compiles_source = input
				.get("sources")
				.and_then(|s| s.as_object())
				.is_some_and(|sources| sources.contains_key(source_name));
			if !compiles_source {
				continue;
			}

			let version = build_info
				.get("solcLongVersion")
				.or_else(|| build_info.get("solcVersion"))
				.and_then(|v| v.as_str())
				.ok_or_else(|| ArtifactError::Invalid {
					path: path.display().to_string(),
					reason: "missing compiler version".to_string(),
				})?;

			debug!(source = source_name, path = %path.display(), "Found build info");
			return Ok(VerificationSource {
				contract_identifier: format!("{source_name}:{}", artifact.contract_name),
				compiler_version: format!("v{}", version.trim_start_matches('v')),
				standard_json_input: input.clone(),
			});
		}

		Err(ArtifactError::BuildInfoNotFound {
			source_name: source_name.to_string(),
			dir: self.build_info_dir.display().to_string(),
		})
	}

	async fn build_info_files(&self) -> Result<Vec<PathBuf>, ArtifactError> {
		let io_error = |e: std::io::Error| ArtifactError::Io {
			path: self.build_info_dir.display().to_string(),
			reason: e.to_string(),
		};
		let mut entries = tokio::fs::read_dir(&self.build_info_dir)
			.await
			.map_err(io_error)?;

		let mut files = Vec::new();
		while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
			let path = entry.path();
			let is_build_info = path
				.file_name()
				.and_then(|n| n.to_str())
				.is_some_and(|n| n.ends_with(".json") && !n.ends_with(".output.json"));
			if is_build_info {
				files.push(path);
			}
		}
		files.sort();
		Ok(files)
	}
}

async fn is_file(path: &Path) -> bool {
	tokio::fs::metadata(path)
		.await
		.is_ok_and(|meta| meta.is_file())
}

fn search(dir: &Path, sol_dir: &str, file: &str, depth: usize) -> Option<PathBuf> {
	if depth > MAX_SEARCH_DEPTH {
		return None;
	}
	let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
		.ok()?
		.filter_map(|entry| entry.ok().map(|e| e.path()))
		.filter(|path| path.is_dir())
		.collect();
	entries.sort();

	for path in entries {
		let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
		if name == "build-info" {
			continue;
		}
		if name == sol_dir {
			let candidate = path.join(file);
			if candidate.is_file() {
				return Some(candidate);
			}
		}
		if let Some(found) = search(&path, sol_dir, file, depth + 1) {
			return Some(found);
		}
	}
	None
}

async fn read_json(path: &Path) -> Result<Value, ArtifactError> {
	let content = tokio::fs::read_to_string(path)
		.await
		.map_err(|e| ArtifactError::Io {
			path: path.display().to_string(),
			reason: e.to_string(),
		})?;
	serde_json::from_str(&content).map_err(|e| ArtifactError::Invalid {
		path: path.display().to_string(),
		reason: e.to_string(),
	})
}
