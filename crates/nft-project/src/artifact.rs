//! # Hardhat Artifacts
//!
//! Compiled contract output read from `artifacts/`:
//!
//! ```text
//! artifacts/
//! ├── contracts/MyNftCollection.sol/
//! │   ├── MyNftCollection.json       # abi, bytecode, sourceName
//! │   └── MyNftCollection.dbg.json   # { "buildInfo": "../../build-info/<id>.json" }
//! └── build-info/<id>.json           # solcLongVersion, standard-JSON input
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use nft_contract::domain::from_hex_data;
use serde::Deserialize;
use tracing::debug;

use crate::errors::ProjectError;
use crate::files::read_json;

/// One compiled contract.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardhatArtifact {
    /// Contract name.
    pub contract_name: String,
    /// Source path, e.g. `contracts/MyNftCollection.sol`.
    pub source_name: String,
    /// JSON ABI.
    pub abi: serde_json::Value,
    /// `0x`-prefixed creation bytecode.
    pub bytecode: String,
    /// Where the artifact was read from.
    #[serde(skip)]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
    build_info: String,
}

/// Compiler run that produced an artifact.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// e.g. `0.8.9+commit.e5eed63a`.
    pub solc_long_version: String,
    /// Standard-JSON compiler input.
    pub input: serde_json::Value,
}

impl BuildInfo {
    /// Version string in the explorer's spelling (`v0.8.9+commit.e5eed63a`).
    pub fn compiler_version(&self) -> String {
        format!("v{}", self.solc_long_version)
    }

    /// Standard-JSON input as submitted to the explorer.
    pub fn standard_json_input(&self) -> String {
        self.input.to_string()
    }
}

impl HardhatArtifact {
    /// Locate and read the artifact for `contract_name`.
    ///
    /// The usual location is `contracts/<Name>.sol/<Name>.json`; otherwise
    /// the whole tree is searched for `<Name>.json`.
    pub fn load(artifacts_dir: &Path, contract_name: &str) -> Result<Self, ProjectError> {
        let file_name = format!("{contract_name}.json");
        let conventional = artifacts_dir
            .join("contracts")
            .join(format!("{contract_name}.sol"))
            .join(&file_name);
        let path = if conventional.is_file() {
            conventional
        } else {
            find_file(artifacts_dir, &file_name)?.ok_or_else(|| ProjectError::MissingArtifact {
                name: contract_name.to_string(),
                path: artifacts_dir.to_path_buf(),
            })?
        };

        debug!("[project] Reading artifact {}", path.display());
        let mut artifact: Self = read_json(&path)?;
        artifact.path = path;
        Ok(artifact)
    }

    /// Decoded creation bytecode.
    pub fn creation_code(&self) -> Result<Vec<u8>, ProjectError> {
        Ok(from_hex_data(&self.bytecode)?)
    }

    /// `sourceName:contractName`, as explorers expect it.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Build info referenced by the sibling `.dbg.json` file.
    pub fn build_info(&self) -> Result<BuildInfo, ProjectError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let dbg_path = dir.join(format!("{}.dbg.json", self.contract_name));
        let dbg: DebugFile = read_json(&dbg_path)?;
        read_json(&dir.join(dbg.build_info))
    }
}

fn find_file(dir: &Path, file_name: &str) -> Result<Option<PathBuf>, ProjectError> {
    if !dir.is_dir() {
        return Ok(None);
    }
    let entries = fs::read_dir(dir).map_err(|e| ProjectError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| ProjectError::io(dir, e))?.path();
        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == "build-info") {
                continue;
            }
            if let Some(found) = find_file(&path, file_name)? {
                return Ok(Some(found));
            }
        } else if path.file_name().is_some_and(|name| name == file_name) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}
