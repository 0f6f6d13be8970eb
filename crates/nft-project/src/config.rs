//! # Project Layout
//!
//! Where the tooling finds and writes project files.

use std::path::{Path, PathBuf};

/// Placeholder metadata served for every token before reveal.
pub const HIDDEN_METADATA_URI: &str = "ipfs://QmW6YKq1MjKzTDNNXMQSQaDyms8PSfJS7cDWBkc92NZc84";

/// Front-end checkout the ABI, config and allowlist live in.
pub const DEFAULT_FRONT_END_DIR: &str = "../hardhat-nft-smart-contract-main";

/// Set to `true` to publish to the front end after deploying.
pub const UPDATE_FRONT_END_ENV: &str = "UPDATE_FRONT_END";

/// File locations for one project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Front-end directory.
    pub front_end_dir: PathBuf,
    /// Front-end ABI file.
    pub abi_file: PathBuf,
    /// Front-end `contract-config.json`.
    pub contract_config_file: PathBuf,
    /// Allowlist (JSON array of addresses).
    pub allowlist_file: PathBuf,
    /// Front-end release record.
    pub release_file: PathBuf,
    /// Hardhat `artifacts/` directory.
    pub artifacts_dir: PathBuf,
    /// Per-network deployment records.
    pub deployments_dir: PathBuf,
}

impl Default for ProjectPaths {
    fn default() -> Self {
        Self::new(".", DEFAULT_FRONT_END_DIR)
    }
}

impl ProjectPaths {
    /// Layout for a project rooted at `root` with its front end at
    /// `front_end_dir` (relative paths resolve against `root`).
    pub fn new(root: impl AsRef<Path>, front_end_dir: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let front_end_dir = root.join(front_end_dir);
        Self {
            abi_file: front_end_dir.join("abi.json"),
            contract_config_file: front_end_dir.join("contract-config.json"),
            allowlist_file: front_end_dir.join("allowlist.json"),
            release_file: front_end_dir.join("release.json"),
            front_end_dir,
            artifacts_dir: root.join("artifacts"),
            deployments_dir: root.join("deployments"),
        }
    }

    /// Everything under one directory (front end in `front-end/`).
    pub fn for_testing(root: impl AsRef<Path>) -> Self {
        Self::new(root, "front-end")
    }

    /// Deployment record of `contract` on `network`.
    pub fn deployment_file(&self, network: &str, contract: &str) -> PathBuf {
        self.deployments_dir
            .join(network)
            .join(format!("{contract}.json"))
    }
}

/// Is front-end publication requested through the environment?
pub fn front_end_update_requested() -> bool {
    std::env::var(UPDATE_FRONT_END_ENV)
        .map(|value| value == "true")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = ProjectPaths::default();
        assert_eq!(
            paths.contract_config_file,
            Path::new("./../hardhat-nft-smart-contract-main/contract-config.json")
        );
        assert_eq!(paths.artifacts_dir, Path::new("./artifacts"));
    }

    #[test]
    fn test_deployment_file() {
        let paths = ProjectPaths::for_testing("/work");
        assert_eq!(
            paths.deployment_file("goerli", "MyNftCollection"),
            Path::new("/work/deployments/goerli/MyNftCollection.json")
        );
        assert_eq!(paths.allowlist_file, Path::new("/work/front-end/allowlist.json"));
    }
}
