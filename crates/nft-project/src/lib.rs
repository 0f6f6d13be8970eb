//! # NFT Project Files
//!
//! Everything the tooling reads from or writes to disk: the front end's
//! contract config and allowlist, network settings from the environment,
//! compiled hardhat artifacts, per-network deployment records, and the
//! front-end release.
//!
//! ## Module Structure
//!
//! ```text
//! nft-project/
//! ├── config.rs            # ProjectPaths, HIDDEN_METADATA_URI
//! ├── contract_config.rs   # contract-config.json
//! ├── allowlist_file.rs    # allowlist.json, proofs export
//! ├── network.rs           # Network table + environment
//! ├── artifact.rs          # Hardhat artifacts and build info
//! ├── deployment.rs        # deployments/<network>/<Contract>.json
//! ├── frontend.rs          # FrontEndRelease publication
//! ├── files.rs             # JSON read / atomic write
//! └── errors.rs            # ProjectError
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod allowlist_file;
pub mod artifact;
pub mod config;
pub mod contract_config;
pub mod deployment;
pub mod errors;
pub mod files;
pub mod frontend;
pub mod network;

// Re-exports
pub use allowlist_file::{load_allowlist, load_entries, write_proofs};
pub use artifact::{BuildInfo, HardhatArtifact};
pub use config::{
    front_end_update_requested, ProjectPaths, DEFAULT_FRONT_END_DIR, HIDDEN_METADATA_URI,
    UPDATE_FRONT_END_ENV,
};
pub use contract_config::{ContractConfig, SaleTypeConfig, SaleTypes};
pub use deployment::DeploymentRecord;
pub use errors::ProjectError;
pub use frontend::{FrontEndRelease, PublishSummary, RELEASE_SCHEMA_VERSION};
pub use network::{
    is_development, network_names, ExplorerConfig, NetworkConfig, DEFAULT_NETWORK,
    DEVELOPMENT_CHAINS,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
