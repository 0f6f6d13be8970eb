//! # Front-End Release
//!
//! Publishes a deployment to the front end in one step. A [`FrontEndRelease`]
//! is built from the deployment record, then [`FrontEndRelease::publish`]
//! writes `abi.json`, the updated `contract-config.json` and `release.json`,
//! each replaced atomically.

use chrono::{DateTime, Utc};
use nft_contract::Address;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ProjectPaths;
use crate::contract_config::ContractConfig;
use crate::deployment::DeploymentRecord;
use crate::errors::ProjectError;
use crate::files::{read_json_opt, write_json};

/// Current `release.json` layout.
pub const RELEASE_SCHEMA_VERSION: u32 = 1;

/// What the front end is told about the deployed contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontEndRelease {
    /// `release.json` layout version.
    pub schema_version: u32,
    /// Incremented on every publication.
    pub revision: u64,
    /// Contract name.
    pub contract_name: String,
    /// Chain the address is on.
    pub chain_id: u64,
    /// Contract address.
    pub address: Address,
    /// JSON ABI.
    pub abi: serde_json::Value,
    /// Publication time.
    pub published_at: DateTime<Utc>,
}

/// Files touched by a publication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishSummary {
    /// Revision written.
    pub revision: u64,
    /// Was the address new for this chain?
    pub address_added: bool,
}

impl FrontEndRelease {
    /// Release for a recorded deployment. The revision is assigned on publish.
    pub fn from_record(record: &DeploymentRecord) -> Self {
        Self {
            schema_version: RELEASE_SCHEMA_VERSION,
            revision: 0,
            contract_name: record.contract_name.clone(),
            chain_id: record.chain_id,
            address: record.address,
            abi: record.abi.clone(),
            published_at: Utc::now(),
        }
    }

    /// Write the ABI, append the address to the contract config and record the
    /// release.
    pub fn publish(
        mut self,
        paths: &ProjectPaths,
        config: &mut ContractConfig,
    ) -> Result<PublishSummary, ProjectError> {
        info!("[project] Writing to front end {}", paths.front_end_dir.display());

        let previous: Option<FrontEndRelease> = read_json_opt(&paths.release_file)?;
        self.revision = previous.map_or(1, |release| release.revision + 1);

        write_json(&paths.abi_file, &self.abi)?;

        let address_added = config.record_address(self.chain_id, &self.address);
        config.save(&paths.contract_config_file)?;

        write_json(&paths.release_file, &self)?;
        info!(
            "[project] Front end written (revision {}, {} on chain {})",
            self.revision, self.address, self.chain_id
        );

        Ok(PublishSummary {
            revision: self.revision,
            address_added,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployment::tests::outcome;
    use crate::files::read_json;
    use serde_json::json;

    fn config() -> ContractConfig {
        serde_json::from_value(json!({
            "contractName": "MyNftCollection",
            "nftName": "My NFT Collection",
            "nftSymbol": "MNC",
            "maxSupply": 1000,
            "gasToken": "ETH",
            "saleType": {
                "allowlistSale": { "mintPrice": "0.01", "maxMintAmountPerTx": 2 },
                "publicSale": { "mintPrice": "0.02", "maxMintAmountPerTx": 5 }
            },
            "contractAddresses": {}
        }))
        .unwrap()
    }

    fn record() -> DeploymentRecord {
        DeploymentRecord::from_outcome(
            "MyNftCollection",
            "localhost",
            1337,
            &outcome(),
            json!([{"type": "function", "name": "getSaleState"}]),
        )
    }

    #[test]
    fn test_publish_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ProjectPaths::for_testing(dir.path());
        let mut config = config();

        let summary = FrontEndRelease::from_record(&record())
            .publish(&paths, &mut config)
            .unwrap();
        assert_eq!(summary, PublishSummary { revision: 1, address_added: true });

        let abi: serde_json::Value = read_json(&paths.abi_file).unwrap();
        assert_eq!(abi[0]["name"], "getSaleState");

        let written = ContractConfig::load(&paths.contract_config_file).unwrap();
        assert_eq!(
            written.addresses_for(1337),
            ["0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string()]
        );

        let release: FrontEndRelease = read_json(&paths.release_file).unwrap();
        assert_eq!(release.schema_version, RELEASE_SCHEMA_VERSION);
        assert_eq!(release.chain_id, 1337);
    }

    #[test]
    fn test_republish_bumps_revision_without_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ProjectPaths::for_testing(dir.path());
        let mut config = config();

        FrontEndRelease::from_record(&record())
            .publish(&paths, &mut config)
            .unwrap();
        let summary = FrontEndRelease::from_record(&record())
            .publish(&paths, &mut config)
            .unwrap();

        assert_eq!(summary, PublishSummary { revision: 2, address_added: false });
        let written = ContractConfig::load(&paths.contract_config_file).unwrap();
        assert_eq!(written.addresses_for(1337).len(), 1);
    }
}
