//! # Deployment Records
//!
//! `deployments/<network>/<Contract>.json`: where a contract was deployed,
//! with what, and the ABI to talk to it.

use chrono::{DateTime, Utc};
use nft_contract::domain::{from_hex_hash, to_hex_data, to_hex_hash};
use nft_contract::{Address, DeploymentOutcome, PreviousDeployment};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ProjectPaths;
use crate::errors::ProjectError;
use crate::files::{read_json_opt, write_json};

/// Persisted deployment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// Contract name.
    pub contract_name: String,
    /// Network name.
    pub network: String,
    /// Chain id.
    pub chain_id: u64,
    /// Contract address.
    pub address: Address,
    /// Creation transaction hash.
    pub transaction_hash: String,
    /// Inclusion block.
    pub block_number: u64,
    /// Constructor arguments, human-readable (wei amounts in decimal).
    pub args: Vec<String>,
    /// ABI-encoded constructor arguments, hex.
    pub constructor_args: String,
    /// `keccak256(bytecode ‖ constructor args)`, hex.
    pub bytecode_hash: String,
    /// JSON ABI.
    pub abi: serde_json::Value,
    /// When the record was written.
    pub deployed_at: DateTime<Utc>,
}

impl DeploymentRecord {
    /// Record for a fresh or reused deployment.
    pub fn from_outcome(
        contract_name: &str,
        network: &str,
        chain_id: u64,
        outcome: &DeploymentOutcome,
        abi: serde_json::Value,
    ) -> Self {
        let settings = &outcome.settings;
        Self {
            contract_name: contract_name.to_string(),
            network: network.to_string(),
            chain_id,
            address: outcome.address,
            transaction_hash: to_hex_hash(&outcome.tx_hash),
            block_number: outcome.block_number,
            args: vec![
                settings.name.clone(),
                settings.symbol.clone(),
                settings.hidden_metadata_uri.clone(),
                settings.max_supply.to_string(),
                settings.mint_price.to_string(),
                settings.max_mint_amount_per_tx.to_string(),
            ],
            constructor_args: to_hex_data(&outcome.constructor_args),
            bytecode_hash: to_hex_hash(&outcome.bytecode_hash),
            abi,
            deployed_at: Utc::now(),
        }
    }

    /// Record of `contract` on `network`, if any.
    pub fn load(
        paths: &ProjectPaths,
        network: &str,
        contract: &str,
    ) -> Result<Option<Self>, ProjectError> {
        read_json_opt(&paths.deployment_file(network, contract))
    }

    /// Like [`DeploymentRecord::load`], failing when nothing is recorded.
    pub fn require(
        paths: &ProjectPaths,
        network: &str,
        contract: &str,
    ) -> Result<Self, ProjectError> {
        Self::load(paths, network, contract)?.ok_or_else(|| ProjectError::NotDeployed {
            contract: contract.to_string(),
            network: network.to_string(),
        })
    }

    /// Write to its conventional location.
    pub fn save(&self, paths: &ProjectPaths) -> Result<(), ProjectError> {
        let path = paths.deployment_file(&self.network, &self.contract_name);
        write_json(&path, self)?;
        info!("[project] Saved deployment record {}", path.display());
        Ok(())
    }

    /// What the deployer needs to decide on reuse.
    pub fn previous(&self) -> Result<PreviousDeployment, ProjectError> {
        Ok(PreviousDeployment {
            address: self.address,
            tx_hash: from_hex_hash(&self.transaction_hash)?,
            block_number: self.block_number,
            bytecode_hash: from_hex_hash(&self.bytecode_hash)?,
        })
    }

    /// Decoded constructor arguments.
    pub fn constructor_args_bytes(&self) -> Result<Vec<u8>, ProjectError> {
        Ok(nft_contract::domain::from_hex_data(&self.constructor_args)?)
    }
}
