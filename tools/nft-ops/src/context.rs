//! Shared state for every command: project files, network, chain access.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use nft_contract::{
    Address, ChainClient, CollectionService, ContractClientConfig, JsonRpcChainClient,
    LocalSigner, TransactionSigner,
};
use nft_project::{ContractConfig, DeploymentRecord, NetworkConfig, ProjectPaths};
use tracing::info;

use crate::cli::Cli;

/// Resolved project, network and contract configuration.
pub struct OpsContext {
    /// File locations.
    pub paths: ProjectPaths,
    /// Target network.
    pub network: NetworkConfig,
    /// Front-end contract config.
    pub contract: ContractConfig,
    /// Polling and confirmation settings.
    pub client_config: ContractClientConfig,
}

impl OpsContext {
    /// Read configuration for `cli`.
    pub fn load(cli: &Cli) -> Result<Self> {
        let paths = ProjectPaths::new(&cli.root, &cli.front_end);
        let network = NetworkConfig::from_env(&cli.network)?;
        let contract = ContractConfig::load(&paths.contract_config_file)
            .with_context(|| "loading the front end's contract config")?;
        let client_config = ContractClientConfig::for_network(network.is_development());
        Ok(Self {
            paths,
            network,
            contract,
            client_config,
        })
    }

    /// Connect to the network's node.
    pub async fn connect(&self) -> Result<Arc<JsonRpcChainClient>> {
        let client = match &self.network.private_key {
            Some(key) => {
                let signer = LocalSigner::from_hex(key).context("reading the signer key")?;
                JsonRpcChainClient::new(
                    &self.network.rpc_url,
                    TransactionSigner::Local(signer),
                    self.client_config.clone(),
                )?
            }
            None => {
                JsonRpcChainClient::with_node_account(&self.network.rpc_url, self.client_config.clone())
                    .await
                    .with_context(|| format!("connecting to {}", self.network.rpc_url))?
            }
        };

        let chain_id = client.chain_id().await?;
        if chain_id != self.network.chain_id {
            return Err(anyhow!(
                "{} reports chain id {chain_id}, expected {} for {}",
                self.network.rpc_url,
                self.network.chain_id,
                self.network.name
            ));
        }
        info!(
            "Connected to {} (chain {}) as {}",
            self.network.name,
            chain_id,
            client.sender()
        );
        Ok(Arc::new(client))
    }

    /// Deployed collection address: the deployment record, else the last
    /// address the contract config lists for this chain.
    pub fn collection_address(&self) -> Result<Address> {
        let contract = &self.contract.contract_name;
        if let Some(record) = DeploymentRecord::load(&self.paths, &self.network.name, contract)? {
            return Ok(record.address);
        }
        self.contract
            .latest_address(self.network.chain_id)?
            .ok_or_else(|| {
                anyhow!(
                    "{contract} has not been deployed to {}; run `nft-ops deploy` first",
                    self.network.name
                )
            })
    }

    /// Service bound to the deployed collection.
    pub async fn collection(&self) -> Result<CollectionService<JsonRpcChainClient>> {
        let chain = self.connect().await?;
        let address = self.collection_address()?;
        let service = CollectionService::new(chain, address, self.client_config.clone());
        service.ensure_deployed().await?;
        Ok(service)
    }
}
