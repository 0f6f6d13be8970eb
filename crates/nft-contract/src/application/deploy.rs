//! # Collection Deployment
//!
//! Sends the creation transaction for a compiled collection and waits for it
//! to be confirmed. A previous deployment of the same bytecode and
//! constructor arguments is reused when its code is still on-chain.

use std::sync::Arc;

use nft_allowlist::keccak256;
use tracing::info;

use super::confirmations::wait_for_confirmations;
use crate::abi::methods;
use crate::config::ContractClientConfig;
use crate::domain::{
    to_hex_hash, Address, CollectionSettings, ContractError, Hash, TransactionRequest, TxHash,
};
use crate::ports::ChainClient;

/// What is known about an earlier deployment on the same network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviousDeployment {
    /// Contract address.
    pub address: Address,
    /// Creation transaction.
    pub tx_hash: TxHash,
    /// Inclusion block.
    pub block_number: u64,
    /// `keccak256(bytecode ‖ constructor args)` at the time.
    pub bytecode_hash: Hash,
}

/// Result of [`Deployer::deploy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentOutcome {
    /// Contract address.
    pub address: Address,
    /// Creation transaction.
    pub tx_hash: TxHash,
    /// Inclusion block.
    pub block_number: u64,
    /// `keccak256(bytecode ‖ constructor args)`.
    pub bytecode_hash: Hash,
    /// ABI-encoded constructor arguments.
    pub constructor_args: Vec<u8>,
    /// Settings the contract was constructed with.
    pub settings: CollectionSettings,
    /// `true` when an existing deployment was kept.
    pub reused: bool,
}

/// Hash identifying a deployment's creation code.
pub fn deployment_hash(bytecode: &[u8], constructor_args: &[u8]) -> Hash {
    let mut init_code = Vec::with_capacity(bytecode.len() + constructor_args.len());
    init_code.extend_from_slice(bytecode);
    init_code.extend_from_slice(constructor_args);
    keccak256(&init_code)
}

/// Collection deployer.
pub struct Deployer<C: ChainClient> {
    chain: Arc<C>,
    config: ContractClientConfig,
}

impl<C: ChainClient> Deployer<C> {
    /// Create a deployer.
    pub fn new(chain: Arc<C>, config: ContractClientConfig) -> Self {
        Self { chain, config }
    }

    /// Deploy `bytecode` constructed with `settings`, or reuse `previous`.
    pub async fn deploy(
        &self,
        bytecode: &[u8],
        settings: &CollectionSettings,
        previous: Option<&PreviousDeployment>,
    ) -> Result<DeploymentOutcome, ContractError> {
        if bytecode.is_empty() {
            return Err(ContractError::InvalidValue(
                "artifact has no creation bytecode".to_string(),
            ));
        }

        let constructor_args = methods::constructor_args(settings);
        let bytecode_hash = deployment_hash(bytecode, &constructor_args);

        if let Some(previous) = previous {
            if previous.bytecode_hash == bytecode_hash
                && !self.chain.code_at(&previous.address).await?.is_empty()
            {
                info!(
                    "[contract] Reusing deployment at {} (unchanged bytecode)",
                    previous.address
                );
                return Ok(DeploymentOutcome {
                    address: previous.address,
                    tx_hash: previous.tx_hash,
                    block_number: previous.block_number,
                    bytecode_hash,
                    constructor_args,
                    settings: settings.clone(),
                    reused: true,
                });
            }
        }

        info!(
            "[contract] Deploying {} ({}) from {}",
            settings.name,
            settings.symbol,
            self.chain.sender()
        );
        let mut init_code = bytecode.to_vec();
        init_code.extend_from_slice(&constructor_args);
        let tx_hash = self
            .chain
            .send_transaction(&TransactionRequest::create(init_code))
            .await?;
        info!(
            "[contract] Waiting for {} confirmation(s) of {}",
            self.config.confirmations.max(1),
            to_hex_hash(&tx_hash)
        );
        let receipt = wait_for_confirmations(self.chain.as_ref(), &tx_hash, &self.config).await?;
        let address = receipt.contract_address.ok_or_else(|| {
            ContractError::InvalidResponse(format!(
                "receipt of {} has no contract address",
                to_hex_hash(&tx_hash)
            ))
        })?;
        info!(
            "[contract] Deployed at {} in block {}",
            address, receipt.block_number
        );

        Ok(DeploymentOutcome {
            address,
            tx_hash,
            block_number: receipt.block_number,
            bytecode_hash,
            constructor_args,
            settings: settings.clone(),
            reused: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ChainClient, MockChain};
    use primitive_types::U256;

    const BYTECODE: [u8; 6] = [0x60, 0x80, 0x60, 0x40, 0x52, 0x00];

    fn settings() -> CollectionSettings {
        CollectionSettings {
            name: "My NFT Collection".into(),
            symbol: "MNC".into(),
            hidden_metadata_uri: "ipfs://hidden.json".into(),
            max_supply: U256::from(1000u64),
            mint_price: U256::from(10u64).pow(U256::from(16u64)),
            max_mint_amount_per_tx: U256::from(5u64),
        }
    }

    fn deployer() -> (Arc<MockChain>, Deployer<MockChain>) {
        let chain = Arc::new(MockChain::default().with_auto_mine(true));
        chain.register_creation_code(BYTECODE.to_vec());
        let deployer = Deployer::new(Arc::clone(&chain), ContractClientConfig::for_testing());
        (chain, deployer)
    }

    #[tokio::test]
    async fn test_deploy_creates_collection() {
        let (chain, deployer) = deployer();
        let outcome = deployer.deploy(&BYTECODE, &settings(), None).await.unwrap();

        assert!(!outcome.reused);
        assert_eq!(
            outcome.address.to_checksum(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        let collection = chain.collection(&outcome.address).unwrap();
        assert_eq!(collection.name, "My NFT Collection");
        assert_eq!(collection.max_mint_amount_per_tx, U256::from(5u64));
        assert_eq!(chain.sent_methods(), vec!["constructor"]);
    }

    #[tokio::test]
    async fn test_redeploy_same_code_is_reused() {
        let (chain, deployer) = deployer();
        let first = deployer.deploy(&BYTECODE, &settings(), None).await.unwrap();
        let previous = PreviousDeployment {
            address: first.address,
            tx_hash: first.tx_hash,
            block_number: first.block_number,
            bytecode_hash: first.bytecode_hash,
        };

        let second = deployer
            .deploy(&BYTECODE, &settings(), Some(&previous))
            .await
            .unwrap();
        assert!(second.reused);
        assert_eq!(second.address, first.address);
        assert_eq!(chain.sent_methods().len(), 1);
    }

    #[tokio::test]
    async fn test_changed_settings_redeploy() {
        let (_, deployer) = deployer();
        let first = deployer.deploy(&BYTECODE, &settings(), None).await.unwrap();
        let previous = PreviousDeployment {
            address: first.address,
            tx_hash: first.tx_hash,
            block_number: first.block_number,
            bytecode_hash: first.bytecode_hash,
        };

        let mut changed = settings();
        changed.max_supply = U256::from(2000u64);
        let second = deployer
            .deploy(&BYTECODE, &changed, Some(&previous))
            .await
            .unwrap();
        assert!(!second.reused);
        assert_ne!(second.address, first.address);
    }

    #[tokio::test]
    async fn test_empty_bytecode_rejected() {
        let (_, deployer) = deployer();
        assert!(matches!(
            deployer.deploy(&[], &settings(), None).await,
            Err(ContractError::InvalidValue(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_creation_code_fails() {
        let (chain, deployer) = deployer();
        let err = deployer.deploy(&[0xfe], &settings(), None).await.unwrap_err();
        assert!(matches!(err, ContractError::Rpc { .. }));
        assert!(chain.block_number().await.is_ok());
    }
}
