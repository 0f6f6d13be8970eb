//! # Collection Service
//!
//! Application service running the sale-phase operations against one
//! deployed collection.
//!
//! Every operation reads the current on-chain values first and sends only the
//! setters whose value differs, each waited on until confirmed.

use std::sync::Arc;

use async_trait::async_trait;
use nft_allowlist::{MembershipProof, MerkleRoot};
use primitive_types::U256;
use tracing::{info, warn};

use super::confirmations::wait_for_confirmations;
use crate::abi::{self, methods};
use crate::config::ContractClientConfig;
use crate::domain::{
    format_ether, plan_transition, Address, CallRequest, CollectionSnapshot, ContractError,
    Hash, MintGuard, MintKind, MintRequest, PhaseReport, SaleState, SaleTerms,
    TransactionReceipt, TransactionRequest, Wei,
};
use crate::ports::{ChainClient, CollectionApi};

/// Base URI left in project templates before the real CID is known.
pub const PLACEHOLDER_BASE_URI: &str = "ipfs://__CID___/";

/// Collection Service - owner and minter operations on one contract.
pub struct CollectionService<C: ChainClient> {
    /// Chain access.
    chain: Arc<C>,
    /// Collection address.
    address: Address,
    /// Polling and confirmation settings.
    config: ContractClientConfig,
}

impl<C: ChainClient> CollectionService<C> {
    /// Bind to a deployed collection.
    pub fn new(chain: Arc<C>, address: Address, config: ContractClientConfig) -> Self {
        Self {
            chain,
            address,
            config,
        }
    }

    /// Collection address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Fail with [`ContractError::NoCode`] unless contract code exists at the address.
    pub async fn ensure_deployed(&self) -> Result<(), ContractError> {
        if self.chain.code_at(&self.address).await?.is_empty() {
            return Err(ContractError::NoCode(self.address.to_checksum()));
        }
        Ok(())
    }

    /// Current `owner()`.
    pub async fn owner(&self) -> Result<Address, ContractError> {
        abi::decode_address(&self.read(methods::OWNER).await?, 0)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    async fn read(&self, signature: &str) -> Result<Vec<u8>, ContractError> {
        self.chain
            .call(&CallRequest::new(self.address, methods::call(signature)))
            .await
    }

    async fn read_uint(&self, signature: &str) -> Result<U256, ContractError> {
        abi::decode_uint(&self.read(signature).await?, 0)
    }

    async fn read_string(&self, signature: &str) -> Result<String, ContractError> {
        abi::decode_string(&self.read(signature).await?, 0)
    }

    async fn read_bool(&self, signature: &str) -> Result<bool, ContractError> {
        abi::decode_bool(&self.read(signature).await?, 0)
    }

    async fn read_bytes32(&self, signature: &str) -> Result<Hash, ContractError> {
        abi::decode_bytes32(&self.read(signature).await?, 0)
    }

    async fn sale_state(&self) -> Result<SaleState, ContractError> {
        SaleState::from_code(self.read_uint(methods::GET_SALE_STATE).await?)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    async fn transact(
        &self,
        method: &str,
        data: Vec<u8>,
        report: &mut PhaseReport,
    ) -> Result<TransactionReceipt, ContractError> {
        info!("[contract] Sending {} to {}", method, self.address);
        let tx_hash = self
            .chain
            .send_transaction(&TransactionRequest::call(self.address, data))
            .await?;
        let receipt = wait_for_confirmations(self.chain.as_ref(), &tx_hash, &self.config).await?;
        info!(
            "[contract] {} confirmed in block {}",
            method, receipt.block_number
        );
        report.sent(method, &receipt);
        Ok(receipt)
    }

    async fn set_if_changed<T: PartialEq + Send + Sync>(
        &self,
        current: T,
        target: T,
        method: &str,
        data: Vec<u8>,
        report: &mut PhaseReport,
    ) -> Result<(), ContractError> {
        if current == target {
            info!("[contract] {} already up to date", method);
            report.unchanged(method);
            return Ok(());
        }
        self.transact(method, data, report).await.map(|_| ())
    }

    async fn move_to(&self, target: SaleState, report: &mut PhaseReport) -> Result<(), ContractError> {
        let current = self.sale_state().await?;
        match plan_transition(current, target) {
            Some(setter) => {
                self.transact(setter, methods::call(setter), report).await?;
                info!("[contract] Sale state {} → {}", current, target);
            }
            None => {
                info!("[contract] Sale state already {}", target);
                report.unchanged(target.setter());
            }
        }
        Ok(())
    }

    async fn apply_terms(
        &self,
        snapshot: &CollectionSnapshot,
        terms: &SaleTerms,
        report: &mut PhaseReport,
    ) -> Result<(), ContractError> {
        self.set_if_changed(
            snapshot.mint_price,
            terms.mint_price,
            methods::SET_MINT_PRICE,
            methods::set_mint_price(terms.mint_price),
            report,
        )
        .await?;
        self.set_if_changed(
            snapshot.max_mint_amount_per_tx,
            terms.max_mint_amount_per_tx,
            methods::SET_MAX_MINT_AMOUNT_PER_TX,
            methods::set_max_mint_amount_per_tx(terms.max_mint_amount_per_tx),
            report,
        )
        .await
    }

    async fn simulate(
        &self,
        minter: Address,
        value: Wei,
        data: Vec<u8>,
    ) -> Result<(), ContractError> {
        let call = CallRequest::new(self.address, data)
            .sender(minter)
            .with_value(value);
        self.chain.call(&call).await.map(|_| ())
    }

    fn check_guards(
        &self,
        snapshot: &CollectionSnapshot,
        request: &MintRequest,
    ) -> Result<Wei, ContractError> {
        MintGuard::new(snapshot).check(request).map_err(|rejection| {
            warn!(
                "[contract] Mint of {} by {} rejected: {}",
                request.amount, request.minter, rejection
            );
            ContractError::MintRejected(rejection)
        })
    }
}

#[async_trait]
impl<C: ChainClient> CollectionApi for CollectionService<C> {
    async fn snapshot(&self) -> Result<CollectionSnapshot, ContractError> {
        Ok(CollectionSnapshot {
            sale_state: self.sale_state().await?,
            merkle_root: MerkleRoot::new(self.read_bytes32(methods::GET_MERKLE_ROOT).await?),
            mint_price: self.read_uint(methods::GET_MINT_PRICE).await?,
            max_mint_amount_per_tx: self.read_uint(methods::GET_MAX_MINT_AMOUNT_PER_TX).await?,
            max_supply: self.read_uint(methods::GET_MAX_SUPPLY).await?,
            total_supply: self.read_uint(methods::TOTAL_SUPPLY).await?,
            base_uri: self.read_string(methods::GET_BASE_URI).await?,
            hidden_metadata_uri: self.read_string(methods::GET_HIDDEN_METADATA_URI).await?,
            revealed: self.read_bool(methods::GET_REVEALED).await?,
        })
    }

    async fn close_sales(&self) -> Result<PhaseReport, ContractError> {
        let mut report = PhaseReport::new();
        self.move_to(SaleState::Closed, &mut report).await?;
        Ok(report)
    }

    async fn open_allowlist_sale(
        &self,
        root: &MerkleRoot,
        terms: &SaleTerms,
    ) -> Result<PhaseReport, ContractError> {
        info!(
            "[contract] Opening allowlist sale: root {}, price {} ETH, max {} per tx",
            root,
            format_ether(terms.mint_price),
            terms.max_mint_amount_per_tx
        );
        let snapshot = self.snapshot().await?;
        let mut report = PhaseReport::new();
        self.set_if_changed(
            snapshot.merkle_root,
            *root,
            methods::SET_MERKLE_ROOT,
            methods::set_merkle_root(root),
            &mut report,
        )
        .await?;
        self.apply_terms(&snapshot, terms, &mut report).await?;
        self.move_to(SaleState::Allowlist, &mut report).await?;
        Ok(report)
    }

    async fn open_public_sale(&self, terms: &SaleTerms) -> Result<PhaseReport, ContractError> {
        info!(
            "[contract] Opening public sale: price {} ETH, max {} per tx",
            format_ether(terms.mint_price),
            terms.max_mint_amount_per_tx
        );
        let snapshot = self.snapshot().await?;
        let mut report = PhaseReport::new();
        self.apply_terms(&snapshot, terms, &mut report).await?;
        self.move_to(SaleState::Public, &mut report).await?;
        Ok(report)
    }

    async fn reveal(&self, base_uri: &str) -> Result<PhaseReport, ContractError> {
        let base_uri = base_uri.trim();
        if base_uri.is_empty() || base_uri == PLACEHOLDER_BASE_URI {
            return Err(ContractError::InvalidValue(format!(
                "metadata base URI {base_uri:?} is not set"
            )));
        }

        let mut report = PhaseReport::new();
        let current_uri = self.read_string(methods::GET_BASE_URI).await?;
        self.set_if_changed(
            current_uri.as_str(),
            base_uri,
            methods::SET_BASE_URI,
            methods::set_base_uri(base_uri),
            &mut report,
        )
        .await?;
        let revealed = self.read_bool(methods::GET_REVEALED).await?;
        self.set_if_changed(
            revealed,
            true,
            methods::SET_REVEALED,
            methods::set_revealed(true),
            &mut report,
        )
        .await?;
        Ok(report)
    }

    async fn update_merkle_root(&self, root: &MerkleRoot) -> Result<PhaseReport, ContractError> {
        let current = MerkleRoot::new(self.read_bytes32(methods::GET_MERKLE_ROOT).await?);
        let mut report = PhaseReport::new();
        self.set_if_changed(
            current,
            *root,
            methods::SET_MERKLE_ROOT,
            methods::set_merkle_root(root),
            &mut report,
        )
        .await?;
        Ok(report)
    }

    async fn preflight_allowlist_mint(
        &self,
        minter: Address,
        amount: u64,
        value: Wei,
        proof: &MembershipProof,
    ) -> Result<Wei, ContractError> {
        let snapshot = self.snapshot().await?;
        let request = MintRequest {
            kind: MintKind::Allowlist,
            minter,
            amount,
            value,
            proof: Some(proof.clone()),
        };
        let cost = self.check_guards(&snapshot, &request)?;
        self.simulate(minter, value, methods::allowlist_mint(amount, &proof.siblings))
            .await?;
        info!(
            "[contract] Allowlist mint of {} by {} would succeed ({} ETH)",
            amount,
            minter,
            format_ether(cost)
        );
        Ok(cost)
    }

    async fn preflight_public_mint(
        &self,
        minter: Address,
        amount: u64,
        value: Wei,
    ) -> Result<Wei, ContractError> {
        let snapshot = self.snapshot().await?;
        let request = MintRequest {
            kind: MintKind::Public,
            minter,
            amount,
            value,
            proof: None,
        };
        let cost = self.check_guards(&snapshot, &request)?;
        self.simulate(minter, value, methods::public_mint(amount)).await?;
        info!(
            "[contract] Public mint of {} by {} would succeed ({} ETH)",
            amount,
            minter,
            format_ether(cost)
        );
        Ok(cost)
    }

    async fn token_uri(&self, token_id: u64) -> Result<String, ContractError> {
        let data = self
            .chain
            .call(&CallRequest::new(self.address, methods::token_uri(token_id)))
            .await?;
        abi::decode_string(&data, 0)
    }

    async fn mint_for_address(
        &self,
        receiver: Address,
        amount: u64,
    ) -> Result<PhaseReport, ContractError> {
        let mut report = PhaseReport::new();
        self.transact(
            methods::MINT_FOR_ADDRESS,
            methods::mint_for_address(amount, receiver),
            &mut report,
        )
        .await?;
        Ok(report)
    }

    async fn withdraw(&self) -> Result<PhaseReport, ContractError> {
        let mut report = PhaseReport::new();
        self.transact(methods::WITHDRAW, methods::call(methods::WITHDRAW), &mut report)
            .await?;
        Ok(report)
    }
}
