//! # Inbound Ports
//!
//! What the tooling can do with a deployed collection.

use async_trait::async_trait;
use nft_allowlist::{MembershipProof, MerkleRoot};

use crate::domain::{
    Address, CollectionSnapshot, ContractError, PhaseReport, SaleTerms, Wei,
};

/// Collection operations - inbound port.
///
/// Every state-changing operation reads first and only sends the setters whose
/// on-chain value differs, so re-running an operation is a no-op.
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// Read every getter.
    async fn snapshot(&self) -> Result<CollectionSnapshot, ContractError>;

    /// Close both sales.
    async fn close_sales(&self) -> Result<PhaseReport, ContractError>;

    /// Publish the root and allowlist terms, then open the allowlist sale.
    async fn open_allowlist_sale(
        &self,
        root: &MerkleRoot,
        terms: &SaleTerms,
    ) -> Result<PhaseReport, ContractError>;

    /// Apply public terms, then open the public sale.
    async fn open_public_sale(&self, terms: &SaleTerms) -> Result<PhaseReport, ContractError>;

    /// Set the base URI and reveal.
    async fn reveal(&self, base_uri: &str) -> Result<PhaseReport, ContractError>;

    /// Publish a new allowlist root without touching the sale phase.
    async fn update_merkle_root(&self, root: &MerkleRoot) -> Result<PhaseReport, ContractError>;

    /// Check an allowlist mint without sending it; returns the required payment.
    async fn preflight_allowlist_mint(
        &self,
        minter: Address,
        amount: u64,
        value: Wei,
        proof: &MembershipProof,
    ) -> Result<Wei, ContractError>;

    /// Check a public mint without sending it; returns the required payment.
    async fn preflight_public_mint(
        &self,
        minter: Address,
        amount: u64,
        value: Wei,
    ) -> Result<Wei, ContractError>;

    /// Metadata URI of a minted token.
    async fn token_uri(&self, token_id: u64) -> Result<String, ContractError>;

    /// Owner mint to `receiver`, regardless of sale phase.
    async fn mint_for_address(
        &self,
        receiver: Address,
        amount: u64,
    ) -> Result<PhaseReport, ContractError>;

    /// Move the contract balance to the owner.
    async fn withdraw(&self) -> Result<PhaseReport, ContractError>;
}
