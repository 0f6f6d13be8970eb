//! # Outbound Ports
//!
//! The chain the tooling talks to: a JSON-RPC node in production, an
//! in-memory [`MockChain`](super::MockChain) in tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    Address, CallRequest, ContractError, TransactionReceipt, TransactionRequest, TxHash,
};

/// Chain access - outbound port.
///
/// Reverted calls and transactions surface as [`ContractError::Reverted`] or
/// [`ContractError::MintRejected`] (decoded from the revert data).
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// EIP-155 chain id.
    async fn chain_id(&self) -> Result<u64, ContractError>;

    /// Current head block number.
    async fn block_number(&self) -> Result<u64, ContractError>;

    /// Execute a read-only call and return the raw return data.
    async fn call(&self, request: &CallRequest) -> Result<Vec<u8>, ContractError>;

    /// Sign (or have the node sign) and submit a transaction from [`sender`](Self::sender).
    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, ContractError>;

    /// Receipt of a mined transaction; `None` while pending.
    async fn transaction_receipt(
        &self,
        tx_hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, ContractError>;

    /// Deployed runtime code; empty for accounts without code.
    async fn code_at(&self, address: &Address) -> Result<Vec<u8>, ContractError>;

    /// Account transactions are sent from.
    fn sender(&self) -> Address;
}

#[async_trait]
impl<C: ChainClient + ?Sized> ChainClient for Arc<C> {
    async fn chain_id(&self) -> Result<u64, ContractError> {
        (**self).chain_id().await
    }

    async fn block_number(&self) -> Result<u64, ContractError> {
        (**self).block_number().await
    }

    async fn call(&self, request: &CallRequest) -> Result<Vec<u8>, ContractError> {
        (**self).call(request).await
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, ContractError> {
        (**self).send_transaction(request).await
    }

    async fn transaction_receipt(
        &self,
        tx_hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, ContractError> {
        (**self).transaction_receipt(tx_hash).await
    }

    async fn code_at(&self, address: &Address) -> Result<Vec<u8>, ContractError> {
        (**self).code_at(address).await
    }

    fn sender(&self) -> Address {
        (**self).sender()
    }
}
