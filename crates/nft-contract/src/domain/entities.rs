//! # Domain Entities
//!
//! Calls, transactions, receipts and the reports operations return.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::value_objects::{Address, TxHash, Wei};

// =============================================================================
// COLLECTION SETTINGS
// =============================================================================

/// Constructor arguments of the collection contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSettings {
    /// ERC-721 name.
    pub name: String,
    /// ERC-721 symbol.
    pub symbol: String,
    /// URI served for every token until reveal.
    pub hidden_metadata_uri: String,
    /// Supply cap.
    pub max_supply: U256,
    /// Initial mint price in wei.
    pub mint_price: Wei,
    /// Initial per-transaction cap.
    pub max_mint_amount_per_tx: U256,
}

// =============================================================================
// CALLS AND TRANSACTIONS
// =============================================================================

/// Read-only call (`eth_call`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRequest {
    /// Caller; matters for `msg.sender` checks.
    pub from: Option<Address>,
    /// Contract address.
    pub to: Address,
    /// Calldata.
    pub data: Vec<u8>,
    /// Attached value.
    pub value: Option<Wei>,
}

impl CallRequest {
    /// Call with no sender and no value.
    pub fn new(to: Address, data: Vec<u8>) -> Self {
        Self {
            from: None,
            to,
            data,
            value: None,
        }
    }

    /// Set the sender.
    pub fn sender(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Attach value.
    pub fn with_value(mut self, value: Wei) -> Self {
        self.value = Some(value);
        self
    }
}

/// State-changing transaction. `to == None` creates a contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Target; `None` for contract creation.
    pub to: Option<Address>,
    /// Calldata or creation code.
    pub data: Vec<u8>,
    /// Attached value.
    pub value: Wei,
    /// Gas limit; estimated when `None`.
    pub gas: Option<u64>,
}

impl TransactionRequest {
    /// Call a contract.
    pub fn call(to: Address, data: Vec<u8>) -> Self {
        Self {
            to: Some(to),
            data,
            value: U256::zero(),
            gas: None,
        }
    }

    /// Deploy creation code.
    pub fn create(code: Vec<u8>) -> Self {
        Self {
            to: None,
            data: code,
            value: U256::zero(),
            gas: None,
        }
    }
}

/// Mined transaction outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Block it was included in.
    pub block_number: u64,
    /// `true` for status 1.
    pub success: bool,
    /// Created contract, for creation transactions.
    pub contract_address: Option<Address>,
    /// Gas consumed.
    pub gas_used: u64,
}

// =============================================================================
// REPORTS
// =============================================================================

/// One step of an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseAction {
    /// A transaction was sent and confirmed.
    Sent {
        /// Function signature.
        method: String,
        /// Transaction hash (hex).
        tx_hash: String,
        /// Inclusion block.
        block_number: u64,
    },
    /// The on-chain value already matched; nothing sent.
    Unchanged {
        /// Setter that was skipped.
        method: String,
    },
}

/// What an operation did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseReport {
    /// Steps in execution order.
    pub actions: Vec<PhaseAction>,
}

impl PhaseReport {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a confirmed transaction.
    pub fn sent(&mut self, method: &str, receipt: &TransactionReceipt) {
        self.actions.push(PhaseAction::Sent {
            method: method.to_string(),
            tx_hash: format!("0x{}", hex::encode(receipt.tx_hash)),
            block_number: receipt.block_number,
        });
    }

    /// Record a skipped setter.
    pub fn unchanged(&mut self, method: &str) {
        self.actions.push(PhaseAction::Unchanged {
            method: method.to_string(),
        });
    }

    /// Number of transactions sent.
    pub fn transactions_sent(&self) -> usize {
        self.actions
            .iter()
            .filter(|action| matches!(action, PhaseAction::Sent { .. }))
            .count()
    }

    /// Did the operation change anything?
    pub fn is_noop(&self) -> bool {
        self.transactions_sent() == 0
    }

    /// Methods of the transactions sent, in order.
    pub fn sent_methods(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|action| match action {
                PhaseAction::Sent { method, .. } => Some(method.as_str()),
                PhaseAction::Unchanged { .. } => None,
            })
            .collect()
    }
}
