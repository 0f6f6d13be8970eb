//! # Adapters
//!
//! Production implementations of the outbound ports: an Ethereum JSON-RPC
//! client with node-held or local keys, and the block explorer verifier.

pub mod explorer;
pub mod json_rpc;
pub mod rpc_types;
pub mod signer;

pub use explorer::{EtherscanVerifier, VerificationRequest, VerificationStatus};
pub use json_rpc::{JsonRpcChainClient, TransactionSigner};
pub use signer::{LegacyTransaction, LocalSigner};
