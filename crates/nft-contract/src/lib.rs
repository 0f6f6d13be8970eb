//! # NFT Collection Contract Access
//!
//! Drives a deployed `MyNftCollection` through its sale phases: deployment,
//! allowlist and public sale configuration, reveal, and mint preflight.
//!
//! **Chain access:** Ethereum JSON-RPC 2.0 over HTTP
//! **Signing:** node account (development) or local EIP-155 secp256k1 key
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Read, compare, write, confirm
//!
//! Every owner operation reads the current on-chain value, sends a setter only
//! when it differs, and waits for the configured number of confirmations.
//! Re-running an operation that already took effect sends nothing.
//!
//! ## Module Structure
//!
//! ```text
//! nft-contract/
//! ├── abi/             # Selectors, head/tail codec, method catalogue, revert decoding
//! ├── domain/          # Sale state machine, mint guards, requests, receipts, errors
//! ├── ports/           # CollectionApi (inbound), ChainClient (outbound), MockChain
//! ├── adapters/        # JSON-RPC client, local signer, explorer verification
//! ├── application/     # CollectionService, Deployer, confirmation waiting
//! └── config.rs        # ContractClientConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use abi::{CollectionError, RevertReason};
pub use adapters::{
    EtherscanVerifier, JsonRpcChainClient, LocalSigner, TransactionSigner, VerificationRequest,
    VerificationStatus,
};
pub use application::{
    wait_for_confirmations, CollectionService, Deployer, DeploymentOutcome, PreviousDeployment,
    PLACEHOLDER_BASE_URI,
};
pub use config::{ContractClientConfig, DEV_BLOCK_CONFIRMATIONS, WAIT_BLOCK_CONFIRMATIONS};
pub use domain::{
    format_ether, parse_ether, plan_transition, Address, CallRequest, CollectionSettings,
    CollectionSnapshot, ContractError, MintGuard, MintKind, MintRejection, MintRequest,
    PhaseAction, PhaseReport, SaleState, SaleTerms, TransactionReceipt, TransactionRequest,
    TxHash, Wei,
};
pub use ports::{ChainClient, CollectionApi, MockChain, MockCollection};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
