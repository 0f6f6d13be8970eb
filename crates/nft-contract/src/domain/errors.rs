//! # Domain Errors
//!
//! Error types for contract access, deployment and verification.

use nft_allowlist::AllowlistError;
use thiserror::Error;

use super::sale::MintRejection;
use crate::abi::RevertReason;

/// Contract tooling error types.
#[derive(Debug, Error)]
pub enum ContractError {
    /// HTTP transport failed (connection refused, timeout, TLS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message from the node
        message: String,
    },

    /// The node's answer could not be interpreted.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// ABI encoding or decoding failed.
    #[error("ABI error: {0}")]
    Abi(String),

    /// A call or transaction reverted.
    #[error("Execution reverted: {0}")]
    Reverted(RevertReason),

    /// A mined transaction has status 0.
    #[error("Transaction {tx_hash} failed on-chain")]
    TransactionFailed {
        /// Hex transaction hash
        tx_hash: String,
    },

    /// Receipt or confirmations did not arrive in time.
    #[error("Timed out after {waited_secs}s waiting for {tx_hash}")]
    ReceiptTimeout {
        /// Hex transaction hash
        tx_hash: String,
        /// Seconds waited
        waited_secs: u64,
    },

    /// Key material or signing failure.
    #[error("Signer error: {0}")]
    Signer(String),

    /// Block explorer verification failed.
    #[error("Verification failed: {0}")]
    Verification(String),

    /// Mint preflight found a guard the contract would reject.
    #[error("Mint would be rejected: {0}")]
    MintRejected(MintRejection),

    /// A user-supplied value is out of range or badly formatted.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// The contract returned a sale state outside Closed/Allowlist/Public.
    #[error("Unknown sale state {0}")]
    UnknownSaleState(u64),

    /// No contract code at the target address.
    #[error("No contract code at {0}")]
    NoCode(String),

    /// Allowlist commitment failure.
    #[error(transparent)]
    Allowlist(#[from] AllowlistError),
}

impl From<RevertReason> for ContractError {
    fn from(reason: RevertReason) -> Self {
        match reason.as_mint_rejection() {
            Some(rejection) => ContractError::MintRejected(rejection),
            None => ContractError::Reverted(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::CollectionError;

    #[test]
    fn test_rpc_error_display() {
        let err = ContractError::Rpc {
            code: -32000,
            message: "nonce too low".to_string(),
        };
        assert!(err.to_string().contains("-32000"));
    }

    #[test]
    fn test_revert_maps_to_mint_rejection() {
        let err: ContractError = RevertReason::Custom(CollectionError::InvalidProof).into();
        assert!(matches!(err, ContractError::MintRejected(MintRejection::InvalidProof)));

        let err: ContractError = RevertReason::Message("Ownable: caller is not the owner".into()).into();
        assert!(err.to_string().contains("Ownable"));
    }

    #[test]
    fn test_allowlist_error_transparent() {
        let err: ContractError = AllowlistError::EmptyAllowlist.into();
        assert_eq!(err.to_string(), "Allowlist is empty");
    }
}
