//! # Sale Phases and Mint Guards
//!
//! The collection contract runs a three-state sale machine:
//!
//! ```text
//!            setAllowlistOnly            setPublicOpen
//!   Closed ──────────────────→ Allowlist ─────────────→ Public
//!     ↑                                                   │
//!     └──────────────────── setClosed ────────────────────┘
//! ```
//!
//! Any state can be set from any other by the owner; the tooling only sends a
//! setter when the current state differs from the target.
//!
//! Mints are admitted through a fixed guard sequence, checked here in the
//! contract's own order before a transaction is paid for.

use std::fmt;

use nft_allowlist::{encode_leaf, verify_membership, MembershipProof, MerkleRoot};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::errors::ContractError;
use super::value_objects::{Address, Wei};
use crate::abi::methods;

// =============================================================================
// SALE STATE
// =============================================================================

/// On-chain sale state (`uint8` returned by `getSaleState`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum SaleState {
    /// No minting except by the owner.
    Closed = 0,
    /// Only allowlisted addresses with a valid proof.
    Allowlist = 1,
    /// Anyone.
    Public = 2,
}

impl SaleState {
    /// Decode the contract's numeric state.
    pub fn from_code(code: U256) -> Result<Self, ContractError> {
        match code.low_u64() {
            0 if code.bits() <= 64 => Ok(Self::Closed),
            1 if code.bits() <= 64 => Ok(Self::Allowlist),
            2 if code.bits() <= 64 => Ok(Self::Public),
            other => Err(ContractError::UnknownSaleState(other)),
        }
    }

    /// Numeric value as stored by the contract.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Signature of the setter that moves the contract into this state.
    pub fn setter(self) -> &'static str {
        match self {
            Self::Closed => methods::SET_CLOSED,
            Self::Allowlist => methods::SET_ALLOWLIST_ONLY,
            Self::Public => methods::SET_PUBLIC_OPEN,
        }
    }

    /// Does this state admit mints of the given kind?
    pub fn admits(self, kind: MintKind) -> bool {
        matches!(
            (self, kind),
            (Self::Allowlist, MintKind::Allowlist) | (Self::Public, MintKind::Public)
        )
    }
}

impl fmt::Display for SaleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Closed => "closed",
            Self::Allowlist => "allowlist",
            Self::Public => "public",
        };
        f.write_str(name)
    }
}

/// Setter to send to go from `current` to `target`, or `None` when already there.
pub fn plan_transition(current: SaleState, target: SaleState) -> Option<&'static str> {
    (current != target).then(|| target.setter())
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Every value the tooling reads from the collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    /// Current sale phase.
    pub sale_state: SaleState,
    /// Published allowlist root.
    pub merkle_root: MerkleRoot,
    /// Price per token in wei.
    pub mint_price: Wei,
    /// Per-transaction mint cap.
    pub max_mint_amount_per_tx: U256,
    /// Collection size cap.
    pub max_supply: U256,
    /// Tokens minted so far.
    pub total_supply: U256,
    /// Revealed metadata base URI.
    pub base_uri: String,
    /// Placeholder URI served before reveal.
    pub hidden_metadata_uri: String,
    /// Has the collection been revealed?
    pub revealed: bool,
}

/// Price and per-transaction cap for one sale phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTerms {
    /// Price per token in wei.
    pub mint_price: Wei,
    /// Per-transaction mint cap.
    pub max_mint_amount_per_tx: U256,
}

impl SaleTerms {
    /// Terms from wei price and cap.
    pub fn new(mint_price: Wei, max_mint_amount_per_tx: u64) -> Self {
        Self {
            mint_price,
            max_mint_amount_per_tx: U256::from(max_mint_amount_per_tx),
        }
    }
}

// =============================================================================
// MINT GUARDS
// =============================================================================

/// Which mint entry point a request targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MintKind {
    /// `allowlistMint(uint256,bytes32[])`
    Allowlist,
    /// `publicMint(uint256)`
    Public,
}

/// A prospective mint.
#[derive(Clone, Debug)]
pub struct MintRequest {
    /// Entry point.
    pub kind: MintKind,
    /// Account that will send the transaction.
    pub minter: Address,
    /// Number of tokens.
    pub amount: u64,
    /// Wei attached to the transaction.
    pub value: Wei,
    /// Allowlist proof (required for [`MintKind::Allowlist`]).
    pub proof: Option<MembershipProof>,
}

/// First guard a mint fails, named after the contract's custom errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MintRejection {
    /// Sale phase does not admit this mint kind.
    SaleClosed(MintKind),
    /// Amount is zero or above the per-transaction cap.
    InvalidMintAmount,
    /// Amount would push total supply past the cap.
    MaxSupplyExceeded,
    /// Attached value is below `mint_price * amount`.
    InsufficientFunds,
    /// Proof missing, for another address, or not matching the root.
    InvalidProof,
    /// The address has already used its allowlist claim.
    AddressAlreadyClaimed,
}

impl fmt::Display for MintRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaleClosed(MintKind::Allowlist) => f.write_str("allowlist sale is closed"),
            Self::SaleClosed(MintKind::Public) => f.write_str("public sale is closed"),
            Self::InvalidMintAmount => f.write_str("invalid mint amount"),
            Self::MaxSupplyExceeded => f.write_str("max supply exceeded"),
            Self::InsufficientFunds => f.write_str("insufficient funds"),
            Self::InvalidProof => f.write_str("invalid allowlist proof"),
            Self::AddressAlreadyClaimed => f.write_str("address already claimed"),
        }
    }
}

/// Guard sequence evaluated against a [`CollectionSnapshot`].
pub struct MintGuard<'a> {
    snapshot: &'a CollectionSnapshot,
}

impl<'a> MintGuard<'a> {
    /// Bind the guards to a snapshot.
    pub fn new(snapshot: &'a CollectionSnapshot) -> Self {
        Self { snapshot }
    }

    /// Check a mint; returns the required payment on success.
    ///
    /// Order: sale phase, amount, supply, funds, proof.
    pub fn check(&self, request: &MintRequest) -> Result<Wei, MintRejection> {
        let snapshot = self.snapshot;

        if !snapshot.sale_state.admits(request.kind) {
            return Err(MintRejection::SaleClosed(request.kind));
        }

        let amount = U256::from(request.amount);
        if amount.is_zero() || amount > snapshot.max_mint_amount_per_tx {
            return Err(MintRejection::InvalidMintAmount);
        }

        let exceeds_supply = snapshot
            .total_supply
            .checked_add(amount)
            .map_or(true, |after| after > snapshot.max_supply);
        if exceeds_supply {
            return Err(MintRejection::MaxSupplyExceeded);
        }

        let cost = snapshot
            .mint_price
            .checked_mul(amount)
            .ok_or(MintRejection::InsufficientFunds)?;
        if request.value < cost {
            return Err(MintRejection::InsufficientFunds);
        }

        if request.kind == MintKind::Allowlist {
            self.check_proof(request.minter, request.proof.as_ref())?;
        }

        Ok(cost)
    }

    fn check_proof(
        &self,
        minter: Address,
        proof: Option<&MembershipProof>,
    ) -> Result<(), MintRejection> {
        let proof = proof.ok_or(MintRejection::InvalidProof)?;
        // The contract hashes msg.sender, so a proof for another leaf never passes
        if proof.leaf != encode_leaf(&minter) {
            return Err(MintRejection::InvalidProof);
        }
        if !verify_membership(&self.snapshot.merkle_root, proof) {
            return Err(MintRejection::InvalidProof);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nft_allowlist::{Allowlist, Identity};

    fn minter(n: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[0] = 0x42;
        bytes[19] = n;
        Identity::new(bytes)
    }

    fn snapshot(state: SaleState, root: MerkleRoot) -> CollectionSnapshot {
        CollectionSnapshot {
            sale_state: state,
            merkle_root: root,
            mint_price: U256::from(20u64),
            max_mint_amount_per_tx: U256::from(5u64),
            max_supply: U256::from(100u64),
            total_supply: U256::from(10u64),
            base_uri: String::new(),
            hidden_metadata_uri: "ipfs://hidden.json".to_string(),
            revealed: false,
        }
    }

    fn allowlist() -> Allowlist {
        Allowlist::from_identities([minter(1), minter(2), minter(3)]).unwrap()
    }

    fn request(kind: MintKind, who: Address, amount: u64, value: u64) -> MintRequest {
        MintRequest {
            kind,
            minter: who,
            amount,
            value: U256::from(value),
            proof: None,
        }
    }

    #[test]
    fn test_sale_state_codes() {
        assert_eq!(SaleState::from_code(U256::from(1u64)).unwrap(), SaleState::Allowlist);
        assert!(SaleState::from_code(U256::from(3u64)).is_err());
        assert!(SaleState::from_code(U256::MAX).is_err());
        assert_eq!(SaleState::Public.code(), 2);
    }

    #[test]
    fn test_plan_transition_idempotent() {
        assert_eq!(plan_transition(SaleState::Closed, SaleState::Closed), None);
        assert_eq!(
            plan_transition(SaleState::Closed, SaleState::Allowlist),
            Some(methods::SET_ALLOWLIST_ONLY)
        );
        assert_eq!(
            plan_transition(SaleState::Public, SaleState::Closed),
            Some(methods::SET_CLOSED)
        );
    }

    #[test]
    fn test_admits() {
        assert!(SaleState::Allowlist.admits(MintKind::Allowlist));
        assert!(!SaleState::Allowlist.admits(MintKind::Public));
        assert!(!SaleState::Public.admits(MintKind::Allowlist));
        assert!(!SaleState::Closed.admits(MintKind::Public));
    }

    #[test]
    fn test_allowlist_mint_passes_all_guards() {
        let list = allowlist();
        let snap = snapshot(SaleState::Allowlist, list.root());
        let mut req = request(MintKind::Allowlist, minter(2), 2, 40);
        req.proof = Some(list.proof_for_identity(&minter(2)).unwrap());

        assert_eq!(MintGuard::new(&snap).check(&req), Ok(U256::from(40u64)));
    }

    #[test]
    fn test_guard_order_sale_state_first() {
        let snap = snapshot(SaleState::Closed, allowlist().root());
        // Amount and funds are also wrong; sale state is reported
        let req = request(MintKind::Public, minter(9), 0, 0);
        assert_eq!(
            MintGuard::new(&snap).check(&req),
            Err(MintRejection::SaleClosed(MintKind::Public))
        );
    }

    #[test]
    fn test_invalid_amounts() {
        let snap = snapshot(SaleState::Public, allowlist().root());
        let guard = MintGuard::new(&snap);
        assert_eq!(
            guard.check(&request(MintKind::Public, minter(9), 0, 0)),
            Err(MintRejection::InvalidMintAmount)
        );
        assert_eq!(
            guard.check(&request(MintKind::Public, minter(9), 6, 1_000)),
            Err(MintRejection::InvalidMintAmount)
        );
    }

    #[test]
    fn test_max_supply_exceeded() {
        let mut snap = snapshot(SaleState::Public, allowlist().root());
        snap.total_supply = U256::from(99u64);
        let req = request(MintKind::Public, minter(9), 2, 40);
        assert_eq!(
            MintGuard::new(&snap).check(&req),
            Err(MintRejection::MaxSupplyExceeded)
        );
    }

    #[test]
    fn test_insufficient_funds() {
        let snap = snapshot(SaleState::Public, allowlist().root());
        let req = request(MintKind::Public, minter(9), 1, 19);
        assert_eq!(
            MintGuard::new(&snap).check(&req),
            Err(MintRejection::InsufficientFunds)
        );
    }

    #[test]
    fn test_proof_for_other_address_rejected() {
        let list = allowlist();
        let snap = snapshot(SaleState::Allowlist, list.root());
        let mut req = request(MintKind::Allowlist, minter(9), 1, 20);
        req.proof = Some(list.proof_for_identity(&minter(1)).unwrap());
        assert_eq!(MintGuard::new(&snap).check(&req), Err(MintRejection::InvalidProof));
    }

    #[test]
    fn test_missing_proof_rejected() {
        let snap = snapshot(SaleState::Allowlist, allowlist().root());
        let req = request(MintKind::Allowlist, minter(1), 1, 20);
        assert_eq!(MintGuard::new(&snap).check(&req), Err(MintRejection::InvalidProof));
    }

    #[test]
    fn test_stale_root_rejected() {
        let list = allowlist();
        // Contract still holds the root of a smaller list
        let stale = Allowlist::from_identities([minter(1), minter(3)]).unwrap();
        let snap = snapshot(SaleState::Allowlist, stale.root());
        let mut req = request(MintKind::Allowlist, minter(2), 1, 20);
        req.proof = Some(list.proof_for_identity(&minter(2)).unwrap());
        assert_eq!(MintGuard::new(&snap).check(&req), Err(MintRejection::InvalidProof));
    }
}
