//! # NFT Allowlist Commitment
//!
//! Commits a set of eligible accounts to a single 32-byte Merkle root that the
//! collection contract stores, and produces the sibling-hash proofs minters
//! submit with `allowlistMint`.
//!
//! **Hash:** keccak256
//! **Pairing:** sorted pairs (smaller child first)
//! **Odd node:** promoted unchanged to the next level
//! **Verifier:** OpenZeppelin `MerkleProof.verify` (on-chain)
//!
//! ## Pipeline
//!
//! ```text
//! allowlist.json ──→ Identity ──→ Leaf = keccak256(address bytes)
//!                                   │
//!                                   ↓
//!                         CommitmentTree ──→ MerkleRoot ──→ setMerkleRoot(bytes32)
//!                                   │
//!                     address ──────┴──→ MembershipProof ──→ allowlistMint(n, bytes32[])
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! nft-allowlist/
//! ├── domain/          # Identity, Leaf, MerkleRoot, MembershipProof, CommitmentTree, errors
//! ├── algorithms/      # Leaf encoding, tree building, proof generation, verification
//! └── application/     # Allowlist facade used by the CLI and the contract service
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod domain;

// Re-exports
pub use algorithms::{
    build_tree, compute_root, encode_leaf, encode_leaves, generate_proof,
    generate_proof_from_leaves, hash_pair, keccak256, process_proof, verify_membership,
    verify_proof,
};
pub use application::{Allowlist, ProofBundle};
pub use domain::{
    AllowlistError, CommitmentTree, Hash, Identity, Leaf, MembershipProof, MerkleRoot,
    IDENTITY_LEN,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
