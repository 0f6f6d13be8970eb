//! # Algorithms
//!
//! Leaf encoding, tree construction, proof generation and verification.
//! All functions are pure and synchronous.

pub mod hashing;
pub mod leaf_encoder;
pub mod proof_generator;
pub mod tree_builder;
pub mod verifier;

pub use hashing::{hash_pair, keccak256};
pub use leaf_encoder::{encode_leaf, encode_leaves};
pub use proof_generator::{generate_proof, generate_proof_from_leaves};
pub use tree_builder::{build_tree, compute_root};
pub use verifier::{process_proof, verify_membership, verify_proof};
