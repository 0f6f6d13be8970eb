//! # Proof Verification
//!
//! Mirror of OpenZeppelin `MerkleProof.processProof`: fold the sibling path
//! into the leaf with the sorted-pair rule and compare against the root.
//! The collection contract runs the same fold; any divergence here means
//! proofs that verify locally and revert on-chain.

use super::hashing::hash_pair;
use crate::domain::{Hash, Leaf, MembershipProof, MerkleRoot};

/// Recompute the root implied by `leaf` and `siblings`.
pub fn process_proof(leaf: &Leaf, siblings: &[Hash]) -> Hash {
    siblings
        .iter()
        .fold(*leaf.as_bytes(), |acc, sibling| hash_pair(&acc, sibling))
}

/// Verify a sibling path against a root.
pub fn verify_proof(root: &MerkleRoot, leaf: &Leaf, siblings: &[Hash]) -> bool {
    process_proof(leaf, siblings) == *root.as_bytes()
}

/// Verify a [`MembershipProof`] against a root.
pub fn verify_membership(root: &MerkleRoot, proof: &MembershipProof) -> bool {
    verify_proof(root, &proof.leaf, &proof.siblings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_hash(n: u8) -> Hash {
        let mut h = [0u8; 32];
        h[0] = n;
        h
    }

    #[test]
    fn test_empty_proof_requires_leaf_equal_root() {
        let leaf = Leaf::new(make_hash(1));
        assert!(verify_proof(&MerkleRoot::new(make_hash(1)), &leaf, &[]));
        assert!(!verify_proof(&MerkleRoot::new(make_hash(2)), &leaf, &[]));
    }

    #[test]
    fn test_two_leaf_proof_either_side() {
        let a = make_hash(1);
        let b = make_hash(2);
        let root = MerkleRoot::new(hash_pair(&a, &b));

        assert!(verify_proof(&root, &Leaf::new(a), &[b]));
        assert!(verify_proof(&root, &Leaf::new(b), &[a]));
    }

    #[test]
    fn test_tampered_sibling_fails() {
        let a = make_hash(1);
        let b = make_hash(2);
        let root = MerkleRoot::new(hash_pair(&a, &b));
        assert!(!verify_proof(&root, &Leaf::new(a), &[make_hash(99)]));
    }
}
