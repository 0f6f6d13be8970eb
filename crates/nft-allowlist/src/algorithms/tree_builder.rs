//! # Commitment Tree Builder
//!
//! ## Algorithm
//!
//! 1. Sort the leaves ascending and drop duplicates
//! 2. Pair adjacent nodes; parent = `hash_pair(left, right)` (sorted pair)
//! 3. A lone last node on a level is promoted unchanged
//! 4. Repeat until one node remains
//!
//! Step 1 makes the root a function of the leaf *set*, so it differs from a
//! `merkletreejs` root built over the same addresses in file order. Proofs
//! still verify under OpenZeppelin's `MerkleProof`.
//!
//! # Time Complexity: O(n log n)
//! # Space Complexity: O(n)

use tracing::debug;

use super::hashing::hash_pair;
use crate::domain::{
    invariant_canonical_leaves, invariant_layer_widths, invariant_non_empty, AllowlistError,
    CommitmentTree, Hash, Leaf, MerkleRoot,
};

/// Build the full commitment tree.
///
/// Empty input is rejected with [`AllowlistError::EmptyAllowlist`].
pub fn build_tree(leaves: &[Leaf]) -> Result<CommitmentTree, AllowlistError> {
    let mut level: Vec<Hash> = leaves.iter().map(|leaf| *leaf.as_bytes()).collect();
    level.sort_unstable();
    level.dedup();
    invariant_non_empty(level.len())?;
    debug_assert!(invariant_canonical_leaves(&level));

    if level.len() < leaves.len() {
        debug!(
            "[allowlist] Collapsed {} duplicate leaves",
            leaves.len() - level.len()
        );
    }

    let mut layers = vec![level];
    loop {
        let top = &layers[layers.len() - 1];
        if top.len() <= 1 {
            break;
        }
        let next = next_layer(top);
        layers.push(next);
    }
    debug_assert!(invariant_layer_widths(&layers));

    CommitmentTree::from_layers(layers).ok_or(AllowlistError::EmptyAllowlist)
}

/// Root of the tree over `leaves`.
pub fn compute_root(leaves: &[Leaf]) -> Result<MerkleRoot, AllowlistError> {
    build_tree(leaves).map(|tree| tree.root())
}

/// Hash one level into the next.
fn next_layer(level: &[Hash]) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| match pair.get(1) {
            Some(right) => hash_pair(&pair[0], right),
            None => pair[0], // Promote lone node
        })
        .collect()
}
