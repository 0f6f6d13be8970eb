//! # Domain Invariants
//!
//! Structural rules every commitment tree must satisfy.

use super::errors::AllowlistError;
use super::value_objects::Hash;

/// Invariant: a commitment needs at least one leaf.
pub fn invariant_non_empty(leaf_count: usize) -> Result<(), AllowlistError> {
    if leaf_count == 0 {
        return Err(AllowlistError::EmptyAllowlist);
    }
    Ok(())
}

/// Invariant: the leaf layer is strictly ascending (sorted, no duplicates).
///
/// This is what makes the root independent of input order.
pub fn invariant_canonical_leaves(leaves: &[Hash]) -> bool {
    leaves.windows(2).all(|w| w[0] < w[1])
}

/// Invariant: each layer is half the previous one, rounded up, ending in one node.
pub fn invariant_layer_widths(layers: &[Vec<Hash>]) -> bool {
    let shape_ok = layers
        .windows(2)
        .all(|w| w[1].len() == w[0].len().div_ceil(2));
    shape_ok && layers.last().map_or(false, |top| top.len() == 1)
}
