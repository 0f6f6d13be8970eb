//! keccak256 and the sorted-pair node rule.

use sha3::{Digest, Keccak256};

use crate::domain::Hash;

/// Compute Keccak256 hash.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash two nodes, smaller one first.
///
/// Identical to OpenZeppelin's `_hashPair`: the parent does not depend on
/// which side each child came from.
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    let (left, right) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}
