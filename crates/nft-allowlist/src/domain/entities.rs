//! # Domain Entities
//!
//! The commitment tree with every layer retained, so proofs can be read off
//! without rehashing.

use super::value_objects::{Hash, Leaf, MerkleRoot};

/// Binary keccak256 tree over canonical (sorted, unique) leaves.
///
/// `layers[0]` holds the leaves, the last layer holds exactly the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitmentTree {
    layers: Vec<Vec<Hash>>,
    root: MerkleRoot,
}

impl CommitmentTree {
    /// Assemble a tree from fully built layers.
    ///
    /// Returns `None` when the layers do not end in a single root node.
    pub(crate) fn from_layers(layers: Vec<Vec<Hash>>) -> Option<Self> {
        let root = match layers.last().map(Vec::as_slice) {
            Some([root]) => MerkleRoot::new(*root),
            _ => return None,
        };
        Some(Self { layers, root })
    }

    /// The published commitment.
    pub fn root(&self) -> MerkleRoot {
        self.root
    }

    /// All layers, leaves first.
    pub fn layers(&self) -> &[Vec<Hash>] {
        &self.layers
    }

    /// Canonical leaf layer (ascending, no duplicates).
    pub fn leaves(&self) -> &[Hash] {
        &self.layers[0]
    }

    /// Number of distinct leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Number of hashing levels between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Index of a leaf in the canonical leaf layer.
    pub fn position(&self, leaf: &Leaf) -> Option<usize> {
        self.leaves().binary_search(leaf.as_bytes()).ok()
    }

    /// Is the leaf committed by this tree?
    pub fn contains(&self, leaf: &Leaf) -> bool {
        self.position(leaf).is_some()
    }
}
