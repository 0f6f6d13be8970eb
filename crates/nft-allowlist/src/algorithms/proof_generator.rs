//! # Proof Generator
//!
//! Reads the sibling path for a leaf off a built [`CommitmentTree`].

use super::tree_builder::build_tree;
use crate::domain::{AllowlistError, CommitmentTree, Leaf, MembershipProof};

/// Generate the membership proof for `leaf`.
///
/// Walks from the leaf's index to the root, pushing the sibling at each level
/// when it exists. A promoted lone node has no sibling and contributes nothing.
pub fn generate_proof(tree: &CommitmentTree, leaf: &Leaf) -> Result<MembershipProof, AllowlistError> {
    let mut index = tree
        .position(leaf)
        .ok_or(AllowlistError::LeafNotInTree(*leaf))?;

    let mut siblings = Vec::with_capacity(tree.depth());
    for layer in &tree.layers()[..tree.depth()] {
        if let Some(sibling) = layer.get(index ^ 1) {
            siblings.push(*sibling);
        }
        index /= 2;
    }

    Ok(MembershipProof::new(*leaf, siblings))
}

/// Build a tree over `leaves` and generate the proof for `leaf`.
pub fn generate_proof_from_leaves(
    leaves: &[Leaf],
    leaf: &Leaf,
) -> Result<MembershipProof, AllowlistError> {
    let tree = build_tree(leaves)?;
    generate_proof(&tree, leaf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::verifier::verify_proof;

    fn make_leaf(n: u8) -> Leaf {
        let mut h = [0u8; 32];
        h[0] = n;
        Leaf::new(h)
    }

    #[test]
    fn test_single_leaf_empty_proof() {
        let leaf = make_leaf(9);
        let proof = generate_proof_from_leaves(&[leaf], &leaf).unwrap();
        assert!(proof.is_empty());
    }

    #[test]
    fn test_build_and_verify_all() {
        for n in 1..=17u8 {
            let leaves: Vec<Leaf> = (1..=n).map(make_leaf).collect();
            let tree = build_tree(&leaves).unwrap();
            for leaf in &leaves {
                let proof = generate_proof(&tree, leaf).unwrap();
                assert!(
                    verify_proof(&tree.root(), leaf, &proof.siblings),
                    "Proof verification failed for leaf {} of {}",
                    leaf,
                    n
                );
            }
        }
    }

    #[test]
    fn test_promoted_leaf_has_shorter_proof() {
        let leaves: Vec<Leaf> = (1..=5).map(make_leaf).collect();
        let tree = build_tree(&leaves).unwrap();

        // Leaf 5 is promoted twice, then paired once at the top
        let proof = generate_proof(&tree, &leaves[4]).unwrap();
        assert_eq!(proof.len(), 1);
        let proof = generate_proof(&tree, &leaves[0]).unwrap();
        assert_eq!(proof.len(), 3);
    }

    #[test]
    fn test_unknown_leaf_rejected() {
        let leaves: Vec<Leaf> = (1..=4).map(make_leaf).collect();
        let tree = build_tree(&leaves).unwrap();
        let err = generate_proof(&tree, &make_leaf(99)).unwrap_err();
        assert_eq!(err, AllowlistError::LeafNotInTree(make_leaf(99)));
    }
}
