//! # Allowlist
//!
//! Identity set plus its commitment tree. Built once from the allowlist file,
//! then queried for the root (published with `setMerkleRoot`) and for
//! per-address proofs (submitted with `allowlistMint`).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::algorithms::{build_tree, encode_leaf, generate_proof};
use crate::domain::{AllowlistError, CommitmentTree, Identity, MembershipProof, MerkleRoot};

/// A committed allowlist.
#[derive(Clone, Debug)]
pub struct Allowlist {
    identities: BTreeSet<Identity>,
    tree: CommitmentTree,
}

impl Allowlist {
    /// Parse textual identities and build the commitment.
    ///
    /// Malformed entries are reported with their position; an empty list is
    /// rejected.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, AllowlistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let identities = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .as_ref()
                    .parse::<Identity>()
                    .map_err(|source| AllowlistError::InvalidEntry {
                        index,
                        source: Box::new(source),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_identities(identities)
    }

    /// Build the commitment over already-parsed identities.
    pub fn from_identities<I>(identities: I) -> Result<Self, AllowlistError>
    where
        I: IntoIterator<Item = Identity>,
    {
        let identities: BTreeSet<Identity> = identities.into_iter().collect();
        let leaves: Vec<_> = identities.iter().map(encode_leaf).collect();
        let tree = build_tree(&leaves)?;

        info!(
            "[allowlist] Committed {} identities, root {}",
            identities.len(),
            tree.root()
        );

        Ok(Self { identities, tree })
    }

    /// Root to publish to the contract.
    pub fn root(&self) -> MerkleRoot {
        self.tree.root()
    }

    /// Number of distinct identities.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Always false for a built allowlist; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Is the identity a member?
    pub fn contains(&self, identity: &Identity) -> bool {
        self.identities.contains(identity)
    }

    /// Members in address order.
    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.identities.iter()
    }

    /// Underlying commitment tree.
    pub fn tree(&self) -> &CommitmentTree {
        &self.tree
    }

    /// Proof for a textual identity.
    ///
    /// Returns `MalformedIdentity` for unparsable input and `NotAMember` for a
    /// well-formed address outside the set.
    pub fn proof_for(&self, identity: &str) -> Result<MembershipProof, AllowlistError> {
        let identity: Identity = identity.parse()?;
        self.proof_for_identity(&identity)
    }

    /// Proof for a parsed identity.
    pub fn proof_for_identity(&self, identity: &Identity) -> Result<MembershipProof, AllowlistError> {
        let leaf = encode_leaf(identity);
        let proof = generate_proof(&self.tree, &leaf).map_err(|err| match err {
            AllowlistError::LeafNotInTree(_) => AllowlistError::NotAMember(*identity),
            other => other,
        })?;
        debug!(
            "[allowlist] Proof for {} has {} siblings",
            identity,
            proof.len()
        );
        Ok(proof)
    }

    /// Proof for every member, keyed by checksummed address.
    pub fn proofs(&self) -> Result<BTreeMap<String, MembershipProof>, AllowlistError> {
        self.identities
            .iter()
            .map(|identity| {
                self.proof_for_identity(identity)
                    .map(|proof| (identity.to_checksum(), proof))
            })
            .collect()
    }

    /// Root and all proofs, in the shape the front end consumes.
    pub fn bundle(&self) -> Result<ProofBundle, AllowlistError> {
        let proofs = self
            .proofs()?
            .into_iter()
            .map(|(address, proof)| (address, proof.to_hex_strings()))
            .collect();
        Ok(ProofBundle {
            root: self.root(),
            proofs,
        })
    }
}

/// Exported root plus per-address proofs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBundle {
    /// Committed root.
    pub root: MerkleRoot,
    /// Checksummed address to `bytes32[]` proof.
    pub proofs: BTreeMap<String, Vec<String>>,
}
