//! # Leaf Encoder
//!
//! `leaf = keccak256(address bytes)`, the same value the contract derives from
//! `keccak256(abi.encodePacked(msg.sender))`.

use super::hashing::keccak256;
use crate::domain::{AllowlistError, Identity, Leaf};

/// Hash one identity into a leaf.
pub fn encode_leaf(identity: &Identity) -> Leaf {
    Leaf::new(keccak256(identity.as_bytes()))
}

/// Parse and hash a list of textual identities.
///
/// Fails on the first malformed entry, reporting its position.
pub fn encode_leaves<I, S>(entries: I) -> Result<Vec<Leaf>, AllowlistError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .as_ref()
                .parse::<Identity>()
                .map(|identity| encode_leaf(&identity))
                .map_err(|source| AllowlistError::InvalidEntry {
                    index,
                    source: Box::new(source),
                })
        })
        .collect()
}
