//! # Domain Value Objects
//!
//! Immutable value types for the allowlist commitment scheme.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use super::errors::AllowlistError;

/// 32-byte keccak256 digest.
pub type Hash = [u8; 32];

/// Byte length of an account identifier.
pub const IDENTITY_LEN: usize = 20;

// =============================================================================
// IDENTITY
// =============================================================================

/// An account address eligible for allowlist membership.
///
/// Textual form is `0x` followed by 40 hex digits. Mixed-case input must carry
/// a valid EIP-55 checksum; all-lowercase and all-uppercase input is accepted
/// as is.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Identity([u8; IDENTITY_LEN]);

impl Identity {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; IDENTITY_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes (the exact bytes hashed into a leaf).
    pub fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
        &self.0
    }

    /// EIP-55 mixed-case checksum encoding.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                digest[i / 2] >> 4
            } else {
                digest[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Lowercase `0x`-prefixed hex.
    pub fn to_lower_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Identity {
    type Err = AllowlistError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| AllowlistError::malformed(input, "missing 0x prefix"))?;

        if digits.len() != IDENTITY_LEN * 2 {
            return Err(AllowlistError::malformed(
                input,
                format!("expected 40 hex digits, got {}", digits.len()),
            ));
        }

        let mut bytes = [0u8; IDENTITY_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| AllowlistError::malformed(input, e.to_string()))?;
        let identity = Self(bytes);

        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && identity.to_checksum()[2..] != *digits {
            return Err(AllowlistError::malformed(input, "EIP-55 checksum mismatch"));
        }

        Ok(identity)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.to_checksum())
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// HASH-BACKED VALUES
// =============================================================================

/// Parse `0x`-prefixed 64-digit hex into a hash.
pub fn parse_hash(input: &str) -> Result<Hash, AllowlistError> {
    let malformed = |reason: String| AllowlistError::MalformedHash {
        input: input.to_string(),
        reason,
    };
    let digits = input
        .trim()
        .strip_prefix("0x")
        .ok_or_else(|| malformed("missing 0x prefix".to_string()))?;
    let mut out = [0u8; 32];
    hex::decode_to_slice(digits, &mut out).map_err(|e| malformed(e.to_string()))?;
    Ok(out)
}

/// `0x`-prefixed lowercase hex of a hash.
pub fn format_hash(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

macro_rules! hash_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(Hash);

        impl $name {
            /// Wrap a raw hash.
            pub const fn new(hash: Hash) -> Self {
                Self(hash)
            }

            /// Raw hash bytes.
            pub fn as_bytes(&self) -> &Hash {
                &self.0
            }

            /// `0x`-prefixed hex form.
            pub fn to_hex(&self) -> String {
                format_hash(&self.0)
            }
        }

        impl From<Hash> for $name {
            fn from(hash: Hash) -> Self {
                Self(hash)
            }
        }

        impl FromStr for $name {
            type Err = AllowlistError;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                parse_hash(input).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

hash_newtype!(
    /// Hash of a single identity; one tree input.
    Leaf
);

hash_newtype!(
    /// Top of the commitment tree; the value published to the contract.
    MerkleRoot
);

// =============================================================================
// MEMBERSHIP PROOF
// =============================================================================

/// Sibling path from a leaf up to the root, ordered leaf level first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProof {
    /// The leaf this proof is for.
    pub leaf: Leaf,
    /// Sibling hashes, bottom-up.
    #[serde(with = "hex_hash_list")]
    pub siblings: Vec<Hash>,
}

impl MembershipProof {
    /// Create a proof.
    pub fn new(leaf: Leaf, siblings: Vec<Hash>) -> Self {
        Self { leaf, siblings }
    }

    /// Number of sibling hashes.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// True for a single-leaf tree, where the leaf is the root.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Hex strings in the form `allowlistMint` expects for its `bytes32[]` argument.
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.siblings.iter().map(format_hash).collect()
    }
}

mod hex_hash_list {
    use super::{format_hash, parse_hash, Hash};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hashes: &[Hash], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(hashes.iter().map(format_hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Hash>, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| parse_hash(s).map_err(serde::de::Error::custom))
            .collect()
    }
}
