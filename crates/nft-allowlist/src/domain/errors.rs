//! # Domain Errors
//!
//! Error types for the allowlist commitment scheme.
//!
//! Malformed input and non-membership are separate variants. After
//! `NotAMember` no claim may be submitted.

use thiserror::Error;

use super::value_objects::{Identity, Leaf};

/// Allowlist error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllowlistError {
    /// No identities were supplied; there is nothing to commit to.
    #[error("Allowlist is empty")]
    EmptyAllowlist,

    /// Input is not a well-formed account identifier.
    #[error("Malformed identity {input:?}: {reason}")]
    MalformedIdentity {
        /// The rejected text
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// An entry of an allowlist file failed to parse.
    #[error("Invalid allowlist entry #{index}: {source}")]
    InvalidEntry {
        /// Zero-based position in the input list
        index: usize,
        /// Underlying parse failure
        source: Box<AllowlistError>,
    },

    /// A 32-byte hash value (root, leaf, sibling) failed to parse.
    #[error("Malformed hash {input:?}: {reason}")]
    MalformedHash {
        /// The rejected text
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// Identity is well-formed but not part of the committed set.
    #[error("{0} is not a member of the allowlist")]
    NotAMember(Identity),

    /// Leaf is not part of the commitment tree.
    #[error("Leaf {0} is not in the commitment tree")]
    LeafNotInTree(Leaf),
}

impl AllowlistError {
    /// Shorthand for [`AllowlistError::MalformedIdentity`].
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentity {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by badly formed input rather than membership.
    pub fn is_malformed_input(&self) -> bool {
        match self {
            Self::MalformedIdentity { .. } | Self::MalformedHash { .. } => true,
            Self::InvalidEntry { source, .. } => source.is_malformed_input(),
            _ => false,
        }
    }
}
