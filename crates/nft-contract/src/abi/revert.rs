//! Revert data decoding.
//!
//! A reverted call returns either `Error(string)` (require messages such as
//! `Ownable: caller is not the owner`), one of the collection's custom
//! errors, or something else entirely.

use std::fmt;

use super::{decode_string, encode, selector, Selector, Token};
use crate::domain::{MintKind, MintRejection};

/// `Error(string)` selector.
pub const ERROR_STRING_SELECTOR: Selector = [0x08, 0xc3, 0x79, 0xa0];

/// Prefix of every custom error the collection declares.
pub const CUSTOM_ERROR_PREFIX: &str = "MyNftCollection__";

/// Custom errors of the collection contract (all parameterless).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionError {
    /// Allowlist mint outside the allowlist phase.
    AllowlistSaleClosed,
    /// Public mint outside the public phase.
    PublicSaleClosed,
    /// Amount zero or above the per-tx cap.
    InvalidMintAmount,
    /// Supply cap reached.
    MaxSupplyExceeded,
    /// Not enough value attached.
    InsufficientFunds,
    /// Proof does not match the stored root.
    InvalidProof,
    /// Allowlist claim already used.
    AddressAlreadyClaimed,
    /// `tokenURI` for a token that does not exist.
    NonexistentToken,
}

impl CollectionError {
    /// All custom errors.
    pub const ALL: [CollectionError; 8] = [
        Self::AllowlistSaleClosed,
        Self::PublicSaleClosed,
        Self::InvalidMintAmount,
        Self::MaxSupplyExceeded,
        Self::InsufficientFunds,
        Self::InvalidProof,
        Self::AddressAlreadyClaimed,
        Self::NonexistentToken,
    ];

    /// Name without the contract prefix.
    pub fn name(self) -> &'static str {
        match self {
            Self::AllowlistSaleClosed => "AllowlistSaleClosed",
            Self::PublicSaleClosed => "PublicSaleClosed",
            Self::InvalidMintAmount => "InvalidMintAmount",
            Self::MaxSupplyExceeded => "MaxSupplyExceeded",
            Self::InsufficientFunds => "InsufficientFunds",
            Self::InvalidProof => "InvalidProof",
            Self::AddressAlreadyClaimed => "AddressAlreadyClaimed",
            Self::NonexistentToken => "NonexistentToken",
        }
    }

    /// Canonical signature, e.g. `MyNftCollection__InvalidProof()`.
    pub fn signature(self) -> String {
        format!("{CUSTOM_ERROR_PREFIX}{}()", self.name())
    }

    /// Error selector.
    pub fn selector(self) -> Selector {
        selector(&self.signature())
    }

    /// Match a selector against the known custom errors.
    pub fn from_selector(sel: Selector) -> Option<Self> {
        Self::ALL.into_iter().find(|err| err.selector() == sel)
    }
}

/// Decoded revert payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevertReason {
    /// `Error(string)` message.
    Message(String),
    /// A collection custom error.
    Custom(CollectionError),
    /// Empty or unrecognised revert data.
    Unknown(Vec<u8>),
}

impl RevertReason {
    /// Decode raw revert data.
    pub fn decode(data: &[u8]) -> Self {
        let Some(sel) = data.get(..4).and_then(|s| <Selector>::try_from(s).ok()) else {
            return Self::Unknown(data.to_vec());
        };
        if sel == ERROR_STRING_SELECTOR {
            return match decode_string(&data[4..], 0) {
                Ok(message) => Self::Message(message),
                Err(_) => Self::Unknown(data.to_vec()),
            };
        }
        match CollectionError::from_selector(sel) {
            Some(err) => Self::Custom(err),
            None => Self::Unknown(data.to_vec()),
        }
    }

    /// Encode back into revert data (what a node returns).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Message(message) => {
                let mut data = ERROR_STRING_SELECTOR.to_vec();
                data.extend_from_slice(&encode(&[Token::String(message.clone())]));
                data
            }
            Self::Custom(err) => err.selector().to_vec(),
            Self::Unknown(data) => data.clone(),
        }
    }

    /// The mint guard this revert corresponds to, if any.
    pub fn as_mint_rejection(&self) -> Option<MintRejection> {
        let Self::Custom(err) = self else {
            return None;
        };
        match err {
            CollectionError::AllowlistSaleClosed => Some(MintRejection::SaleClosed(MintKind::Allowlist)),
            CollectionError::PublicSaleClosed => Some(MintRejection::SaleClosed(MintKind::Public)),
            CollectionError::InvalidMintAmount => Some(MintRejection::InvalidMintAmount),
            CollectionError::MaxSupplyExceeded => Some(MintRejection::MaxSupplyExceeded),
            CollectionError::InsufficientFunds => Some(MintRejection::InsufficientFunds),
            CollectionError::InvalidProof => Some(MintRejection::InvalidProof),
            CollectionError::AddressAlreadyClaimed => Some(MintRejection::AddressAlreadyClaimed),
            CollectionError::NonexistentToken => None,
        }
    }
}

impl From<CollectionError> for RevertReason {
    fn from(err: CollectionError) -> Self {
        Self::Custom(err)
    }
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.write_str(message),
            Self::Custom(err) => f.write_str(&err.signature()),
            Self::Unknown(data) if data.is_empty() => f.write_str("no revert data"),
            Self::Unknown(data) => write!(f, "unrecognised revert data 0x{}", hex::encode(data)),
        }
    }
}
