//! # Contract ABI Codec
//!
//! Solidity ABI encoding for the handful of types the collection contract
//! uses, plus single-value return decoding and revert-data decoding.
//!
//! ## Layout
//!
//! ```text
//! selector(4) │ head: one 32-byte word per argument │ tail: dynamic payloads
//!                  static  → value
//!                  dynamic → offset into the argument block
//! ```

pub mod methods;
pub mod revert;

use nft_allowlist::keccak256;
use primitive_types::U256;

use crate::domain::{Address, ContractError, Hash};

pub use revert::{CollectionError, RevertReason, CUSTOM_ERROR_PREFIX, ERROR_STRING_SELECTOR};

/// ABI word size.
pub const WORD: usize = 32;

/// A 4-byte function or error selector.
pub type Selector = [u8; 4];

/// First four bytes of keccak256 of a canonical signature.
pub fn selector(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

// =============================================================================
// ENCODING
// =============================================================================

/// An ABI value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// `uint256` / `uint8`
    Uint(U256),
    /// `bool`
    Bool(bool),
    /// `address`
    Address(Address),
    /// `bytes32`
    FixedBytes(Hash),
    /// `string`
    String(String),
    /// `bytes32[]`
    FixedBytesArray(Vec<Hash>),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        matches!(self, Token::String(_) | Token::FixedBytesArray(_))
    }
}

/// Encode an argument tuple (no selector).
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len = WORD * tokens.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&uint_word(U256::from(head_len + tail.len())));
            encode_tail(token, &mut tail);
        } else {
            head.extend_from_slice(&static_word(token));
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Selector followed by the encoded arguments.
pub fn encode_call(signature: &str, tokens: &[Token]) -> Vec<u8> {
    let mut data = selector(signature).to_vec();
    data.extend_from_slice(&encode(tokens));
    data
}

fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

fn static_word(token: &Token) -> [u8; WORD] {
    match token {
        Token::Uint(value) => uint_word(*value),
        Token::Bool(flag) => uint_word(U256::from(u8::from(*flag))),
        Token::Address(address) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(address.as_bytes());
            word
        }
        Token::FixedBytes(hash) => *hash,
        Token::String(_) | Token::FixedBytesArray(_) => [0u8; WORD],
    }
}

fn encode_tail(token: &Token, tail: &mut Vec<u8>) {
    match token {
        Token::String(text) => {
            let bytes = text.as_bytes();
            tail.extend_from_slice(&uint_word(U256::from(bytes.len())));
            tail.extend_from_slice(bytes);
            let padding = (WORD - bytes.len() % WORD) % WORD;
            tail.resize(tail.len() + padding, 0);
        }
        Token::FixedBytesArray(items) => {
            tail.extend_from_slice(&uint_word(U256::from(items.len())));
            for item in items {
                tail.extend_from_slice(item);
            }
        }
        _ => {}
    }
}

// =============================================================================
// DECODING
// =============================================================================

fn abi_error(message: impl Into<String>) -> ContractError {
    ContractError::Abi(message.into())
}

/// The `index`-th 32-byte word of `data`.
pub fn word(data: &[u8], index: usize) -> Result<&[u8], ContractError> {
    let start = index
        .checked_mul(WORD)
        .ok_or_else(|| abi_error("word index overflow"))?;
    data.get(start..start + WORD)
        .ok_or_else(|| abi_error(format!("data too short for word {index} ({} bytes)", data.len())))
}

/// Decode word `index` as `uint256`.
pub fn decode_uint(data: &[u8], index: usize) -> Result<U256, ContractError> {
    Ok(U256::from_big_endian(word(data, index)?))
}

/// Decode word `index` as `bool`; anything but 0 or 1 is invalid.
pub fn decode_bool(data: &[u8], index: usize) -> Result<bool, ContractError> {
    let value = decode_uint(data, index)?;
    if value.is_zero() {
        Ok(false)
    } else if value == U256::one() {
        Ok(true)
    } else {
        Err(abi_error(format!("invalid bool word {value:#x}")))
    }
}

/// Decode word `index` as `address`.
pub fn decode_address(data: &[u8], index: usize) -> Result<Address, ContractError> {
    let word = word(data, index)?;
    if word[..12].iter().any(|&b| b != 0) {
        return Err(abi_error("address word has non-zero high bytes"));
    }
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&word[12..]);
    Ok(Address::new(bytes))
}

/// Decode word `index` as `bytes32`.
pub fn decode_bytes32(data: &[u8], index: usize) -> Result<Hash, ContractError> {
    let mut hash = [0u8; WORD];
    hash.copy_from_slice(word(data, index)?);
    Ok(hash)
}

fn decode_offset(data: &[u8], index: usize) -> Result<usize, ContractError> {
    to_usize(decode_uint(data, index)?)
}

fn to_usize(value: U256) -> Result<usize, ContractError> {
    if value.bits() > 32 {
        return Err(abi_error(format!("offset or length {value} out of range")));
    }
    Ok(value.low_u64() as usize)
}

/// Decode the dynamic `string` referenced by word `index`.
pub fn decode_string(data: &[u8], index: usize) -> Result<String, ContractError> {
    let offset = decode_offset(data, index)?;
    let body = data
        .get(offset..)
        .ok_or_else(|| abi_error("string offset beyond data"))?;
    let len = to_usize(decode_uint(body, 0)?)?;
    let bytes = body
        .get(WORD..WORD + len)
        .ok_or_else(|| abi_error("string length beyond data"))?;
    String::from_utf8(bytes.to_vec()).map_err(|e| abi_error(format!("string is not UTF-8: {e}")))
}

/// Decode the dynamic `bytes32[]` referenced by word `index`.
pub fn decode_bytes32_array(data: &[u8], index: usize) -> Result<Vec<Hash>, ContractError> {
    let offset = decode_offset(data, index)?;
    let body = data
        .get(offset..)
        .ok_or_else(|| abi_error("array offset beyond data"))?;
    let len = to_usize(decode_uint(body, 0)?)?;
    (0..len).map(|i| decode_bytes32(body, i + 1)).collect()
}
