//! # Domain Value Objects
//!
//! Addresses, hashes, wei amounts and the hex forms they travel in over
//! JSON-RPC.

use primitive_types::U256;

use super::errors::ContractError;

/// 20-byte account address (same type the allowlist commits to).
pub use nft_allowlist::Identity as Address;

/// 32-byte hash (transaction hashes, bytecode hashes).
pub use nft_allowlist::Hash;

/// Transaction hash.
pub type TxHash = Hash;

/// Amounts in wei.
pub type Wei = U256;

/// Decimals of the native gas token.
pub const ETHER_DECIMALS: usize = 18;

/// `0x`-prefixed lowercase hex of arbitrary bytes.
pub fn to_hex_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode `0x`-prefixed hex bytes. `"0x"` decodes to an empty vector.
pub fn from_hex_data(text: &str) -> Result<Vec<u8>, ContractError> {
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| ContractError::InvalidResponse(format!("missing 0x prefix: {text:?}")))?;
    hex::decode(digits).map_err(|e| ContractError::InvalidResponse(format!("bad hex {text:?}: {e}")))
}

/// `0x`-prefixed lowercase hex of a hash.
pub fn to_hex_hash(hash: &Hash) -> String {
    to_hex_data(hash)
}

/// Decode a 32-byte hash.
pub fn from_hex_hash(text: &str) -> Result<Hash, ContractError> {
    let bytes = from_hex_data(text)?;
    <Hash>::try_from(bytes.as_slice())
        .map_err(|_| ContractError::InvalidResponse(format!("expected 32 bytes: {text:?}")))
}

/// JSON-RPC quantity encoding (`0x0`, `0x1a`, no leading zeros).
pub fn to_quantity(value: U256) -> String {
    format!("{value:#x}")
}

/// Decode a JSON-RPC quantity.
pub fn from_quantity(text: &str) -> Result<U256, ContractError> {
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| ContractError::InvalidResponse(format!("missing 0x prefix: {text:?}")))?;
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| ContractError::InvalidResponse(format!("bad quantity {text:?}: {e}")))
}

/// Decode a JSON-RPC quantity that must fit a `u64`.
pub fn from_quantity_u64(text: &str) -> Result<u64, ContractError> {
    let value = from_quantity(text)?;
    if value.bits() > 64 {
        return Err(ContractError::InvalidResponse(format!(
            "quantity {text} exceeds u64"
        )));
    }
    Ok(value.low_u64())
}

/// Parse a decimal ether amount ("0.02", "1", "1.5") into wei.
pub fn parse_ether(text: &str) -> Result<Wei, ContractError> {
    let text = text.trim();
    let invalid = |reason: &str| ContractError::InvalidValue(format!("{text:?}: {reason}"));

    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("empty amount"));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid("not a decimal number"));
    }
    if fraction.len() > ETHER_DECIMALS {
        return Err(invalid("more than 18 decimal places"));
    }

    let unit = U256::exp10(ETHER_DECIMALS);
    let whole = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| invalid("amount too large"))?
    };
    let fraction = if fraction.is_empty() {
        U256::zero()
    } else {
        let padded = format!("{fraction:0<width$}", width = ETHER_DECIMALS);
        U256::from_dec_str(&padded).map_err(|_| invalid("bad fraction"))?
    };

    whole
        .checked_mul(unit)
        .and_then(|wei| wei.checked_add(fraction))
        .ok_or_else(|| invalid("amount too large"))
}

/// Format wei as a decimal ether amount ("0.02", "1.0").
pub fn format_ether(wei: Wei) -> String {
    let unit = U256::exp10(ETHER_DECIMALS);
    let whole = wei / unit;
    let fraction = wei % unit;
    let fraction = format!("{:0>width$}", fraction.to_string(), width = ETHER_DECIMALS);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}
