//! Method catalogue of the collection contract.
//!
//! Signatures are canonical (no spaces, no parameter names) so they can be
//! hashed into selectors directly.

use nft_allowlist::MerkleRoot;
use primitive_types::U256;

use super::{encode, encode_call, selector, Selector, Token};
use crate::domain::{Address, CollectionSettings, Hash};

// Getters
/// `getSaleState() -> uint8`
pub const GET_SALE_STATE: &str = "getSaleState()";
/// `getMerkleRoot() -> bytes32`
pub const GET_MERKLE_ROOT: &str = "getMerkleRoot()";
/// `getMintPrice() -> uint256`
pub const GET_MINT_PRICE: &str = "getMintPrice()";
/// `getMaxMintAmountPerTx() -> uint256`
pub const GET_MAX_MINT_AMOUNT_PER_TX: &str = "getMaxMintAmountPerTx()";
/// `getMaxSupply() -> uint256`
pub const GET_MAX_SUPPLY: &str = "getMaxSupply()";
/// `totalSupply() -> uint256`
pub const TOTAL_SUPPLY: &str = "totalSupply()";
/// `getBaseUri() -> string`
pub const GET_BASE_URI: &str = "getBaseUri()";
/// `getHiddenMetadataUri() -> string`
pub const GET_HIDDEN_METADATA_URI: &str = "getHiddenMetadataUri()";
/// `getRevealed() -> bool`
pub const GET_REVEALED: &str = "getRevealed()";
/// `owner() -> address`
pub const OWNER: &str = "owner()";
/// `tokenURI(uint256) -> string`
pub const TOKEN_URI: &str = "tokenURI(uint256)";

// Owner-only setters
/// Close both sales.
pub const SET_CLOSED: &str = "setClosed()";
/// Open the allowlist sale.
pub const SET_ALLOWLIST_ONLY: &str = "setAllowlistOnly()";
/// Open the public sale.
pub const SET_PUBLIC_OPEN: &str = "setPublicOpen()";
/// Publish the allowlist root.
pub const SET_MERKLE_ROOT: &str = "setMerkleRoot(bytes32)";
/// Set the per-token price in wei.
pub const SET_MINT_PRICE: &str = "setMintPrice(uint256)";
/// Set the per-transaction cap.
pub const SET_MAX_MINT_AMOUNT_PER_TX: &str = "setMaxMintAmountPerTx(uint256)";
/// Set the revealed metadata base URI.
pub const SET_BASE_URI: &str = "setBaseUri(string)";
/// Toggle reveal.
pub const SET_REVEALED: &str = "setRevealed(bool)";
/// Replace the placeholder URI.
pub const SET_HIDDEN_METADATA_URI: &str = "setHiddenMetadataUri(string)";
/// Owner mint to an arbitrary receiver, ignoring the sale phase.
pub const MINT_FOR_ADDRESS: &str = "mintForAddress(uint256,address)";
/// Send the contract balance to the owner.
pub const WITHDRAW: &str = "withdraw()";

// Mint entry points
/// Allowlist mint with a Merkle proof.
pub const ALLOWLIST_MINT: &str = "allowlistMint(uint256,bytes32[])";
/// Public mint.
pub const PUBLIC_MINT: &str = "publicMint(uint256)";

/// Every function the tooling calls.
pub const ALL: [&str; 24] = [
    GET_SALE_STATE,
    GET_MERKLE_ROOT,
    GET_MINT_PRICE,
    GET_MAX_MINT_AMOUNT_PER_TX,
    GET_MAX_SUPPLY,
    TOTAL_SUPPLY,
    GET_BASE_URI,
    GET_HIDDEN_METADATA_URI,
    GET_REVEALED,
    OWNER,
    TOKEN_URI,
    SET_CLOSED,
    SET_ALLOWLIST_ONLY,
    SET_PUBLIC_OPEN,
    SET_MERKLE_ROOT,
    SET_MINT_PRICE,
    SET_MAX_MINT_AMOUNT_PER_TX,
    SET_BASE_URI,
    SET_REVEALED,
    SET_HIDDEN_METADATA_URI,
    MINT_FOR_ADDRESS,
    WITHDRAW,
    ALLOWLIST_MINT,
    PUBLIC_MINT,
];

/// Resolve a selector back to its signature.
pub fn lookup(sel: Selector) -> Option<&'static str> {
    ALL.iter().copied().find(|signature| selector(signature) == sel)
}

/// Calldata for an argument-less function.
pub fn call(signature: &str) -> Vec<u8> {
    encode_call(signature, &[])
}

/// `setMerkleRoot(root)`
pub fn set_merkle_root(root: &MerkleRoot) -> Vec<u8> {
    encode_call(SET_MERKLE_ROOT, &[Token::FixedBytes(*root.as_bytes())])
}

/// `setMintPrice(price)`
pub fn set_mint_price(price: U256) -> Vec<u8> {
    encode_call(SET_MINT_PRICE, &[Token::Uint(price)])
}

/// `setMaxMintAmountPerTx(amount)`
pub fn set_max_mint_amount_per_tx(amount: U256) -> Vec<u8> {
    encode_call(SET_MAX_MINT_AMOUNT_PER_TX, &[Token::Uint(amount)])
}

/// `setBaseUri(uri)`
pub fn set_base_uri(uri: &str) -> Vec<u8> {
    encode_call(SET_BASE_URI, &[Token::String(uri.to_string())])
}

/// `setRevealed(flag)`
pub fn set_revealed(flag: bool) -> Vec<u8> {
    encode_call(SET_REVEALED, &[Token::Bool(flag)])
}

/// `setHiddenMetadataUri(uri)`
pub fn set_hidden_metadata_uri(uri: &str) -> Vec<u8> {
    encode_call(SET_HIDDEN_METADATA_URI, &[Token::String(uri.to_string())])
}

/// `tokenURI(token_id)`
pub fn token_uri(token_id: u64) -> Vec<u8> {
    encode_call(TOKEN_URI, &[Token::Uint(U256::from(token_id))])
}

/// `mintForAddress(amount, receiver)`
pub fn mint_for_address(amount: u64, receiver: Address) -> Vec<u8> {
    encode_call(
        MINT_FOR_ADDRESS,
        &[Token::Uint(U256::from(amount)), Token::Address(receiver)],
    )
}

/// `allowlistMint(amount, proof)`
pub fn allowlist_mint(amount: u64, proof: &[Hash]) -> Vec<u8> {
    encode_call(
        ALLOWLIST_MINT,
        &[
            Token::Uint(U256::from(amount)),
            Token::FixedBytesArray(proof.to_vec()),
        ],
    )
}

/// `publicMint(amount)`
pub fn public_mint(amount: u64) -> Vec<u8> {
    encode_call(PUBLIC_MINT, &[Token::Uint(U256::from(amount))])
}

/// ABI-encoded constructor arguments, appended to the creation bytecode.
///
/// `(string name, string symbol, string hiddenMetadataUri, uint256 maxSupply,
/// uint256 mintPrice, uint256 maxMintAmountPerTx)`
pub fn constructor_args(settings: &CollectionSettings) -> Vec<u8> {
    encode(&[
        Token::String(settings.name.clone()),
        Token::String(settings.symbol.clone()),
        Token::String(settings.hidden_metadata_uri.clone()),
        Token::Uint(settings.max_supply),
        Token::Uint(settings.mint_price),
        Token::Uint(settings.max_mint_amount_per_tx),
    ])
}
