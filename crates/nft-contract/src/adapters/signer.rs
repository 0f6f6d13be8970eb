//! # Local Transaction Signer
//!
//! Signs EIP-155 legacy transactions with a secp256k1 key held in
//! configuration, for networks whose node does not manage accounts.
//!
//! ```text
//! signing payload = rlp([nonce, gasPrice, gas, to, value, data, chainId, 0, 0])
//! raw transaction = rlp([nonce, gasPrice, gas, to, value, data, v, r, s])
//!                   v = recovery_id + 35 + 2 * chainId
//! ```

use std::fmt;

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use nft_allowlist::keccak256;
use primitive_types::U256;
use rlp::RlpStream;

use crate::domain::{Address, ContractError, Hash, Wei};

/// An unsigned legacy transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyTransaction {
    /// Sender nonce.
    pub nonce: u64,
    /// Gas price in wei.
    pub gas_price: Wei,
    /// Gas limit.
    pub gas_limit: u64,
    /// Target; `None` for contract creation.
    pub to: Option<Address>,
    /// Attached value.
    pub value: Wei,
    /// Calldata or creation code.
    pub data: Vec<u8>,
    /// EIP-155 chain id.
    pub chain_id: u64,
}

impl LegacyTransaction {
    fn begin(&self, fields: usize) -> RlpStream {
        let mut stream = RlpStream::new_list(fields);
        stream.append(&self.nonce);
        stream.append(&self.gas_price);
        stream.append(&self.gas_limit);
        match &self.to {
            Some(address) => stream.append(&address.as_bytes().to_vec()),
            None => stream.append_empty_data(),
        };
        stream.append(&self.value);
        stream.append(&self.data);
        stream
    }

    /// RLP payload whose hash is signed.
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut stream = self.begin(9);
        stream.append(&self.chain_id);
        stream.append(&0u8);
        stream.append(&0u8);
        stream.out().to_vec()
    }

    /// keccak256 of the signing payload.
    pub fn signing_hash(&self) -> Hash {
        keccak256(&self.signing_payload())
    }

    /// Raw signed transaction for `eth_sendRawTransaction`.
    pub fn encode_signed(&self, v: u64, r: &[u8], s: &[u8]) -> Vec<u8> {
        let mut stream = self.begin(9);
        stream.append(&v);
        stream.append(&U256::from_big_endian(r));
        stream.append(&U256::from_big_endian(s));
        stream.out().to_vec()
    }
}

/// Secp256k1 key used to sign transactions locally.
pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl LocalSigner {
    /// Load a hex private key (`0x` prefix optional).
    pub fn from_hex(secret: &str) -> Result<Self, ContractError> {
        let secret = secret.trim();
        let digits = secret.strip_prefix("0x").unwrap_or(secret);
        let bytes = hex::decode(digits)
            .map_err(|e| ContractError::Signer(format!("private key is not hex: {e}")))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|_| ContractError::Signer("invalid secp256k1 private key".to_string()))?;
        let address = address_from_key(key.verifying_key());
        Ok(Self { key, address })
    }

    /// Account controlled by this key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a transaction and return the raw encoding.
    pub fn sign_transaction(&self, tx: &LegacyTransaction) -> Result<Vec<u8>, ContractError> {
        let hash = tx.signing_hash();
        let (signature, recovery_id) = self.sign_hash(&hash)?;
        let bytes = signature.to_bytes();
        let v = u64::from(recovery_id.to_byte()) + 35 + 2 * tx.chain_id;
        Ok(tx.encode_signed(v, &bytes[..32], &bytes[32..]))
    }

    /// Low-s recoverable signature over a 32-byte hash.
    pub fn sign_hash(&self, hash: &Hash) -> Result<(Signature, RecoveryId), ContractError> {
        self.key
            .sign_prehash_recoverable(hash)
            .map_err(|e| ContractError::Signer(format!("signing failed: {e}")))
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Ethereum address of a public key: last 20 bytes of keccak256(x ‖ y).
pub fn address_from_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address::new(bytes)
}

/// Recover the signer of a hash.
pub fn recover_signer(
    hash: &Hash,
    signature: &Signature,
    recovery_id: RecoveryId,
) -> Result<Address, ContractError> {
    let key = VerifyingKey::recover_from_prehash(hash, signature, recovery_id)
        .map_err(|_| ContractError::Signer("public key recovery failed".to_string()))?;
    Ok(address_from_key(&key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HARDHAT_KEY_0: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn eip155_example() -> LegacyTransaction {
        LegacyTransaction {
            nonce: 9,
            gas_price: U256::from(20_000_000_000u64),
            gas_limit: 21_000,
            to: Some(Address::new([0x35; 20])),
            value: U256::exp10(18),
            data: Vec::new(),
            chain_id: 1,
        }
    }

    #[test]
    fn test_address_from_hardhat_key() {
        let signer = LocalSigner::from_hex(HARDHAT_KEY_0).unwrap();
        assert_eq!(
            signer.address().to_checksum(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn test_eip155_signing_payload() {
        let tx = eip155_example();
        assert_eq!(
            hex::encode(tx.signing_payload()),
            "ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080"
        );
        assert_eq!(
            hex::encode(tx.signing_hash()),
            "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
        );
    }

    #[test]
    fn test_sign_and_recover() {
        let signer = LocalSigner::from_hex(&"46".repeat(32)).unwrap();
        let hash = eip155_example().signing_hash();
        let (signature, recovery_id) = signer.sign_hash(&hash).unwrap();
        assert_eq!(recover_signer(&hash, &signature, recovery_id).unwrap(), signer.address());
    }

    #[test]
    fn test_signed_transaction_v() {
        let signer = LocalSigner::from_hex(HARDHAT_KEY_0).unwrap();
        let mut tx = eip155_example();
        tx.chain_id = 1337;
        let raw = signer.sign_transaction(&tx).unwrap();

        // v = 35 + 2 * 1337 + {0,1} = 2709 or 2710, RLP-encoded as 0x82 0x0a 0x95/0x96
        let v_pos = raw
            .windows(3)
            .position(|w| w == [0x82, 0x0a, 0x95] || w == [0x82, 0x0a, 0x96]);
        assert!(v_pos.is_some());
        assert!(raw[0] >= 0xf8);
    }

    #[test]
    fn test_contract_creation_payload() {
        let mut tx = eip155_example();
        tx.to = None;
        // Empty `to` is the RLP empty string
        assert_eq!(
            hex::encode(tx.signing_payload()),
            "d8098504a817c80082520880880de0b6b3a764000080018080"
        );
    }

    #[test]
    fn test_long_calldata_uses_long_list_header() {
        let mut tx = eip155_example();
        tx.data = vec![0xab; 60];
        let payload = tx.signing_payload();

        // 43 bytes of other fields plus the 62-byte data string: 0xf8 0x69
        assert_eq!(&payload[..2], &[0xf8, 0x69]);
        let data_at = payload.len() - 3 - 62;
        assert_eq!(&payload[data_at..data_at + 2], &[0xb8, 60]);
        assert_eq!(payload.len(), 2 + 0x69);
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(LocalSigner::from_hex("0xzz").is_err());
        assert!(LocalSigner::from_hex(&"00".repeat(32)).is_err());
        assert!(LocalSigner::from_hex("0x1234").is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let signer = LocalSigner::from_hex(HARDHAT_KEY_0).unwrap();
        let debug = format!("{signer:?}");
        assert!(!debug.contains("ac0974be"));
    }
}
