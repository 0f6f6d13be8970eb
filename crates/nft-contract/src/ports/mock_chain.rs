//! # Mock Chain
//!
//! In-memory [`ChainClient`] that emulates the collection contract's external
//! interface: getters, owner-only setters, the two mint entry points with
//! their custom-error reverts, and deployment from registered creation code.
//!
//! Every accepted transaction is mined into its own block. With auto-mining
//! enabled the head also advances on every `block_number` poll, which lets
//! confirmation waits complete without a real clock.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use nft_allowlist::{encode_leaf, keccak256, verify_proof, MerkleRoot};
use parking_lot::Mutex;
use primitive_types::U256;
use rlp::RlpStream;

use super::outbound::ChainClient;
use crate::abi::{self, methods, CollectionError, RevertReason, Selector, Token};
use crate::domain::{
    Address, CallRequest, CollectionSettings, ContractError, SaleState, TransactionReceipt,
    TransactionRequest, TxHash,
};

/// Revert message of OpenZeppelin `Ownable`.
pub const OWNABLE_REVERT: &str = "Ownable: caller is not the owner";

/// Chain id of the hardhat network.
pub const MOCK_CHAIN_ID: u64 = 1337;

/// Hardhat account #0 (`0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266`).
pub const DEFAULT_SENDER: Address = Address::new([
    0xf3, 0x9f, 0xd6, 0xe5, 0x1a, 0xad, 0x88, 0xf6, 0xf4, 0xce, 0x6a, 0xb8, 0x82, 0x72, 0x79, 0xcf,
    0xff, 0xb9, 0x22, 0x66,
]);

// =============================================================================
// EMULATED CONTRACT
// =============================================================================

/// State of one emulated collection contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockCollection {
    /// `Ownable` owner.
    pub owner: Address,
    /// ERC-721 name.
    pub name: String,
    /// ERC-721 symbol.
    pub symbol: String,
    /// Sale phase.
    pub sale_state: SaleState,
    /// Allowlist root.
    pub merkle_root: MerkleRoot,
    /// Price per token.
    pub mint_price: U256,
    /// Per-transaction cap.
    pub max_mint_amount_per_tx: U256,
    /// Supply cap.
    pub max_supply: U256,
    /// Minted so far.
    pub total_supply: U256,
    /// Revealed base URI.
    pub base_uri: String,
    /// Placeholder URI.
    pub hidden_metadata_uri: String,
    /// Reveal flag.
    pub revealed: bool,
    /// Addresses that used their allowlist claim.
    pub claimed: BTreeSet<Address>,
    /// Contract balance in wei.
    pub balance: U256,
}

impl MockCollection {
    /// Freshly constructed contract.
    pub fn new(owner: Address, settings: &CollectionSettings) -> Self {
        Self {
            owner,
            name: settings.name.clone(),
            symbol: settings.symbol.clone(),
            sale_state: SaleState::Closed,
            merkle_root: MerkleRoot::default(),
            mint_price: settings.mint_price,
            max_mint_amount_per_tx: settings.max_mint_amount_per_tx,
            max_supply: settings.max_supply,
            total_supply: U256::zero(),
            base_uri: String::new(),
            hidden_metadata_uri: settings.hidden_metadata_uri.clone(),
            revealed: false,
            claimed: BTreeSet::new(),
            balance: U256::zero(),
        }
    }

    /// Run calldata against the contract.
    pub fn execute(&mut self, from: Address, data: &[u8], value: U256) -> Result<Vec<u8>, RevertReason> {
        let selector = data
            .get(..4)
            .and_then(|s| <Selector>::try_from(s).ok())
            .ok_or_else(empty_revert)?;
        let args = &data[4..];
        let signature = methods::lookup(selector).ok_or_else(empty_revert)?;

        match signature {
            methods::GET_SALE_STATE => Ok(ret(Token::Uint(U256::from(self.sale_state.code())))),
            methods::GET_MERKLE_ROOT => Ok(ret(Token::FixedBytes(*self.merkle_root.as_bytes()))),
            methods::GET_MINT_PRICE => Ok(ret(Token::Uint(self.mint_price))),
            methods::GET_MAX_MINT_AMOUNT_PER_TX => Ok(ret(Token::Uint(self.max_mint_amount_per_tx))),
            methods::GET_MAX_SUPPLY => Ok(ret(Token::Uint(self.max_supply))),
            methods::TOTAL_SUPPLY => Ok(ret(Token::Uint(self.total_supply))),
            methods::GET_BASE_URI => Ok(ret(Token::String(self.base_uri.clone()))),
            methods::GET_HIDDEN_METADATA_URI => Ok(ret(Token::String(self.hidden_metadata_uri.clone()))),
            methods::GET_REVEALED => Ok(ret(Token::Bool(self.revealed))),
            methods::OWNER => Ok(ret(Token::Address(self.owner))),
            methods::TOKEN_URI => self.token_uri(arg(abi::decode_uint(args, 0))?),

            methods::SET_CLOSED => self.set_state(from, SaleState::Closed),
            methods::SET_ALLOWLIST_ONLY => self.set_state(from, SaleState::Allowlist),
            methods::SET_PUBLIC_OPEN => self.set_state(from, SaleState::Public),
            methods::SET_MERKLE_ROOT => {
                let root = arg(abi::decode_bytes32(args, 0))?;
                self.only_owner(from)?;
                self.merkle_root = MerkleRoot::new(root);
                Ok(Vec::new())
            }
            methods::SET_MINT_PRICE => {
                let price = arg(abi::decode_uint(args, 0))?;
                self.only_owner(from)?;
                self.mint_price = price;
                Ok(Vec::new())
            }
            methods::SET_MAX_MINT_AMOUNT_PER_TX => {
                let amount = arg(abi::decode_uint(args, 0))?;
                self.only_owner(from)?;
                self.max_mint_amount_per_tx = amount;
                Ok(Vec::new())
            }
            methods::SET_BASE_URI => {
                let uri = arg(abi::decode_string(args, 0))?;
                self.only_owner(from)?;
                self.base_uri = uri;
                Ok(Vec::new())
            }
            methods::SET_HIDDEN_METADATA_URI => {
                let uri = arg(abi::decode_string(args, 0))?;
                self.only_owner(from)?;
                self.hidden_metadata_uri = uri;
                Ok(Vec::new())
            }
            methods::SET_REVEALED => {
                let flag = arg(abi::decode_bool(args, 0))?;
                self.only_owner(from)?;
                self.revealed = flag;
                Ok(Vec::new())
            }
            methods::WITHDRAW => {
                self.only_owner(from)?;
                self.balance = U256::zero();
                Ok(Vec::new())
            }

            methods::ALLOWLIST_MINT => {
                let amount = arg(abi::decode_uint(args, 0))?;
                let proof = arg(abi::decode_bytes32_array(args, 1))?;
                if self.sale_state != SaleState::Allowlist {
                    return Err(CollectionError::AllowlistSaleClosed.into());
                }
                self.mint_compliance(amount)?;
                self.check_payment(amount, value)?;
                if self.claimed.contains(&from) {
                    return Err(CollectionError::AddressAlreadyClaimed.into());
                }
                if !verify_proof(&self.merkle_root, &encode_leaf(&from), &proof) {
                    return Err(CollectionError::InvalidProof.into());
                }
                self.claimed.insert(from);
                self.mint(amount, value)
            }
            methods::PUBLIC_MINT => {
                let amount = arg(abi::decode_uint(args, 0))?;
                if self.sale_state != SaleState::Public {
                    return Err(CollectionError::PublicSaleClosed.into());
                }
                self.mint_compliance(amount)?;
                self.check_payment(amount, value)?;
                self.mint(amount, value)
            }
            methods::MINT_FOR_ADDRESS => {
                let amount = arg(abi::decode_uint(args, 0))?;
                arg(abi::decode_address(args, 1))?;
                self.only_owner(from)?;
                self.mint_compliance(amount)?;
                self.mint(amount, value)
            }
            _ => Err(empty_revert()),
        }
    }

    fn only_owner(&self, from: Address) -> Result<(), RevertReason> {
        if from != self.owner {
            return Err(RevertReason::Message(OWNABLE_REVERT.to_string()));
        }
        Ok(())
    }

    fn set_state(&mut self, from: Address, state: SaleState) -> Result<Vec<u8>, RevertReason> {
        self.only_owner(from)?;
        self.sale_state = state;
        Ok(Vec::new())
    }

    fn token_uri(&self, token_id: U256) -> Result<Vec<u8>, RevertReason> {
        if token_id.is_zero() || token_id > self.total_supply {
            return Err(CollectionError::NonexistentToken.into());
        }
        let uri = if self.revealed {
            format!("{}{}.json", self.base_uri, token_id)
        } else {
            self.hidden_metadata_uri.clone()
        };
        Ok(ret(Token::String(uri)))
    }

    fn mint_compliance(&self, amount: U256) -> Result<(), RevertReason> {
        if amount.is_zero() || amount > self.max_mint_amount_per_tx {
            return Err(CollectionError::InvalidMintAmount.into());
        }
        match self.total_supply.checked_add(amount) {
            Some(after) if after <= self.max_supply => Ok(()),
            _ => Err(CollectionError::MaxSupplyExceeded.into()),
        }
    }

    fn check_payment(&self, amount: U256, value: U256) -> Result<(), RevertReason> {
        match self.mint_price.checked_mul(amount) {
            Some(cost) if value >= cost => Ok(()),
            _ => Err(CollectionError::InsufficientFunds.into()),
        }
    }

    fn mint(&mut self, amount: U256, value: U256) -> Result<Vec<u8>, RevertReason> {
        self.total_supply += amount;
        self.balance = self.balance.saturating_add(value);
        Ok(Vec::new())
    }
}

fn ret(token: Token) -> Vec<u8> {
    abi::encode(&[token])
}

fn empty_revert() -> RevertReason {
    RevertReason::Unknown(Vec::new())
}

/// Calldata that fails to decode reverts without data.
fn arg<T>(decoded: Result<T, ContractError>) -> Result<T, RevertReason> {
    decoded.map_err(|_| empty_revert())
}

// =============================================================================
// MOCK CHAIN
// =============================================================================

struct ChainState {
    chain_id: u64,
    head: u64,
    sender: Address,
    auto_mine: bool,
    should_fail: bool,
    nonces: HashMap<Address, u64>,
    code: HashMap<Address, Vec<u8>>,
    collections: HashMap<Address, MockCollection>,
    creation_code: Vec<Vec<u8>>,
    receipts: HashMap<TxHash, TransactionReceipt>,
    sent: Vec<String>,
}

/// In-memory chain hosting emulated collection contracts.
pub struct MockChain {
    state: Mutex<ChainState>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new(MOCK_CHAIN_ID, DEFAULT_SENDER)
    }
}

impl MockChain {
    /// Empty chain at block 0.
    pub fn new(chain_id: u64, sender: Address) -> Self {
        Self {
            state: Mutex::new(ChainState {
                chain_id,
                head: 0,
                sender,
                auto_mine: false,
                should_fail: false,
                nonces: HashMap::new(),
                code: HashMap::new(),
                collections: HashMap::new(),
                creation_code: Vec::new(),
                receipts: HashMap::new(),
                sent: Vec::new(),
            }),
        }
    }

    /// Advance the head on every `block_number` poll.
    pub fn with_auto_mine(self, enabled: bool) -> Self {
        self.state.lock().auto_mine = enabled;
        self
    }

    /// Accept creation transactions whose code starts with `bytecode`.
    pub fn register_creation_code(&self, bytecode: Vec<u8>) {
        self.state.lock().creation_code.push(bytecode);
    }

    /// Install a collection owned by the current sender without a transaction.
    pub fn deploy_collection(&self, settings: &CollectionSettings) -> Address {
        let mut state = self.state.lock();
        let owner = state.sender;
        let nonce = state.bump_nonce(owner);
        let address = contract_address(&owner, nonce);
        state.collections.insert(address, MockCollection::new(owner, settings));
        state.code.insert(address, vec![0x60, 0x80, 0x60, 0x40]);
        address
    }

    /// Send subsequent transactions from another account.
    pub fn set_sender(&self, sender: Address) {
        self.state.lock().sender = sender;
    }

    /// Make every request fail at the transport level.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.state.lock().should_fail = should_fail;
    }

    /// Mine empty blocks.
    pub fn mine(&self, blocks: u64) {
        self.state.lock().head += blocks;
    }

    /// Copy of a collection's state.
    pub fn collection(&self, address: &Address) -> Option<MockCollection> {
        self.state.lock().collections.get(address).cloned()
    }

    /// Mutate a collection's state directly.
    pub fn update_collection(&self, address: &Address, update: impl FnOnce(&mut MockCollection)) {
        if let Some(collection) = self.state.lock().collections.get_mut(address) {
            update(collection);
        }
    }

    /// Methods of every accepted transaction, in order (`constructor` for deployments).
    pub fn sent_methods(&self) -> Vec<String> {
        self.state.lock().sent.clone()
    }

    fn check_transport(state: &ChainState) -> Result<(), ContractError> {
        if state.should_fail {
            return Err(ContractError::Transport("mock transport failure".to_string()));
        }
        Ok(())
    }
}

impl ChainState {
    fn bump_nonce(&mut self, account: Address) -> u64 {
        let nonce = self.nonces.entry(account).or_insert(0);
        let current = *nonce;
        *nonce += 1;
        current
    }

    fn deploy(&mut self, from: Address, nonce: u64, data: &[u8]) -> Result<Address, ContractError> {
        let code = self
            .creation_code
            .iter()
            .find(|code| data.starts_with(code))
            .cloned()
            .ok_or_else(|| ContractError::Rpc {
                code: -32000,
                message: "invalid opcode: unknown creation code".to_string(),
            })?;
        let settings = decode_constructor_args(&data[code.len()..])?;
        let address = contract_address(&from, nonce);
        self.collections.insert(address, MockCollection::new(from, &settings));
        self.code.insert(address, code);
        Ok(address)
    }
}

/// CREATE address: `keccak256(rlp([sender, nonce]))[12..]`.
pub fn contract_address(sender: &Address, nonce: u64) -> Address {
    let mut stream = RlpStream::new_list(2);
    stream.append(&sender.as_bytes().to_vec());
    stream.append(&nonce);
    let hash = keccak256(&stream.out());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address::new(bytes)
}

fn decode_constructor_args(args: &[u8]) -> Result<CollectionSettings, ContractError> {
    Ok(CollectionSettings {
        name: abi::decode_string(args, 0)?,
        symbol: abi::decode_string(args, 1)?,
        hidden_metadata_uri: abi::decode_string(args, 2)?,
        max_supply: abi::decode_uint(args, 3)?,
        mint_price: abi::decode_uint(args, 4)?,
        max_mint_amount_per_tx: abi::decode_uint(args, 5)?,
    })
}

#[async_trait]
impl ChainClient for MockChain {
    async fn chain_id(&self) -> Result<u64, ContractError> {
        let state = self.state.lock();
        Self::check_transport(&state)?;
        Ok(state.chain_id)
    }

    async fn block_number(&self) -> Result<u64, ContractError> {
        let mut state = self.state.lock();
        Self::check_transport(&state)?;
        let head = state.head;
        if state.auto_mine {
            state.head += 1;
        }
        Ok(head)
    }

    async fn call(&self, request: &CallRequest) -> Result<Vec<u8>, ContractError> {
        let state = self.state.lock();
        Self::check_transport(&state)?;
        let from = request.from.unwrap_or_default();
        match state.collections.get(&request.to) {
            Some(collection) => collection
                .clone()
                .execute(from, &request.data, request.value.unwrap_or_default())
                .map_err(ContractError::from),
            None => Ok(Vec::new()),
        }
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, ContractError> {
        let mut state = self.state.lock();
        Self::check_transport(&state)?;

        let from = state.sender;
        let nonce = state.nonces.get(&from).copied().unwrap_or(0);

        let (contract_address, method) = match request.to {
            None => (Some(state.deploy(from, nonce, &request.data)?), "constructor"),
            Some(to) => {
                let method = request
                    .data
                    .get(..4)
                    .and_then(|s| <Selector>::try_from(s).ok())
                    .and_then(methods::lookup)
                    .unwrap_or("transfer");
                if let Some(collection) = state.collections.get_mut(&to) {
                    let mut next = collection.clone();
                    next.execute(from, &request.data, request.value)?;
                    *collection = next;
                }
                (None, method)
            }
        };

        state.bump_nonce(from);
        state.head += 1;

        let mut preimage = from.as_bytes().to_vec();
        preimage.extend_from_slice(&nonce.to_be_bytes());
        preimage.extend_from_slice(&request.data);
        let tx_hash = keccak256(&preimage);

        let receipt = TransactionReceipt {
            tx_hash,
            block_number: state.head,
            success: true,
            contract_address,
            gas_used: 21_000 + 16 * request.data.len() as u64,
        };
        state.receipts.insert(tx_hash, receipt);
        state.sent.push(method.to_string());
        Ok(tx_hash)
    }

    async fn transaction_receipt(
        &self,
        tx_hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, ContractError> {
        let state = self.state.lock();
        Self::check_transport(&state)?;
        Ok(state.receipts.get(tx_hash).cloned())
    }

    async fn code_at(&self, address: &Address) -> Result<Vec<u8>, ContractError> {
        let state = self.state.lock();
        Self::check_transport(&state)?;
        Ok(state.code.get(address).cloned().unwrap_or_default())
    }

    fn sender(&self) -> Address {
        self.state.lock().sender
    }
}
