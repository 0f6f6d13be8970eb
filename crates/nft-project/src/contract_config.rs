//! # Contract Config
//!
//! The front end's `contract-config.json`: collection identity, sale terms and
//! the addresses the collection is deployed at per chain.
//!
//! ```json
//! {
//!   "contractName": "MyNftCollection",
//!   "nftName": "My NFT Collection",
//!   "nftSymbol": "MNC",
//!   "maxSupply": 1000,
//!   "gasToken": "ETH",
//!   "saleType": {
//!     "allowlistSale": { "mintPrice": "0.01", "maxMintAmountPerTx": 2 },
//!     "publicSale": { "mintPrice": "0.02", "maxMintAmountPerTx": 5 }
//!   },
//!   "contractAddresses": { "1337": ["0x5FbDB2315678afecb367f032d93F642f64180aa3"] }
//! }
//! ```
//!
//! Fields the tooling does not know are kept as-is when the file is rewritten.

use std::collections::BTreeMap;
use std::path::Path;

use nft_contract::{parse_ether, Address, CollectionSettings, SaleTerms};
use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use tracing::info;

use crate::errors::ProjectError;
use crate::files::{read_json, write_json};

/// Terms of one sale phase.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTypeConfig {
    /// Price per token in the gas token, decimal (e.g. `"0.01"`).
    #[serde(deserialize_with = "string_or_number")]
    pub mint_price: String,
    /// Per-transaction mint cap.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub max_mint_amount_per_tx: u64,
}

impl SaleTypeConfig {
    /// On-chain terms (price in wei).
    pub fn terms(&self) -> Result<SaleTerms, ProjectError> {
        let price = parse_ether(&self.mint_price)?;
        Ok(SaleTerms::new(price, self.max_mint_amount_per_tx))
    }
}

/// Both sale phases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTypes {
    /// Allowlist phase.
    pub allowlist_sale: SaleTypeConfig,
    /// Public phase.
    pub public_sale: SaleTypeConfig,
}

/// `contract-config.json`.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractConfig {
    /// Solidity contract name (artifact and deployment name).
    pub contract_name: String,
    /// ERC-721 name.
    pub nft_name: String,
    /// ERC-721 symbol.
    pub nft_symbol: String,
    /// Collection size cap.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub max_supply: u64,
    /// Gas token symbol shown in messages.
    #[serde(default = "default_gas_token")]
    pub gas_token: String,
    /// Sale terms.
    pub sale_type: SaleTypes,
    /// Chain id (decimal string) to deployed addresses, oldest first.
    #[serde(default)]
    pub contract_addresses: BTreeMap<String, Vec<String>>,
    /// Front-end fields not used by the tooling.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_gas_token() -> String {
    "ETH".to_string()
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

impl ContractConfig {
    /// Load from `path`.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let config: Self = read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Write to `path` atomically.
    pub fn save(&self, path: &Path) -> Result<(), ProjectError> {
        write_json(path, self)
    }

    /// Reject values the contract constructor would refuse or misread.
    pub fn validate(&self) -> Result<(), ProjectError> {
        if self.contract_name.trim().is_empty() {
            return Err(ProjectError::InvalidConfig("contractName is empty".to_string()));
        }
        if self.max_supply == 0 {
            return Err(ProjectError::InvalidConfig("maxSupply must be positive".to_string()));
        }
        for (phase, sale) in [
            ("allowlistSale", &self.sale_type.allowlist_sale),
            ("publicSale", &self.sale_type.public_sale),
        ] {
            if sale.max_mint_amount_per_tx == 0 {
                return Err(ProjectError::InvalidConfig(format!(
                    "{phase}.maxMintAmountPerTx must be positive"
                )));
            }
            parse_ether(&sale.mint_price).map_err(|e| {
                ProjectError::InvalidConfig(format!("{phase}.mintPrice: {e}"))
            })?;
        }
        Ok(())
    }

    /// Constructor settings. The collection is deployed with the allowlist terms.
    pub fn collection_settings(
        &self,
        hidden_metadata_uri: &str,
    ) -> Result<CollectionSettings, ProjectError> {
        let terms = self.allowlist_terms()?;
        Ok(CollectionSettings {
            name: self.nft_name.clone(),
            symbol: self.nft_symbol.clone(),
            hidden_metadata_uri: hidden_metadata_uri.to_string(),
            max_supply: U256::from(self.max_supply),
            mint_price: terms.mint_price,
            max_mint_amount_per_tx: terms.max_mint_amount_per_tx,
        })
    }

    /// Allowlist sale terms.
    pub fn allowlist_terms(&self) -> Result<SaleTerms, ProjectError> {
        self.sale_type.allowlist_sale.terms()
    }

    /// Public sale terms.
    pub fn public_terms(&self) -> Result<SaleTerms, ProjectError> {
        self.sale_type.public_sale.terms()
    }

    /// Addresses recorded for `chain_id`, oldest first.
    pub fn addresses_for(&self, chain_id: u64) -> &[String] {
        self.contract_addresses
            .get(&chain_id.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Most recently recorded address on `chain_id`.
    pub fn latest_address(&self, chain_id: u64) -> Result<Option<Address>, ProjectError> {
        self.addresses_for(chain_id)
            .last()
            .map(|text| {
                text.parse::<Address>()
                    .map_err(|e| ProjectError::InvalidConfig(format!("contractAddresses: {e}")))
            })
            .transpose()
    }

    /// Append `address` under `chain_id` unless already present.
    /// Returns `false` when nothing changed.
    pub fn record_address(&mut self, chain_id: u64, address: &Address) -> bool {
        let entry = self
            .contract_addresses
            .entry(chain_id.to_string())
            .or_default();
        let present = entry
            .iter()
            .any(|known| known.parse::<Address>().map(|a| a == *address).unwrap_or(false));
        if present {
            return false;
        }
        entry.push(address.to_checksum());
        info!("[project] Recorded {} for chain {}", address, chain_id);
        true
    }
}
