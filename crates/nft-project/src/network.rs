//! # Networks
//!
//! The networks the collection can be deployed to, with endpoints, signer
//! keys and explorer credentials taken from the environment.
//!
//! | Network   | Chain id | RPC URL variable          | Key variable          | Explorer    |
//! |-----------|----------|---------------------------|-----------------------|-------------|
//! | hardhat   | 1337     | `HARDHAT_RPC_URL`         | node account          | -           |
//! | localhost | 1337     | `LOCALHOST_RPC_URL`       | node account          | -           |
//! | rinkeby   | 4        | `RINKEBY_RPC_URL`         | `TESTNET_PRIVATE_KEY` | Etherscan   |
//! | goerli    | 5        | `GOERLI_TESTNET_RPC_URL`  | `TESTNET_PRIVATE_KEY` | Etherscan   |
//! | mainnet   | 1        | `MAINNET_RPC_URL`         | `MAINNET_PRIVATE_KEY` | Etherscan   |
//! | mumbai    | 80001    | `MUMBAI_TESTNET_RPC_URL`  | `TESTNET_PRIVATE_KEY` | Polygonscan |
//! | polygon   | 137      | `POLYGON_MAINNET_RPC_URL` | `MAINNET_PRIVATE_KEY` | Polygonscan |

use std::fmt;

use tracing::debug;

use crate::errors::ProjectError;

/// Networks served by a local development node.
pub const DEVELOPMENT_CHAINS: [&str; 2] = ["hardhat", "localhost"];

/// Network used when none is given.
pub const DEFAULT_NETWORK: &str = "hardhat";

const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

/// Explorer API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// `…/api` endpoint.
    pub api_url: String,
    /// API key.
    pub api_key: String,
}

impl fmt::Debug for ExplorerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplorerConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Resolved settings for one network.
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Network name.
    pub name: String,
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Hex secp256k1 key; `None` means the node signs.
    pub private_key: Option<String>,
    /// Explorer for source verification, when a key is configured.
    pub explorer: Option<ExplorerConfig>,
}

impl fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("name", &self.name)
            .field("chain_id", &self.chain_id)
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("explorer", &self.explorer)
            .finish()
    }
}

struct NetworkEntry {
    name: &'static str,
    chain_id: u64,
    rpc_env: &'static str,
    default_rpc: Option<&'static str>,
    key_env: Option<&'static str>,
    explorer: Option<(&'static str, &'static str)>,
}

static NETWORKS: [NetworkEntry; 7] = [
    NetworkEntry {
        name: "hardhat",
        chain_id: 1337,
        rpc_env: "HARDHAT_RPC_URL",
        default_rpc: Some(LOCAL_RPC_URL),
        key_env: None,
        explorer: None,
    },
    NetworkEntry {
        name: "localhost",
        chain_id: 1337,
        rpc_env: "LOCALHOST_RPC_URL",
        default_rpc: Some(LOCAL_RPC_URL),
        key_env: None,
        explorer: None,
    },
    NetworkEntry {
        name: "rinkeby",
        chain_id: 4,
        rpc_env: "RINKEBY_RPC_URL",
        default_rpc: None,
        key_env: Some("TESTNET_PRIVATE_KEY"),
        explorer: Some(("https://api-rinkeby.etherscan.io/api", "ETHERSCAN_API_KEY")),
    },
    NetworkEntry {
        name: "goerli",
        chain_id: 5,
        rpc_env: "GOERLI_TESTNET_RPC_URL",
        default_rpc: None,
        key_env: Some("TESTNET_PRIVATE_KEY"),
        explorer: Some(("https://api-goerli.etherscan.io/api", "ETHERSCAN_API_KEY")),
    },
    NetworkEntry {
        name: "mainnet",
        chain_id: 1,
        rpc_env: "MAINNET_RPC_URL",
        default_rpc: None,
        key_env: Some("MAINNET_PRIVATE_KEY"),
        explorer: Some(("https://api.etherscan.io/api", "ETHERSCAN_API_KEY")),
    },
    NetworkEntry {
        name: "mumbai",
        chain_id: 80001,
        rpc_env: "MUMBAI_TESTNET_RPC_URL",
        default_rpc: Some("https://rpc-mumbai.matic.today"),
        key_env: Some("TESTNET_PRIVATE_KEY"),
        explorer: Some(("https://api-testnet.polygonscan.com/api", "POLYGONSCAN_API_KEY")),
    },
    NetworkEntry {
        name: "polygon",
        chain_id: 137,
        rpc_env: "POLYGON_MAINNET_RPC_URL",
        default_rpc: Some("https://polygon-rpc.com"),
        key_env: Some("MAINNET_PRIVATE_KEY"),
        explorer: Some(("https://api.polygonscan.com/api", "POLYGONSCAN_API_KEY")),
    },
];

/// Names of every known network.
pub fn network_names() -> impl Iterator<Item = &'static str> {
    NETWORKS.iter().map(|entry| entry.name)
}

/// Is `name` a development network?
pub fn is_development(name: &str) -> bool {
    DEVELOPMENT_CHAINS.contains(&name)
}

impl NetworkConfig {
    /// Resolve `name` from the process environment.
    pub fn from_env(name: &str) -> Result<Self, ProjectError> {
        Self::resolve(name, |var| std::env::var(var).ok())
    }

    /// Resolve `name`, reading variables through `lookup`.
    ///
    /// Empty variables count as unset. Live networks need a key; without an
    /// RPC URL default they also need their URL variable.
    pub fn resolve(
        name: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ProjectError> {
        let entry = NETWORKS
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| ProjectError::UnknownNetwork(name.to_string()))?;
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let rpc_url = var(entry.rpc_env)
            .or_else(|| entry.default_rpc.map(str::to_string))
            .ok_or_else(|| ProjectError::MissingEnv(entry.rpc_env.to_string()))?;

        let private_key = match entry.key_env {
            Some(key_env) => Some(var(key_env).ok_or_else(|| ProjectError::MissingEnv(key_env.to_string()))?),
            None => None,
        };

        let explorer = entry.explorer.and_then(|(api_url, key_env)| {
            var(key_env).map(|api_key| ExplorerConfig {
                api_url: api_url.to_string(),
                api_key,
            })
        });

        let config = Self {
            name: entry.name.to_string(),
            chain_id: entry.chain_id,
            rpc_url,
            private_key,
            explorer,
        };
        debug!("[project] Resolved network {:?}", config);
        Ok(config)
    }

    /// Served by a local development node?
    pub fn is_development(&self) -> bool {
        is_development(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_hardhat_needs_nothing() {
        let config = NetworkConfig::resolve("hardhat", env(&[])).unwrap();
        assert_eq!(config.chain_id, 1337);
        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
        assert!(config.private_key.is_none());
        assert!(config.explorer.is_none());
        assert!(config.is_development());
    }

    #[test]
    fn test_live_network_requires_url_and_key() {
        assert!(matches!(
            NetworkConfig::resolve("goerli", env(&[("TESTNET_PRIVATE_KEY", "ab")])),
            Err(ProjectError::MissingEnv(var)) if var == "GOERLI_TESTNET_RPC_URL"
        ));
        assert!(matches!(
            NetworkConfig::resolve("goerli", env(&[("GOERLI_TESTNET_RPC_URL", "https://rpc")])),
            Err(ProjectError::MissingEnv(var)) if var == "TESTNET_PRIVATE_KEY"
        ));
    }

    #[test]
    fn test_polygon_defaults_and_explorer() {
        let config = NetworkConfig::resolve(
            "polygon",
            env(&[("MAINNET_PRIVATE_KEY", "01"), ("POLYGONSCAN_API_KEY", "KEY")]),
        )
        .unwrap();
        assert_eq!(config.chain_id, 137);
        assert_eq!(config.rpc_url, "https://polygon-rpc.com");
        let explorer = config.explorer.as_ref().unwrap();
        assert_eq!(explorer.api_url, "https://api.polygonscan.com/api");
        assert!(!config.is_development());
    }

    #[test]
    fn test_empty_variable_is_unset() {
        let config = NetworkConfig::resolve(
            "mainnet",
            env(&[
                ("MAINNET_RPC_URL", "https://eth"),
                ("MAINNET_PRIVATE_KEY", "01"),
                ("ETHERSCAN_API_KEY", ""),
            ]),
        )
        .unwrap();
        assert!(config.explorer.is_none());
    }

    #[test]
    fn test_unknown_network() {
        assert!(matches!(
            NetworkConfig::resolve("ropsten", env(&[])),
            Err(ProjectError::UnknownNetwork(_))
        ));
        assert_eq!(network_names().count(), 7);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = NetworkConfig::resolve(
            "mumbai",
            env(&[("TESTNET_PRIVATE_KEY", "deadbeef"), ("POLYGONSCAN_API_KEY", "SECRET")]),
        )
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("deadbeef"));
        assert!(!debug.contains("SECRET"));
    }
}
