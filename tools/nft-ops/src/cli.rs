//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nft_project::{DEFAULT_FRONT_END_DIR, DEFAULT_NETWORK};

/// NFT collection operations
#[derive(Parser, Debug)]
#[command(name = "nft-ops", version)]
#[command(about = "Deploy and operate an allowlist NFT collection")]
pub struct Cli {
    /// Network to operate on (hardhat, localhost, rinkeby, goerli, mainnet, mumbai, polygon)
    #[arg(short, long, global = true, env = "NFT_NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Project root (artifacts/ and deployments/ live here)
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Front-end directory, relative to the project root
    #[arg(long, global = true, default_value = DEFAULT_FRONT_END_DIR)]
    pub front_end: PathBuf,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Operations.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Deploy the collection (reuses an identical earlier deployment)
    Deploy {
        /// Verify the source on the network's explorer afterwards
        #[arg(long)]
        verify: bool,
        /// Publish ABI and address to the front end afterwards
        #[arg(long = "update-front-end")]
        update_front_end: bool,
        /// Placeholder metadata URI served before reveal
        #[arg(long)]
        hidden_metadata_uri: Option<String>,
    },
    /// Verify the deployed source on the network's explorer
    Verify,
    /// Close both sales
    CloseSales,
    /// Publish the allowlist root and open the allowlist sale
    OpenAllowlistSale,
    /// Open the public sale
    OpenPublicSale,
    /// Set the metadata base URI and reveal the collection
    Reveal {
        /// Base URI of the revealed metadata
        #[arg(long, env = "METADATA_URI")]
        uri: String,
    },
    /// Publish the current allowlist root without changing the sale phase
    UpdateRoot,
    /// Print the allowlist root
    Root,
    /// Print the proof for an allowlisted address
    Proof {
        /// Allowlisted address
        address: String,
    },
    /// Write every allowlist proof to a JSON file
    Proofs {
        /// Output file
        #[arg(long, default_value = "proofs.json")]
        out: PathBuf,
    },
    /// Check whether a mint would succeed, without sending it
    CheckMint {
        /// Minting address
        address: String,
        /// Number of tokens
        amount: u64,
        /// Check a public mint instead of an allowlist mint
        #[arg(long)]
        public: bool,
        /// Payment in the gas token (defaults to price × amount)
        #[arg(long)]
        value: Option<String>,
    },
    /// Print the collection's on-chain state
    Status,
    /// Print a token's metadata URI
    TokenUri {
        /// Token id (starts at 1)
        token_id: u64,
    },
    /// Owner mint to an address, regardless of sale phase
    MintFor {
        /// Receiving address
        address: String,
        /// Number of tokens
        amount: u64,
    },
    /// Move the contract balance to the owner
    Withdraw,
    /// Publish the recorded deployment to the front end
    UpdateFrontEnd,
}
