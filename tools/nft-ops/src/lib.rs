//! # nft-ops
//!
//! Operator CLI for an allowlist NFT collection: deploy, verify, move the
//! sale through its phases, reveal, and hand out allowlist proofs.
//!
//! ```text
//! nft-ops --network goerli deploy --verify --update-front-end
//! nft-ops --network goerli open-allowlist-sale
//! nft-ops proof 0x70997970C51812dc3A010C7d01b50e0d17dc79C8
//! nft-ops --network goerli check-mint 0x7099…79C8 2
//! nft-ops --network goerli open-public-sale
//! METADATA_URI=ipfs://<cid>/ nft-ops --network goerli reveal
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod commands;
pub mod context;

pub use cli::{Cli, Command};
pub use commands::run;
pub use context::OpsContext;
