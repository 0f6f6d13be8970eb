//! Shared fixtures: hardhat accounts and a minimal project tree.

use std::path::Path;

use nft_allowlist::Identity;
use nft_project::files::write_json;
use nft_project::ProjectPaths;
use serde_json::{json, Value};

/// Hardhat default account #0, the deployer.
pub const DEPLOYER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Hardhat accounts #1 to #4, the allowlist.
pub const ALLOWLISTED: [&str; 4] = [
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
    "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
    "0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65",
];

/// Hardhat account #5, not allowlisted.
pub const OUTSIDER: &str = "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc";

/// Creation code the in-memory chain accepts for the collection.
pub const CREATION_CODE: [u8; 8] = [0x60, 0x80, 0x60, 0x40, 0x52, 0x34, 0x80, 0x15];

/// Parse a fixture address.
pub fn identity(address: &str) -> Identity {
    address.parse().expect("fixture address")
}

/// `contract-config.json` as the front end ships it.
pub fn contract_config() -> Value {
    json!({
        "contractName": "MyNftCollection",
        "nftName": "My NFT Collection",
        "nftSymbol": "MNC",
        "maxSupply": 10,
        "gasToken": "ETH",
        "saleType": {
            "allowlistSale": { "mintPrice": "0.01", "maxMintAmountPerTx": 1 },
            "publicSale": { "mintPrice": "0.02", "maxMintAmountPerTx": 3 }
        },
        "contractAddresses": {}
    })
}

/// Write a project (front end, allowlist, artifacts) under `root`.
pub fn write_project(root: &Path) -> ProjectPaths {
    let paths = ProjectPaths::for_testing(root);
    write_json(&paths.contract_config_file, &contract_config()).expect("contract config");
    write_json(&paths.allowlist_file, &ALLOWLISTED).expect("allowlist");

    let contract_dir = paths
        .artifacts_dir
        .join("contracts")
        .join("MyNftCollection.sol");
    write_json(
        &contract_dir.join("MyNftCollection.json"),
        &json!({
            "contractName": "MyNftCollection",
            "sourceName": "contracts/MyNftCollection.sol",
            "abi": [
                {"type": "function", "name": "getSaleState", "inputs": [], "outputs": [{"type": "uint8"}]},
                {"type": "function", "name": "allowlistMint", "inputs": [
                    {"name": "_mintAmount", "type": "uint256"},
                    {"name": "_merkleProof", "type": "bytes32[]"}
                ], "outputs": []}
            ],
            "bytecode": format!("0x{}", hex_string(&CREATION_CODE)),
        }),
    )
    .expect("artifact");
    write_json(
        &contract_dir.join("MyNftCollection.dbg.json"),
        &json!({"buildInfo": "../../build-info/fixture.json"}),
    )
    .expect("dbg file");
    write_json(
        &paths.artifacts_dir.join("build-info").join("fixture.json"),
        &json!({"solcLongVersion": "0.8.9+commit.e5eed63a", "input": {"language": "Solidity"}}),
    )
    .expect("build info");
    paths
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
