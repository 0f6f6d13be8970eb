//! # NFT Tooling Test Suite
//!
//! Cross-crate flows over the in-memory chain, plus benchmarks.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── fixtures.rs         # Project files and settings shared by the flows
//! │   ├── sale_lifecycle.rs   # deploy → allowlist sale → public sale → reveal
//! │   └── release_flow.rs     # artifacts → deployment record → front-end release
//! └── benches/
//!     └── allowlist_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p nft-tests
//! cargo bench -p nft-tests
//! ```

#![allow(dead_code)]

pub mod integration;
