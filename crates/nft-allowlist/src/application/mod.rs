//! # Application Layer
//!
//! The [`Allowlist`] facade the tooling works with.

pub mod allowlist;

pub use allowlist::{Allowlist, ProofBundle};
