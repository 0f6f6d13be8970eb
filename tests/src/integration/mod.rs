//! Cross-crate integration flows.

pub mod fixtures;
mod release_flow;
mod sale_lifecycle;
