//! # Ports Module
//!
//! Hexagonal architecture ports (inbound collection API, outbound chain access).

pub mod inbound;
pub mod mock_chain;
pub mod outbound;

pub use inbound::*;
pub use mock_chain::{MockChain, MockCollection};
pub use outbound::*;
