//! # Domain Module
//!
//! Contract-facing types: sale phases, mint guards, transactions, errors.

pub mod entities;
pub mod errors;
pub mod sale;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use sale::*;
pub use value_objects::*;
