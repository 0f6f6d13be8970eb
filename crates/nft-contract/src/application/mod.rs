//! Application layer - services driving the collection through the ports.

pub mod confirmations;
pub mod deploy;
pub mod service;

pub use confirmations::wait_for_confirmations;
pub use deploy::{deployment_hash, Deployer, DeploymentOutcome, PreviousDeployment};
pub use service::{CollectionService, PLACEHOLDER_BASE_URI};
