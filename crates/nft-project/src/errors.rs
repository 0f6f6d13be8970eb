//! # Project Errors

use std::path::PathBuf;

use nft_allowlist::AllowlistError;
use nft_contract::ContractError;
use thiserror::Error;

/// Project file and configuration errors.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Reading or writing a project file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A project file is not the JSON it should be.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The network name is not in the network table.
    #[error("Unknown network '{0}'")]
    UnknownNetwork(String),

    /// A required environment variable is unset or empty.
    #[error("Environment variable {0} is not set")]
    MissingEnv(String),

    /// A configuration value is out of range or badly formatted.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No compiled artifact for the contract.
    #[error("No artifact for {name} under {path}")]
    MissingArtifact {
        /// Contract name
        name: String,
        /// Artifacts directory
        path: PathBuf,
    },

    /// No deployment recorded for the contract on this network.
    #[error("{contract} has not been deployed to {network}")]
    NotDeployed {
        /// Contract name
        contract: String,
        /// Network name
        network: String,
    },

    /// Allowlist file problem.
    #[error(transparent)]
    Allowlist(#[from] AllowlistError),

    /// Contract tooling error.
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl ProjectError {
    /// I/O error constructor.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// JSON error constructor.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_path() {
        let err = ProjectError::io(
            "front-end/abi.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("front-end/abi.json"));
    }

    #[test]
    fn test_allowlist_error_transparent() {
        let err: ProjectError = AllowlistError::EmptyAllowlist.into();
        assert_eq!(err.to_string(), "Allowlist is empty");
    }
}
