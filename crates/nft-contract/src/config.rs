//! # Contract Client Configuration
//!
//! Timeouts, polling and confirmation depth for chain access.

use serde::{Deserialize, Serialize};

/// Confirmations to wait for on live networks.
pub const WAIT_BLOCK_CONFIRMATIONS: u64 = 6;

/// Confirmations to wait for on development networks (hardhat, localhost).
pub const DEV_BLOCK_CONFIRMATIONS: u64 = 1;

/// Contract client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContractClientConfig {
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,

    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Blocks (including the inclusion block) before a transaction counts as final.
    pub confirmations: u64,

    /// Receipt / head polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Give up waiting for a receipt after this many seconds.
    pub receipt_timeout_secs: u64,

    /// Extra gas on top of `eth_estimateGas`, in percent.
    pub gas_headroom_percent: u64,

    /// Explorer verification status polling interval in milliseconds.
    pub verification_poll_interval_ms: u64,

    /// Explorer verification status polls before giving up.
    pub verification_max_polls: u32,
}

impl Default for ContractClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 5,
            confirmations: WAIT_BLOCK_CONFIRMATIONS,
            poll_interval_ms: 2_000,
            receipt_timeout_secs: 600,
            gas_headroom_percent: 20,
            verification_poll_interval_ms: 5_000,
            verification_max_polls: 24,
        }
    }
}

impl ContractClientConfig {
    /// Create a config for testing (no real waiting).
    pub fn for_testing() -> Self {
        Self {
            request_timeout_secs: 5,
            connect_timeout_secs: 1,
            confirmations: DEV_BLOCK_CONFIRMATIONS,
            poll_interval_ms: 1,
            receipt_timeout_secs: 5,
            gas_headroom_percent: 20,
            verification_poll_interval_ms: 1,
            verification_max_polls: 3,
        }
    }

    /// Defaults with the confirmation depth for the network kind.
    pub fn for_network(is_development: bool) -> Self {
        Self {
            confirmations: if is_development {
                DEV_BLOCK_CONFIRMATIONS
            } else {
                WAIT_BLOCK_CONFIRMATIONS
            },
            ..Self::default()
        }
    }

    /// `estimate` plus the configured headroom.
    pub fn gas_with_headroom(&self, estimate: u64) -> u64 {
        estimate.saturating_add(estimate.saturating_mul(self.gas_headroom_percent) / 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ContractClientConfig::default();
        assert_eq!(config.confirmations, 6);
        assert_eq!(config.gas_headroom_percent, 20);
    }

    #[test]
    fn test_for_network() {
        assert_eq!(ContractClientConfig::for_network(true).confirmations, 1);
        assert_eq!(ContractClientConfig::for_network(false).confirmations, 6);
    }

    #[test]
    fn test_gas_headroom() {
        let config = ContractClientConfig::default();
        assert_eq!(config.gas_with_headroom(100_000), 120_000);
        assert_eq!(config.gas_with_headroom(u64::MAX), u64::MAX);
    }
}
