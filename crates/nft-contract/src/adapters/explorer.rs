//! # Block Explorer Verification
//!
//! Publishes contract source to an Etherscan-compatible explorer
//! (Etherscan, Polygonscan) and polls until the explorer has matched it
//! against the deployed bytecode.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ContractClientConfig;
use crate::domain::{Address, ContractError};

/// Source submission for one deployed contract.
#[derive(Clone, Debug)]
pub struct VerificationRequest {
    /// Deployed address.
    pub address: Address,
    /// Fully qualified name, e.g. `contracts/MyNftCollection.sol:MyNftCollection`.
    pub contract_name: String,
    /// Compiler version as the explorer spells it, e.g. `v0.8.9+commit.e5eed63a`.
    pub compiler_version: String,
    /// Solidity standard-JSON input.
    pub standard_json_input: String,
    /// ABI-encoded constructor arguments.
    pub constructor_args: Vec<u8>,
}

/// Successful verification outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Verified by this submission.
    Verified,
    /// The explorer already had the source.
    AlreadyVerified,
}

/// Interpretation of one explorer answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationProgress {
    /// Still queued.
    Pending,
    /// Finished successfully.
    Done(VerificationStatus),
    /// Rejected by the explorer.
    Failed(String),
}

#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: String,
}

/// Classify a `checkverifystatus` (or submission) answer.
pub fn classify_status(status: &str, result: &str) -> VerificationProgress {
    let lower = result.to_ascii_lowercase();
    if lower.contains("already verified") {
        VerificationProgress::Done(VerificationStatus::AlreadyVerified)
    } else if lower.contains("pending in queue") {
        VerificationProgress::Pending
    } else if status == "1" && lower.contains("pass") {
        VerificationProgress::Done(VerificationStatus::Verified)
    } else {
        VerificationProgress::Failed(result.to_string())
    }
}

/// Etherscan-compatible verification client.
pub struct EtherscanVerifier {
    client: Client,
    api_url: String,
    api_key: String,
    config: ContractClientConfig,
}

impl EtherscanVerifier {
    /// Create a verifier for an explorer API endpoint.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        config: ContractClientConfig,
    ) -> Result<Self, ContractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ContractError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            config,
        })
    }

    /// Submit the source and wait for the explorer's verdict.
    pub async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationStatus, ContractError> {
        info!(
            "[contract] Verifying {} at {}",
            request.contract_name, request.address
        );

        let address = request.address.to_lower_hex();
        let constructor_args = hex::encode(&request.constructor_args);
        let form = [
            ("apikey", self.api_key.as_str()),
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("contractaddress", address.as_str()),
            ("sourceCode", request.standard_json_input.as_str()),
            ("codeformat", "solidity-standard-json-input"),
            ("contractname", request.contract_name.as_str()),
            ("compilerversion", request.compiler_version.as_str()),
            // Etherscan's own spelling
            ("constructorArguements", constructor_args.as_str()),
        ];
        let submitted = self.post(&form).await?;

        let guid = match classify_status(&submitted.status, &submitted.result) {
            VerificationProgress::Done(VerificationStatus::AlreadyVerified) => {
                info!("[contract] {} is already verified", request.address);
                return Ok(VerificationStatus::AlreadyVerified);
            }
            _ if submitted.status == "1" => submitted.result,
            _ => {
                return Err(ContractError::Verification(format!(
                    "{}: {}",
                    submitted.message, submitted.result
                )))
            }
        };
        debug!("[contract] Verification queued with guid {}", guid);

        let interval = Duration::from_millis(self.config.verification_poll_interval_ms);
        for _ in 0..self.config.verification_max_polls {
            tokio::time::sleep(interval).await;
            let answer = self.check_status(&guid).await?;
            match classify_status(&answer.status, &answer.result) {
                VerificationProgress::Pending => continue,
                VerificationProgress::Done(status) => {
                    info!("[contract] Verification finished: {:?}", status);
                    return Ok(status);
                }
                VerificationProgress::Failed(reason) => {
                    warn!("[contract] Verification failed: {}", reason);
                    return Err(ContractError::Verification(reason));
                }
            }
        }

        Err(ContractError::Verification(format!(
            "still pending after {} polls (guid {guid})",
            self.config.verification_max_polls
        )))
    }

    async fn post(&self, form: &[(&str, &str)]) -> Result<ExplorerResponse, ContractError> {
        self.client
            .post(&self.api_url)
            .form(form)
            .send()
            .await
            .map_err(|e| ContractError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| ContractError::InvalidResponse(e.to_string()))
    }

    async fn check_status(&self, guid: &str) -> Result<ExplorerResponse, ContractError> {
        let query = [
            ("apikey", self.api_key.as_str()),
            ("module", "contract"),
            ("action", "checkverifystatus"),
            ("guid", guid),
        ];
        self.client
            .get(&self.api_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ContractError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| ContractError::InvalidResponse(e.to_string()))
    }
}
