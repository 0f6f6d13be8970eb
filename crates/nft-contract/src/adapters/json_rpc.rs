//! # JSON-RPC Chain Client
//!
//! [`ChainClient`] over Ethereum JSON-RPC 2.0 (HTTP).
//!
//! Development nodes (hardhat, localhost) hold unlocked accounts, so
//! transactions go through `eth_sendTransaction`. Live networks get an
//! EIP-155 transaction signed locally and submitted raw.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::rpc_types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcReceipt, RpcTransactionObject};
use super::signer::{LegacyTransaction, LocalSigner};
use crate::abi::{CollectionError, RevertReason};
use crate::config::ContractClientConfig;
use crate::domain::{
    from_hex_data, from_hex_hash, from_quantity, from_quantity_u64, to_hex_data, to_hex_hash,
    Address, CallRequest, ContractError, TransactionReceipt, TransactionRequest, TxHash,
};
use crate::ports::ChainClient;

/// Who signs outgoing transactions.
#[derive(Debug)]
pub enum TransactionSigner {
    /// The node holds the key for `from`.
    Node {
        /// Unlocked node account.
        from: Address,
    },
    /// A key held by this process.
    Local(LocalSigner),
}

impl TransactionSigner {
    /// Account transactions are sent from.
    pub fn address(&self) -> Address {
        match self {
            Self::Node { from } => *from,
            Self::Local(signer) => signer.address(),
        }
    }
}

/// Ethereum JSON-RPC client.
pub struct JsonRpcChainClient {
    client: Client,
    url: String,
    request_id: AtomicU64,
    signer: TransactionSigner,
    config: ContractClientConfig,
}

impl JsonRpcChainClient {
    /// Create a client for `url`.
    pub fn new(
        url: impl Into<String>,
        signer: TransactionSigner,
        config: ContractClientConfig,
    ) -> Result<Self, ContractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ContractError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            request_id: AtomicU64::new(1),
            signer,
            config,
        })
    }

    /// Use the first account the node manages (`eth_accounts`).
    pub async fn with_node_account(
        url: impl Into<String>,
        config: ContractClientConfig,
    ) -> Result<Self, ContractError> {
        let mut client = Self::new(url, TransactionSigner::Node { from: Address::default() }, config)?;
        let accounts: Vec<String> = client.request("eth_accounts", [(); 0]).await?;
        let first = accounts
            .first()
            .ok_or_else(|| ContractError::Signer("node has no unlocked accounts".to_string()))?;
        let from = first
            .parse::<Address>()
            .map_err(|e| ContractError::InvalidResponse(e.to_string()))?;
        client.signer = TransactionSigner::Node { from };
        Ok(client)
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Call a JSON-RPC method. A JSON `null` result deserializes into `R`
    /// (so `Option<_>` results can represent it).
    async fn request<P: Serialize + Send, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, ContractError> {
        let id = self.next_id();
        let request = JsonRpcRequest::new(method, params, id);
        debug!("[contract] → {} (id {})", method, id);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ContractError::Transport(format!("Cannot connect to {}", self.url))
                } else {
                    ContractError::Transport(e.to_string())
                }
            })?;

        let rpc_response: JsonRpcResponse<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ContractError::InvalidResponse(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(rpc_error(error));
        }

        let result = rpc_response.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result)
            .map_err(|e| ContractError::InvalidResponse(format!("{method}: {e}")))
    }

    async fn send_local(
        &self,
        signer: &LocalSigner,
        request: &TransactionRequest,
    ) -> Result<TxHash, ContractError> {
        let from = signer.address();
        let from_hex = from.to_lower_hex();

        let chain_id = self.chain_id().await?;
        let nonce: String = self
            .request("eth_getTransactionCount", (from_hex.as_str(), "pending"))
            .await?;
        let gas_price: String = self.request("eth_gasPrice", [(); 0]).await?;
        let gas_limit = match request.gas {
            Some(gas) => gas,
            None => {
                let object = RpcTransactionObject::from_transaction(
                    from,
                    request.to,
                    &request.data,
                    request.value,
                    None,
                );
                let estimate: String = self.request("eth_estimateGas", [object]).await?;
                self.config.gas_with_headroom(from_quantity_u64(&estimate)?)
            }
        };

        let tx = LegacyTransaction {
            nonce: from_quantity_u64(&nonce)?,
            gas_price: from_quantity(&gas_price)?,
            gas_limit,
            to: request.to,
            value: request.value,
            data: request.data.clone(),
            chain_id,
        };
        debug!(
            "[contract] Signing tx nonce {} gas {} chain {}",
            tx.nonce, tx.gas_limit, tx.chain_id
        );
        let raw = signer.sign_transaction(&tx)?;
        let hash: String = self
            .request("eth_sendRawTransaction", [to_hex_data(&raw)])
            .await?;
        from_hex_hash(&hash)
    }
}

/// Map a node error to a revert when it carries revert information.
pub(crate) fn rpc_error(error: JsonRpcError) -> ContractError {
    if let Some(data) = error.revert_data() {
        if let Ok(bytes) = from_hex_data(&data) {
            return RevertReason::decode(&bytes).into();
        }
    }
    if let Some(reason) = revert_from_message(&error.message) {
        return reason.into();
    }
    ContractError::Rpc {
        code: error.code,
        message: error.message,
    }
}

/// Hardhat spells out reverts in the message when it omits the data.
fn revert_from_message(message: &str) -> Option<RevertReason> {
    let quoted = |marker: &str| {
        let start = message.find(marker)? + marker.len();
        let end = message[start..].find('\'')?;
        Some(message[start..start + end].to_string())
    };

    if let Some(reason) = quoted("reverted with reason string '") {
        return Some(RevertReason::Message(reason));
    }
    if let Some(signature) = quoted("reverted with custom error '") {
        return CollectionError::ALL
            .into_iter()
            .find(|err| err.signature() == signature)
            .map(RevertReason::Custom);
    }
    None
}

#[async_trait]
impl ChainClient for JsonRpcChainClient {
    async fn chain_id(&self) -> Result<u64, ContractError> {
        let id: String = self.request("eth_chainId", [(); 0]).await?;
        from_quantity_u64(&id)
    }

    async fn block_number(&self) -> Result<u64, ContractError> {
        let number: String = self.request("eth_blockNumber", [(); 0]).await?;
        from_quantity_u64(&number)
    }

    async fn call(&self, request: &CallRequest) -> Result<Vec<u8>, ContractError> {
        let object = RpcTransactionObject::from_call(request);
        let data: String = self.request("eth_call", (object, "latest")).await?;
        from_hex_data(&data)
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, ContractError> {
        let tx_hash = match &self.signer {
            TransactionSigner::Node { from } => {
                let object = RpcTransactionObject::from_transaction(
                    *from,
                    request.to,
                    &request.data,
                    request.value,
                    request.gas,
                );
                let hash: String = self.request("eth_sendTransaction", [object]).await?;
                from_hex_hash(&hash)?
            }
            TransactionSigner::Local(signer) => self.send_local(signer, request).await?,
        };
        info!("[contract] Submitted transaction {}", to_hex_hash(&tx_hash));
        Ok(tx_hash)
    }

    async fn transaction_receipt(
        &self,
        tx_hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, ContractError> {
        let receipt: Option<RpcReceipt> = self
            .request("eth_getTransactionReceipt", [to_hex_hash(tx_hash)])
            .await?;
        receipt.map(TransactionReceipt::try_from).transpose()
    }

    async fn code_at(&self, address: &Address) -> Result<Vec<u8>, ContractError> {
        let code: String = self
            .request("eth_getCode", (address.to_lower_hex(), "latest"))
            .await?;
        from_hex_data(&code)
    }

    fn sender(&self) -> Address {
        self.signer.address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MintRejection;
    use serde_json::json;

    fn error(message: &str, data: Option<serde_json::Value>) -> JsonRpcError {
        JsonRpcError {
            code: -32603,
            message: message.to_string(),
            data,
        }
    }

    #[test]
    fn test_revert_data_decoded() {
        let err = rpc_error(error("execution reverted", Some(json!("0xaf227c37"))));
        assert!(matches!(err, ContractError::MintRejected(MintRejection::InvalidProof)));
    }

    #[test]
    fn test_revert_reason_from_hardhat_message() {
        let err = rpc_error(error(
            "Error: VM Exception while processing transaction: reverted with reason string 'Ownable: caller is not the owner'",
            None,
        ));
        match err {
            ContractError::Reverted(RevertReason::Message(message)) => {
                assert_eq!(message, "Ownable: caller is not the owner")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_custom_error_from_hardhat_message() {
        let err = rpc_error(error(
            "Error: VM Exception while processing transaction: reverted with custom error 'MyNftCollection__AddressAlreadyClaimed()'",
            None,
        ));
        assert!(matches!(
            err,
            ContractError::MintRejected(MintRejection::AddressAlreadyClaimed)
        ));
    }

    #[test]
    fn test_plain_rpc_error() {
        let err = rpc_error(error("nonce too low", None));
        assert!(matches!(err, ContractError::Rpc { code: -32603, .. }));
    }

    #[test]
    fn test_signer_address() {
        let from = Address::new([3u8; 20]);
        let signer = TransactionSigner::Node { from };
        assert_eq!(signer.address(), from);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = JsonRpcChainClient::new(
            "http://127.0.0.1:9",
            TransactionSigner::Node { from: Address::default() },
            ContractClientConfig::for_testing(),
        )
        .unwrap();
        assert!(matches!(
            client.block_number().await,
            Err(ContractError::Transport(_))
        ));
    }
}
