//! Ethereum JSON-RPC wire types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    from_hex_hash, from_quantity_u64, to_hex_data, to_quantity, Address, CallRequest,
    ContractError, TransactionReceipt, Wei,
};

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<T> {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,
    /// Method name.
    pub method: String,
    /// Positional parameters.
    pub params: T,
    /// Request id.
    pub id: u64,
}

impl<T> JsonRpcRequest<T> {
    /// Build a request.
    pub fn new(method: impl Into<String>, params: T, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    /// Protocol version.
    #[serde(default)]
    pub jsonrpc: String,
    /// Echoed request id.
    #[serde(default)]
    pub id: serde_json::Value,
    /// Result; `None` for errors and for JSON `null`.
    pub result: Option<T>,
    /// Error object.
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Error message.
    pub message: String,
    /// Node-specific payload (revert data for reverted calls).
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RPC Error {}: {}", self.code, self.message)
    }
}

impl JsonRpcError {
    /// Hex revert data, wherever the node put it.
    ///
    /// geth returns it as a string in `data`; hardhat has used both a string
    /// and an object with a nested `data` field.
    pub fn revert_data(&self) -> Option<String> {
        match self.data.as_ref()? {
            serde_json::Value::String(hex) if hex.starts_with("0x") => Some(hex.clone()),
            serde_json::Value::Object(map) => map
                .get("data")
                .and_then(|v| v.as_str())
                .filter(|hex| hex.starts_with("0x"))
                .map(str::to_string),
            _ => None,
        }
    }
}

/// Call / transaction object for `eth_call`, `eth_estimateGas` and
/// `eth_sendTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionObject {
    /// Sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Target; omitted for contract creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Calldata.
    pub data: String,
    /// Attached value as a quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Gas limit as a quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
}

impl RpcTransactionObject {
    /// Wire form of a read-only call.
    pub fn from_call(request: &CallRequest) -> Self {
        Self {
            from: request.from.map(|a| a.to_lower_hex()),
            to: Some(request.to.to_lower_hex()),
            data: to_hex_data(&request.data),
            value: request.value.map(to_quantity),
            gas: None,
        }
    }

    /// Wire form of a transaction sent by `from`.
    pub fn from_transaction(
        from: Address,
        to: Option<Address>,
        data: &[u8],
        value: Wei,
        gas: Option<u64>,
    ) -> Self {
        Self {
            from: Some(from.to_lower_hex()),
            to: to.map(|a| a.to_lower_hex()),
            data: to_hex_data(data),
            value: (!value.is_zero()).then(|| to_quantity(value)),
            gas: gas.map(|g| format!("{g:#x}")),
        }
    }
}

/// `eth_getTransactionReceipt` result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    /// Transaction hash.
    pub transaction_hash: String,
    /// Inclusion block.
    pub block_number: String,
    /// `0x1` success, `0x0` reverted.
    #[serde(default)]
    pub status: Option<String>,
    /// Created contract.
    #[serde(default)]
    pub contract_address: Option<String>,
    /// Gas used.
    pub gas_used: String,
}

impl TryFrom<RpcReceipt> for TransactionReceipt {
    type Error = ContractError;

    fn try_from(receipt: RpcReceipt) -> Result<Self, Self::Error> {
        let contract_address = receipt
            .contract_address
            .as_deref()
            .map(|text| {
                text.parse::<Address>()
                    .map_err(|e| ContractError::InvalidResponse(e.to_string()))
            })
            .transpose()?;
        // Pre-Byzantium receipts carry no status; treat them as successful
        let success = match receipt.status.as_deref() {
            Some(status) => from_quantity_u64(status)? == 1,
            None => true,
        };
        Ok(TransactionReceipt {
            tx_hash: from_hex_hash(&receipt.transaction_hash)?,
            block_number: from_quantity_u64(&receipt.block_number)?,
            success,
            contract_address,
            gas_used: from_quantity_u64(&receipt.gas_used)?,
        })
    }
}
