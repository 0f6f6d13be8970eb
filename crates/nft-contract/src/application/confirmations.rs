//! Waiting for transactions to be mined and confirmed.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::config::ContractClientConfig;
use crate::domain::{to_hex_hash, ContractError, TransactionReceipt, TxHash};
use crate::ports::ChainClient;

/// Poll until `tx_hash` has `config.confirmations` confirmations.
///
/// The inclusion block counts as the first confirmation. A mined transaction
/// with status 0 fails immediately.
pub async fn wait_for_confirmations<C: ChainClient + ?Sized>(
    chain: &C,
    tx_hash: &TxHash,
    config: &ContractClientConfig,
) -> Result<TransactionReceipt, ContractError> {
    let required = config.confirmations.max(1);
    let interval = Duration::from_millis(config.poll_interval_ms);
    let timeout = Duration::from_secs(config.receipt_timeout_secs);
    let started = Instant::now();

    loop {
        if let Some(receipt) = chain.transaction_receipt(tx_hash).await? {
            if !receipt.success {
                return Err(ContractError::TransactionFailed {
                    tx_hash: to_hex_hash(tx_hash),
                });
            }
            let head = chain.block_number().await?;
            let confirmations = if head >= receipt.block_number {
                head - receipt.block_number + 1
            } else {
                0
            };
            debug!(
                "[contract] {} has {}/{} confirmations",
                to_hex_hash(tx_hash),
                confirmations,
                required
            );
            if confirmations >= required {
                return Ok(receipt);
            }
        }

        if started.elapsed() >= timeout {
            return Err(ContractError::ReceiptTimeout {
                tx_hash: to_hex_hash(tx_hash),
                waited_secs: started.elapsed().as_secs(),
            });
        }
        tokio::time::sleep(interval).await;
    }
}
