use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// A `Transfer(address,address,uint256)` log that was already decoded
/// against the token ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferEvent {
    pub params: TransferParams,
    pub log_index: u64,
    pub block: EventBlock,
    /// Absent when the delivery does not carry receipts
    #[serde(default)]
    pub receipt: Option<EventReceipt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBlock {
    pub number: u64,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReceipt {
    pub transaction_hash: B256,
}
