use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// How a transfer moves the balances of its two parties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceUpdate {
    /// Post-transfer balances computed upstream replace whatever is stored.
    Overwrite {
        from_balance: BigInt,
        to_balance: BigInt,
    },
    /// The transfer value is subtracted from the sender and added to the receiver.
    Delta { value: BigInt },
}

/// One token movement between two addresses, as produced by either ingestion
/// path. Lives only for the duration of a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub tx_hash: String,
    pub log_index: u64,
    /// Seconds since epoch, as decimal text
    pub block_time: String,
    pub block_number: u64,
    pub from: String,
    pub to: String,
    pub value: BigDecimal,
    pub balances: BalanceUpdate,
}

/// Immutable ledger entry, keyed by `{tx_hash}-{log_index}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: String,
    pub evt_tx_hash: String,
    pub evt_index: u64,
    pub evt_block_time: String,
    pub evt_block_number: u64,
    pub from: String,
    pub to: String,
    pub value: BigDecimal,
}
