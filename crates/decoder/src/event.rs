use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use types::{format_address, format_tx_hash, BalanceUpdate, TransferEvent, TransferRecord, U256};

/// Adapts a decoded `Transfer` log to the record shape shared with the batch
/// path. Balances are left to the delta policy.
pub fn normalize(event: &TransferEvent) -> TransferRecord {
    let value = u256_to_bigint(&event.params.value);
    let tx_hash = event
        .receipt
        .as_ref()
        .map(|receipt| format_tx_hash(&receipt.transaction_hash))
        .unwrap_or_default();

    TransferRecord {
        tx_hash,
        log_index: event.log_index,
        block_time: event.block.timestamp.to_string(),
        block_number: event.block.number,
        from: format_address(&event.params.from),
        to: format_address(&event.params.to),
        value: BigDecimal::new(value.clone(), 0),
        balances: BalanceUpdate::Delta { value },
    }
}

fn u256_to_bigint(value: &U256) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &value.to_be_bytes::<32>())
}
