use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use prost::Message;
use tracing::debug;
use types::{canonical_address, BalanceUpdate, TransferRecord};

use crate::pb::contract::v1 as contract;
use crate::DecodeError;

/// Result of decoding one batch payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    /// The payload holds no transfers; nothing has to be written
    Empty,
    /// Records in wire order
    Transfers(Vec<TransferRecord>),
}

/// Decodes a `contract.v1.Transfers` payload.
///
/// Every numeric field is parsed here, so a payload that fails on its last
/// record is rejected before any of its records reach the store.
pub fn decode_transfers(bytes: &[u8]) -> Result<Batch, DecodeError> {
    let transfers = contract::Transfers::decode(bytes)?;
    if transfers.transfers.is_empty() {
        return Ok(Batch::Empty);
    }

    let records = transfers
        .transfers
        .into_iter()
        .enumerate()
        .map(|(index, transfer)| into_record(index, transfer))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Decoded {} transfers from {} bytes", records.len(), bytes.len());

    Ok(Batch::Transfers(records))
}

fn into_record(index: usize, transfer: contract::Transfer) -> Result<TransferRecord, DecodeError> {
    let block_time = transfer
        .evt_block_time
        .as_ref()
        .ok_or(DecodeError::MissingBlockTime { index })?
        .seconds
        .to_string();

    let value = parse_value(index, &transfer.value)?;
    let from_balance = parse_balance(index, "from_balance", &transfer.from_balance)?;
    let to_balance = parse_balance(index, "to_balance", &transfer.to_balance)?;

    Ok(TransferRecord {
        tx_hash: transfer.evt_tx_hash,
        log_index: u64::from(transfer.evt_index),
        block_time,
        block_number: transfer.evt_block_number,
        from: canonical_address(&transfer.from),
        to: canonical_address(&transfer.to),
        value,
        balances: BalanceUpdate::Overwrite {
            from_balance,
            to_balance,
        },
    })
}

fn parse_value(index: usize, value: &str) -> Result<BigDecimal, DecodeError> {
    match BigDecimal::from_str(value.trim()) {
        Ok(parsed) if parsed.sign() != Sign::Minus => Ok(parsed),
        _ => Err(DecodeError::InvalidValue {
            index,
            value: value.to_string(),
        }),
    }
}

fn parse_balance(index: usize, field: &'static str, value: &str) -> Result<BigInt, DecodeError> {
    BigInt::from_str(value.trim()).map_err(|_| DecodeError::InvalidBalance {
        index,
        field,
        value: value.to_string(),
    })
}
