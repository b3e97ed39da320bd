use config::DuplicatePolicy;
use tracing::warn;
use types::{Transfer, TransferRecord};

use crate::{ETLError, Session};

/// Outcome of recording one transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Created(String),
    /// The id was already taken and the record was skipped
    Duplicate(String),
}

/// Ledger key of a transfer: `{tx_hash}-{log_index}`.
pub fn transfer_id(tx_hash: &str, log_index: u64) -> String {
    format!("{}-{}", tx_hash, log_index)
}

/// Appends the transfer to the ledger. An existing transfer with the same id
/// is never overwritten; `policy` decides between failing and skipping.
pub async fn record_transfer(
    session: &mut Session<'_>,
    record: &TransferRecord,
    policy: DuplicatePolicy,
) -> Result<Recorded, ETLError> {
    let id = transfer_id(&record.tx_hash, record.log_index);

    if session.load_transfer(&id).await?.is_some() {
        return match policy {
            DuplicatePolicy::Reject => Err(ETLError::DuplicateTransfer { id }),
            DuplicatePolicy::Skip => {
                warn!("Transfer {} already exists, skipping", id);
                Ok(Recorded::Duplicate(id))
            }
        };
    }

    let transfer = Transfer {
        id: id.clone(),
        evt_tx_hash: record.tx_hash.clone(),
        evt_index: record.log_index,
        evt_block_time: record.block_time.clone(),
        evt_block_number: record.block_number,
        from: record.from.clone(),
        to: record.to.clone(),
        value: record.value.clone(),
    };
    session.save(transfer).await?;

    Ok(Recorded::Created(id))
}
