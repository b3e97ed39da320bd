use config::Config;
use decoder::{decode_transfers, normalize, Batch};
use std::sync::Arc;
use storage::Storage;
use tokio::sync::Mutex;
use tracing::{debug, info};
use types::{TransferEvent, TransferRecord};

use crate::{reconcile, record_transfer, ETLError, Recorded, Session};

/// What a delivery left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliverySummary {
    /// Transfers appended to the ledger
    pub transfers: usize,
    /// Records skipped because their transfer id was taken
    pub duplicates: usize,
    /// Entity saves, account re-saves included
    pub writes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The batch decoded to zero transfers
    Empty,
    Processed(DeliverySummary),
}

pub struct ETLWorker {
    pub config: Config,
    storage: Arc<Mutex<dyn Storage>>,
}

// Clone here makes a copy of the Arc pointer - not the entire store
impl Clone for ETLWorker {
    fn clone(&self) -> Self {
        ETLWorker {
            config: self.config.clone(),
            storage: Arc::clone(&self.storage),
        }
    }
}

impl ETLWorker {
    pub fn new(config: Config, storage: Arc<Mutex<dyn Storage>>) -> Self {
        ETLWorker { config, storage }
    }

    /// Handles one binary batch of transfers with authoritative balances.
    ///
    /// A payload that fails to decode is rejected before the store is touched.
    pub async fn handle_transfers(&self, bytes: &[u8]) -> Result<Delivery, ETLError> {
        let records = match decode_transfers(bytes)? {
            Batch::Empty => {
                info!("No transfers found");
                return Ok(Delivery::Empty);
            }
            Batch::Transfers(records) => records,
        };

        let summary = self.process_records(&records).await?;
        info!(
            "Processed batch of {} transfers ({} duplicates, {} writes)",
            summary.transfers, summary.duplicates, summary.writes
        );
        Ok(Delivery::Processed(summary))
    }

    /// Handles one decoded `Transfer` event, moving balances by its value.
    pub async fn handle_transfer_event(
        &self,
        event: &TransferEvent,
    ) -> Result<DeliverySummary, ETLError> {
        let record = normalize(event);
        let summary = self.process_records(std::slice::from_ref(&record)).await?;
        info!(
            "Processed transfer event {}-{} ({} writes)",
            record.tx_hash, record.log_index, summary.writes
        );
        Ok(summary)
    }

    /// Runs records in order against one session. The store stays locked for
    /// the whole delivery so deliveries never interleave.
    async fn process_records(&self, records: &[TransferRecord]) -> Result<DeliverySummary, ETLError> {
        let mut storage = self.storage.lock().await;
        let mut session = Session::new(&mut *storage, self.config.commit_mode);
        let mut summary = DeliverySummary::default();

        for record in records {
            match record_transfer(&mut session, record, self.config.duplicate_policy).await? {
                Recorded::Created(id) => {
                    reconcile(&mut session, record).await?;
                    debug!("Recorded transfer {}", id);
                    summary.transfers += 1;
                }
                Recorded::Duplicate(_) => summary.duplicates += 1,
            }
        }

        summary.writes = session.commit().await?;
        Ok(summary)
    }
}
