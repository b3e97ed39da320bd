use anyhow::Context;
use clap::Parser;
use config::Config;
use etl::{Delivery, ETLWorker};
use std::{path::PathBuf, sync::Arc};
use storage::Storage;
use tokio::sync::Mutex;
use tracing::info;
use types::TransferEvent;

#[derive(Parser, Debug)]
pub struct IngestBatchArgs {
    /// File holding a binary `contract.v1.Transfers` payload
    pub file: PathBuf,
}

impl IngestBatchArgs {
    pub async fn exec(&self, config: Config, storage: Arc<Mutex<dyn Storage>>) -> anyhow::Result<()> {
        let bytes = tokio::fs::read(&self.file)
            .await
            .with_context(|| format!("failed to read batch {}", self.file.display()))?;

        let worker = ETLWorker::new(config, storage);
        match worker.handle_transfers(&bytes).await? {
            Delivery::Empty => info!("Batch {} holds no transfers", self.file.display()),
            Delivery::Processed(summary) => info!(
                transfers = summary.transfers,
                duplicates = summary.duplicates,
                writes = summary.writes,
                "Imported batch {}",
                self.file.display()
            ),
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct IngestEventArgs {
    /// JSON file holding one decoded Transfer event
    pub file: PathBuf,
}

impl IngestEventArgs {
    pub async fn exec(&self, config: Config, storage: Arc<Mutex<dyn Storage>>) -> anyhow::Result<()> {
        let raw = tokio::fs::read_to_string(&self.file)
            .await
            .with_context(|| format!("failed to read event {}", self.file.display()))?;
        let event: TransferEvent = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a Transfer event", self.file.display()))?;

        let worker = ETLWorker::new(config, storage);
        let summary = worker.handle_transfer_event(&event).await?;
        info!(
            transfers = summary.transfers,
            duplicates = summary.duplicates,
            writes = summary.writes,
            "Imported event {}",
            self.file.display()
        );
        Ok(())
    }
}
