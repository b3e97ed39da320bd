use anyhow::anyhow;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use storage::Storage;
use tokio::sync::Mutex;
use types::canonical_address;

#[derive(Parser, Debug)]
pub struct ViewArgs {
    #[command(subcommand)]
    sub: ViewSubcommands,
}

#[derive(Subcommand, Debug)]
pub enum ViewSubcommands {
    /// Balance of one address
    Account { address: String },
    /// One transfer by its `{tx_hash}-{log_index}` id
    Transfer { id: String },
    Accounts,
    Transfers,
}

impl ViewArgs {
    pub async fn exec(&self, storage: Arc<Mutex<dyn Storage>>) -> anyhow::Result<()> {
        let storage = storage.lock().await;
        let output = match &self.sub {
            ViewSubcommands::Account { address } => {
                let address = canonical_address(address);
                let account = storage
                    .load_account(&address)
                    .await?
                    .ok_or_else(|| anyhow!("account {} not found", address))?;
                serde_json::to_string_pretty(&account)?
            }
            ViewSubcommands::Transfer { id } => {
                let transfer = storage
                    .load_transfer(id)
                    .await?
                    .ok_or_else(|| anyhow!("transfer {} not found", id))?;
                serde_json::to_string_pretty(&transfer)?
            }
            ViewSubcommands::Accounts => {
                serde_json::to_string_pretty(&storage.get_all_accounts().await?)?
            }
            ViewSubcommands::Transfers => {
                serde_json::to_string_pretty(&storage.get_all_transfers().await?)?
            }
        };
        println!("{}", output);
        Ok(())
    }
}
