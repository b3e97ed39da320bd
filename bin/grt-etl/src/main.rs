mod logging;
use logging::init_logging;

mod app_config;
mod app_storage;
use app_storage::StorageType;
use clap::{Parser, Subcommand};
use config::{CommitMode, DuplicatePolicy};
use dotenvy::dotenv;
use tracing::error;

mod ingest;
use ingest::{IngestBatchArgs, IngestEventArgs};

mod view;
use view::ViewArgs;

/// Commands for grt-etl application
#[derive(Debug, Parser)]
#[clap(name = "grt-etl", author, version, about)]
pub(crate) struct Args {
    /// Storage type which is used for saving transfers and accounts
    #[clap(long, env, default_value_t, value_enum)]
    pub storage: StorageType,

    #[clap(short, long, env, default_value = "sqlite://grt-etl.db")]
    /// Path to SQlite3 file where transfers and accounts are saved
    pub sqlite3_path: String,

    #[clap(long, env, default_value_t, value_enum)]
    /// What to do with a transfer whose id is already stored
    pub duplicate_policy: DuplicatePolicy,

    #[clap(long, env, default_value_t, value_enum)]
    /// Whether a delivery is written all at once or write by write
    pub commit_mode: CommitMode,

    #[clap(long, env)]
    /// Emit logs as JSON lines
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
#[command(subcommand_help_heading = "GRT transfer ETL (Extract, Transform, Load) tool")]
pub enum Commands {
    /// Ingest a binary batch of transfers carrying post-transfer balances
    #[command(subcommand_help_heading = "Ingest batch")]
    IngestBatch(IngestBatchArgs),

    /// Ingest one decoded Transfer event from a JSON file
    #[command(subcommand_help_heading = "Ingest event")]
    IngestEvent(IngestEventArgs),

    /// View accounts and transfers from storage
    #[command(subcommand_help_heading = "View data")]
    View(ViewArgs),
}

impl Args {
    pub(crate) async fn exec(&self) -> anyhow::Result<()> {
        let config = self.load_config();
        let storage = self.choose_storage(&config).await?;

        match &self.command {
            Commands::IngestBatch(args) => args.exec(config, storage).await,
            Commands::IngestEvent(args) => args.exec(config, storage).await,
            Commands::View(args) => args.exec(storage).await,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cmd = Args::parse();
    init_logging(cmd.log_json);

    if let Err(e) = cmd.exec().await {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
