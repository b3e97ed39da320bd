use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// URL of the store where transfers and accounts are saved
    pub storage_url: String,

    /// What to do when a transfer id is already present in the store
    pub duplicate_policy: DuplicatePolicy,

    /// When the writes of a delivery reach the store
    pub commit_mode: CommitMode,
}

/// DuplicatePolicy decides the fate of a record whose `{tx_hash}-{log_index}`
/// key is already taken. An existing transfer is never overwritten.
#[derive(clap::ValueEnum, Clone, Copy, Default, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    // Abort the delivery with an error
    #[default]
    Reject,
    // Log and skip the record, balances included
    Skip,
}

/// CommitMode is an enum that represents when staged writes are flushed
#[derive(clap::ValueEnum, Clone, Copy, Default, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitMode {
    // All writes of a delivery are applied together once every record succeeded
    #[default]
    Atomic,
    // Every save reaches the store immediately, earlier writes survive a failure
    WriteThrough,
}
