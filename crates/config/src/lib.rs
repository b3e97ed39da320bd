mod config;
pub use config::{CommitMode, Config, DuplicatePolicy};
