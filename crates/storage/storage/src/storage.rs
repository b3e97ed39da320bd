use async_trait::async_trait;
use types::{Account, Entity, Transfer};

use crate::StorageError;

/// Load-by-key and upsert semantics for the two entity kinds.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn prepare_db(&mut self) -> Result<(), StorageError>;

    async fn load_account(&self, id: &str) -> Result<Option<Account>, StorageError>;
    async fn load_transfer(&self, id: &str) -> Result<Option<Transfer>, StorageError>;

    async fn save_account(&mut self, account: Account) -> Result<(), StorageError>;
    async fn save_transfer(&mut self, transfer: Transfer) -> Result<(), StorageError>;

    /// Applies writes in the given order. Backends that can should make this
    /// all-or-nothing; the default stops at the first failure and keeps what
    /// was already written.
    async fn apply_changes(&mut self, changes: Vec<Entity>) -> Result<(), StorageError> {
        for change in changes {
            match change {
                Entity::Account(account) => self.save_account(account).await?,
                Entity::Transfer(transfer) => self.save_transfer(transfer).await?,
            }
        }
        Ok(())
    }

    async fn get_all_accounts(&self) -> Result<Vec<Account>, StorageError>;
    async fn get_all_transfers(&self) -> Result<Vec<Transfer>, StorageError>;
}
