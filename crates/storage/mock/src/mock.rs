use async_trait::async_trait;
use std::collections::HashMap;
use storage::{Storage, StorageError};
use types::{Account, Entity, Transfer};

/// In-memory store that remembers every save in order.
#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    pub accounts: HashMap<String, Account>,
    pub transfers: HashMap<String, Transfer>,
    pub writes: Vec<Entity>,

    // saves of this key fail as if the database rejected them
    failing_key: Option<String>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every save of an entity with this key fail.
    pub fn failing_on(key: impl Into<String>) -> Self {
        Self {
            failing_key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|account| (account.id.clone(), account))
                .collect(),
            ..Self::default()
        }
    }

    pub fn balance_of(&self, id: &str) -> Option<types::BigInt> {
        self.accounts.get(id).map(|account| account.grt_balance.clone())
    }

    fn check(&self, key: &str) -> Result<(), StorageError> {
        match &self.failing_key {
            Some(failing) if failing == key => Err(StorageError::DatabaseError(
                sqlx::Error::Protocol(format!("mock refused to save {}", key)),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn prepare_db(&mut self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn load_account(&self, id: &str) -> Result<Option<Account>, StorageError> {
        Ok(self.accounts.get(id).cloned())
    }

    async fn load_transfer(&self, id: &str) -> Result<Option<Transfer>, StorageError> {
        Ok(self.transfers.get(id).cloned())
    }

    async fn save_account(&mut self, account: Account) -> Result<(), StorageError> {
        self.check(&account.id)?;
        self.writes.push(Entity::Account(account.clone()));
        self.accounts.insert(account.id.clone(), account);
        Ok(())
    }

    async fn save_transfer(&mut self, transfer: Transfer) -> Result<(), StorageError> {
        self.check(&transfer.id)?;
        self.writes.push(Entity::Transfer(transfer.clone()));
        self.transfers.insert(transfer.id.clone(), transfer);
        Ok(())
    }

    async fn apply_changes(&mut self, changes: Vec<Entity>) -> Result<(), StorageError> {
        // all-or-nothing, like a database transaction
        for change in &changes {
            self.check(change.key())?;
        }
        for change in changes {
            match change {
                Entity::Account(account) => self.save_account(account).await?,
                Entity::Transfer(transfer) => self.save_transfer(transfer).await?,
            }
        }
        Ok(())
    }

    async fn get_all_accounts(&self) -> Result<Vec<Account>, StorageError> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(accounts)
    }

    async fn get_all_transfers(&self) -> Result<Vec<Transfer>, StorageError> {
        let mut transfers: Vec<Transfer> = self.transfers.values().cloned().collect();
        transfers.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(transfers)
    }
}
