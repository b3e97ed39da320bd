use config::CommitMode;
use std::collections::HashMap;
use storage::{Storage, StorageError};
use tracing::debug;
use types::{Account, Entity, Transfer};

/// Unit of work for a single delivery.
///
/// Loads see every save made earlier in the same delivery. In
/// [`CommitMode::Atomic`] saves are staged and reach the store only through
/// [`Session::commit`]; dropping the session discards them.
pub struct Session<'a> {
    storage: &'a mut dyn Storage,
    mode: CommitMode,

    staged: Vec<Entity>,
    accounts: HashMap<String, Account>,
    transfers: HashMap<String, Transfer>,
    writes: usize,
}

impl<'a> Session<'a> {
    pub fn new(storage: &'a mut dyn Storage, mode: CommitMode) -> Self {
        Session {
            storage,
            mode,
            staged: vec![],
            accounts: HashMap::new(),
            transfers: HashMap::new(),
            writes: 0,
        }
    }

    pub async fn load_account(&self, id: &str) -> Result<Option<Account>, StorageError> {
        if let Some(account) = self.accounts.get(id) {
            return Ok(Some(account.clone()));
        }
        self.storage.load_account(id).await
    }

    pub async fn load_transfer(&self, id: &str) -> Result<Option<Transfer>, StorageError> {
        if let Some(transfer) = self.transfers.get(id) {
            return Ok(Some(transfer.clone()));
        }
        self.storage.load_transfer(id).await
    }

    pub async fn save(&mut self, entity: impl Into<Entity>) -> Result<(), StorageError> {
        let entity = entity.into();
        debug!("Saving {} {}", entity.kind(), entity.key());

        match self.mode {
            CommitMode::WriteThrough => match entity {
                Entity::Account(account) => self.storage.save_account(account).await?,
                Entity::Transfer(transfer) => self.storage.save_transfer(transfer).await?,
            },
            CommitMode::Atomic => {
                match &entity {
                    Entity::Account(account) => {
                        self.accounts.insert(account.id.clone(), account.clone());
                    }
                    Entity::Transfer(transfer) => {
                        self.transfers.insert(transfer.id.clone(), transfer.clone());
                    }
                }
                self.staged.push(entity);
            }
        }

        self.writes += 1;
        Ok(())
    }

    /// Flushes staged writes and returns how many saves the delivery made.
    pub async fn commit(self) -> Result<usize, StorageError> {
        if !self.staged.is_empty() {
            debug!("Committing {} staged writes", self.staged.len());
            self.storage.apply_changes(self.staged).await?;
        }
        Ok(self.writes)
    }
}
