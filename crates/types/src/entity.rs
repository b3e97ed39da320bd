use crate::{Account, Transfer};

/// A single write against the entity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Account(Account),
    Transfer(Transfer),
}

impl Entity {
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Account(_) => "account",
            Entity::Transfer(_) => "transfer",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Entity::Account(account) => &account.id,
            Entity::Transfer(transfer) => &transfer.id,
        }
    }
}

impl From<Account> for Entity {
    fn from(account: Account) -> Self {
        Entity::Account(account)
    }
}

impl From<Transfer> for Entity {
    fn from(transfer: Transfer) -> Self {
        Entity::Transfer(transfer)
    }
}
