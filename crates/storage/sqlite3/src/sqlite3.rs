use async_trait::async_trait;
use sqlx::{migrate::MigrateDatabase, sqlite::SqliteRow, Executor, Row, Sqlite, SqlitePool};
use std::str::FromStr;
use storage::{Storage, StorageError};
use tracing::{debug, info};
use types::{Account, BigDecimal, BigInt, Entity, Transfer};

#[derive(Debug, Clone)]
pub struct Sqlite3Storage {
    pub db_url: String,
    pub db: Option<SqlitePool>,
}

impl Sqlite3Storage {
    pub fn new(db_url: String) -> Self {
        Self { db_url, db: None }
    }

    /// Returns a reference to the database pool.
    fn get_db(&self) -> Result<&SqlitePool, StorageError> {
        self.db.as_ref().ok_or(StorageError::NotConnected)
    }

    /// Creates the database if it does not exist.
    async fn create_db(&self) -> Result<(), StorageError> {
        if !Sqlite::database_exists(&self.db_url).await.unwrap_or(false) {
            debug!("Creating database {}", &self.db_url);
            Sqlite::create_database(&self.db_url).await?;
        } else {
            debug!("Database already exists");
        }
        Ok(())
    }

    /// Connects to the database.
    async fn connect_to_db(&mut self) -> Result<(), StorageError> {
        self.db = Some(SqlitePool::connect(&self.db_url).await?);
        info!("Connected to database at path {}", &self.db_url);
        Ok(())
    }

    /// Migrates the database.
    async fn migrate_db(&self) -> Result<(), StorageError> {
        debug!("Migrating database");
        let result = sqlx::query(
            "CREATE TABLE IF NOT EXISTS accounts (
        id TEXT PRIMARY KEY NOT NULL,
        grt_balance TEXT NOT NULL
        )
        ;",
        )
        .execute(self.get_db()?)
        .await?;
        debug!("Create accounts table result: {:?}", result);

        let result = sqlx::query(
            "CREATE TABLE IF NOT EXISTS transfers (
        id TEXT PRIMARY KEY NOT NULL,
        evt_tx_hash TEXT NOT NULL,
        evt_index INTEGER NOT NULL,
        evt_block_time TEXT NOT NULL,
        evt_block_number INTEGER NOT NULL,
        from_addr TEXT NOT NULL,
        to_addr TEXT NOT NULL,
        value TEXT NOT NULL
        )
        ;",
        )
        .execute(self.get_db()?)
        .await?;
        debug!("Create transfers table result: {:?}", result);
        Ok(())
    }
}

async fn upsert_account<'e, E>(executor: E, account: Account) -> Result<(), StorageError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO accounts (id, grt_balance) VALUES (?, ?)
        ON CONFLICT(id) DO UPDATE SET grt_balance = excluded.grt_balance;",
    )
    .bind(account.id.clone())
    .bind(account.grt_balance.to_string())
    .execute(executor)
    .await?;
    debug!("Saved account {} with balance {}", account.id, account.grt_balance);
    Ok(())
}

async fn upsert_transfer<'e, E>(executor: E, transfer: Transfer) -> Result<(), StorageError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let evt_index = to_sql_integer(&transfer.id, transfer.evt_index)?;
    let evt_block_number = to_sql_integer(&transfer.id, transfer.evt_block_number)?;
    sqlx::query(
        "INSERT INTO transfers (id, evt_tx_hash, evt_index, evt_block_time, evt_block_number, from_addr, to_addr, value) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET evt_tx_hash = excluded.evt_tx_hash, evt_index = excluded.evt_index, evt_block_time = excluded.evt_block_time, evt_block_number = excluded.evt_block_number, from_addr = excluded.from_addr, to_addr = excluded.to_addr, value = excluded.value;",
    )
    .bind(transfer.id.clone())
    .bind(transfer.evt_tx_hash)
    .bind(evt_index)
    .bind(transfer.evt_block_time)
    .bind(evt_block_number)
    .bind(transfer.from)
    .bind(transfer.to)
    .bind(transfer.value.to_string())
    .execute(executor)
    .await?;
    debug!("Saved transfer {}", transfer.id);
    Ok(())
}

fn to_sql_integer(key: &str, value: u64) -> Result<i64, StorageError> {
    i64::try_from(value).map_err(|e| StorageError::Corrupt {
        kind: "transfer",
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn corrupt(kind: &'static str, key: &str, reason: impl ToString) -> StorageError {
    StorageError::Corrupt {
        kind,
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn account_from_row(row: &SqliteRow) -> Result<Account, StorageError> {
    let id: String = row.try_get("id")?;
    let balance: String = row.try_get("grt_balance")?;
    let grt_balance = BigInt::from_str(&balance).map_err(|e| corrupt("account", &id, e))?;
    Ok(Account { id, grt_balance })
}

fn transfer_from_row(row: &SqliteRow) -> Result<Transfer, StorageError> {
    let id: String = row.try_get("id")?;
    let evt_index: i64 = row.try_get("evt_index")?;
    let evt_block_number: i64 = row.try_get("evt_block_number")?;
    let value: String = row.try_get("value")?;
    Ok(Transfer {
        evt_tx_hash: row.try_get("evt_tx_hash")?,
        evt_index: u64::try_from(evt_index).map_err(|e| corrupt("transfer", &id, e))?,
        evt_block_time: row.try_get("evt_block_time")?,
        evt_block_number: u64::try_from(evt_block_number)
            .map_err(|e| corrupt("transfer", &id, e))?,
        from: row.try_get("from_addr")?,
        to: row.try_get("to_addr")?,
        value: BigDecimal::from_str(&value).map_err(|e| corrupt("transfer", &id, e))?,
        id,
    })
}

#[async_trait]
impl Storage for Sqlite3Storage {
    /// Checks if the database exists. If not, it will be created. Then, the connection to the database will be established and the database will be migrated.
    async fn prepare_db(&mut self) -> Result<(), StorageError> {
        self.create_db().await?;
        self.connect_to_db().await?;
        self.migrate_db().await?;
        Ok(())
    }

    async fn load_account(&self, id: &str) -> Result<Option<Account>, StorageError> {
        let row = sqlx::query("SELECT * FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(self.get_db()?)
            .await?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn load_transfer(&self, id: &str) -> Result<Option<Transfer>, StorageError> {
        let row = sqlx::query("SELECT * FROM transfers WHERE id = ?")
            .bind(id)
            .fetch_optional(self.get_db()?)
            .await?;
        row.as_ref().map(transfer_from_row).transpose()
    }

    async fn save_account(&mut self, account: Account) -> Result<(), StorageError> {
        upsert_account(self.get_db()?, account).await
    }

    async fn save_transfer(&mut self, transfer: Transfer) -> Result<(), StorageError> {
        upsert_transfer(self.get_db()?, transfer).await
    }

    /// Applies all writes inside one transaction.
    async fn apply_changes(&mut self, changes: Vec<Entity>) -> Result<(), StorageError> {
        let count = changes.len();
        let mut tx = self.get_db()?.begin().await?;

        for change in changes {
            match change {
                Entity::Account(account) => upsert_account(&mut *tx, account).await?,
                Entity::Transfer(transfer) => upsert_transfer(&mut *tx, transfer).await?,
            }
        }

        tx.commit().await?;
        debug!("Committed {} changes", count);
        Ok(())
    }

    async fn get_all_accounts(&self) -> Result<Vec<Account>, StorageError> {
        sqlx::query("SELECT * FROM accounts ORDER BY id")
            .fetch_all(self.get_db()?)
            .await?
            .iter()
            .map(account_from_row)
            .collect()
    }

    async fn get_all_transfers(&self) -> Result<Vec<Transfer>, StorageError> {
        sqlx::query("SELECT * FROM transfers ORDER BY evt_block_number, id")
            .fetch_all(self.get_db()?)
            .await?
            .iter()
            .map(transfer_from_row)
            .collect()
    }
}
