use num_bigint::{BigInt, Sign};
use storage::StorageError;
use tracing::warn;
use types::{is_zero_address, Account, BalanceUpdate, TransferRecord};

use crate::{ETLError, Session};

/// Loads the account, or builds a fresh zero-balance one. The flag is `true`
/// when the account did not exist yet. Nothing is saved here.
pub async fn get_or_create_account(
    session: &Session<'_>,
    address: &str,
) -> Result<(Account, bool), StorageError> {
    Ok(match session.load_account(address).await? {
        Some(account) => (account, false),
        None => (Account::new(address), true),
    })
}

/// Applies the balance side of a transfer to its sender and receiver,
/// sender first. The zero address is never turned into an account.
pub async fn reconcile(session: &mut Session<'_>, record: &TransferRecord) -> Result<(), ETLError> {
    match &record.balances {
        BalanceUpdate::Overwrite {
            from_balance,
            to_balance,
        } => {
            overwrite_balance(session, &record.from, from_balance).await?;
            overwrite_balance(session, &record.to, to_balance).await?;
        }
        BalanceUpdate::Delta { value } => {
            apply_delta(session, &record.from, &-value).await?;
            apply_delta(session, &record.to, value).await?;
        }
    }
    Ok(())
}

async fn overwrite_balance(
    session: &mut Session<'_>,
    address: &str,
    balance: &BigInt,
) -> Result<(), StorageError> {
    if is_zero_address(address) {
        return Ok(());
    }

    let (mut account, _) = get_or_create_account(session, address).await?;
    account.grt_balance = balance.clone();
    session.save(account).await
}

async fn apply_delta(
    session: &mut Session<'_>,
    address: &str,
    delta: &BigInt,
) -> Result<(), StorageError> {
    if is_zero_address(address) {
        return Ok(());
    }

    let (mut account, created) = get_or_create_account(session, address).await?;
    if created {
        session.save(account.clone()).await?;
    }

    account.grt_balance += delta;
    if account.grt_balance.sign() == Sign::Minus {
        warn!(
            "Balance of {} went negative: {}",
            account.id, account.grt_balance
        );
    }
    session.save(account).await
}
