use std::sync::Arc;

use config::{CommitMode, Config, DuplicatePolicy};
use decoder::pb::contract::v1 as contract;
use etl::{Delivery, DeliverySummary, ETLError, ETLWorker};
use mock_storage::MockStorage;
use prost::Message;
use prost_types::Timestamp;
use sqlite3_storage::Sqlite3Storage;
use storage::Storage;
use tokio::sync::Mutex;
use types::{
    format_address, Account, Address, BigDecimal, BigInt, EventBlock, EventReceipt,
    TransferEvent, TransferParams, B256, U256,
};

fn wire_transfer(
    tx_hash: &str,
    index: u32,
    from: &str,
    to: &str,
    value: &str,
    balances: (&str, &str),
) -> contract::Transfer {
    contract::Transfer {
        evt_tx_hash: tx_hash.to_string(),
        evt_index: index,
        evt_block_time: Some(Timestamp {
            seconds: 1_607_962_751,
            nanos: 0,
        }),
        evt_block_number: 11_446_769,
        from: from.to_string(),
        to: to.to_string(),
        value: value.to_string(),
        from_balance: balances.0.to_string(),
        to_balance: balances.1.to_string(),
    }
}

fn payload(transfers: Vec<contract::Transfer>) -> Vec<u8> {
    contract::Transfers { transfers }.encode_to_vec()
}

fn event(from: Address, to: Address, value: u64, log_index: u64, tx: Option<B256>) -> TransferEvent {
    TransferEvent {
        params: TransferParams {
            from,
            to,
            value: U256::from(value),
        },
        log_index,
        block: EventBlock {
            number: 11_446_769,
            timestamp: 1_607_962_751,
        },
        receipt: tx.map(|transaction_hash| EventReceipt { transaction_hash }),
    }
}

fn account(id: &str, balance: i64) -> Account {
    Account {
        id: id.to_string(),
        grt_balance: BigInt::from(balance),
    }
}

fn worker(mock: &Arc<Mutex<MockStorage>>, config: Config) -> ETLWorker {
    let storage: Arc<Mutex<dyn Storage>> = mock.clone();
    ETLWorker::new(config, storage)
}

fn mock(storage: MockStorage) -> Arc<Mutex<MockStorage>> {
    Arc::new(Mutex::new(storage))
}

#[tokio::test]
async fn batch_overwrites_balances_with_authoritative_values() {
    let mock = mock(MockStorage::with_accounts([account("0x1", 1_000)]));
    let worker = worker(&mock, Config::default());

    let bytes = payload(vec![wire_transfer("0xabc", 0, "0x1", "0x2", "5", ("10", "15"))]);
    let delivery = worker.handle_transfers(&bytes).await.unwrap();

    assert_eq!(
        delivery,
        Delivery::Processed(DeliverySummary {
            transfers: 1,
            duplicates: 0,
            writes: 3,
        })
    );

    let storage = mock.lock().await;
    let transfer = storage.load_transfer("0xabc-0").await.unwrap().unwrap();
    assert_eq!(transfer.value, BigDecimal::from(5));
    assert_eq!(storage.balance_of("0x1"), Some(BigInt::from(10)));
    assert_eq!(storage.balance_of("0x2"), Some(BigInt::from(15)));
}

#[tokio::test]
async fn every_decoded_record_becomes_one_transfer() {
    let mock = mock(MockStorage::new());
    let worker = worker(&mock, Config::default());

    let bytes = payload(vec![
        wire_transfer("0xabc", 0, "0x1", "0x2", "5", ("10", "15")),
        wire_transfer("0xabc", 1, "0x2", "0x3", "5", ("10", "5")),
        wire_transfer("0xdef", 0, "0x3", "0x1", "1", ("4", "11")),
    ]);
    worker.handle_transfers(&bytes).await.unwrap();

    let storage = mock.lock().await;
    let ids: Vec<String> = storage
        .get_all_transfers()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["0xabc-0", "0xabc-1", "0xdef-0"]);

    // later records win for accounts touched twice
    assert_eq!(storage.balance_of("0x1"), Some(BigInt::from(11)));
    assert_eq!(storage.balance_of("0x2"), Some(BigInt::from(10)));
    assert_eq!(storage.balance_of("0x3"), Some(BigInt::from(4)));
}

#[tokio::test]
async fn empty_batch_writes_nothing() {
    let mock = mock(MockStorage::new());
    let worker = worker(&mock, Config::default());

    assert_eq!(worker.handle_transfers(&payload(vec![])).await.unwrap(), Delivery::Empty);
    assert!(mock.lock().await.writes.is_empty());
}

#[tokio::test]
async fn malformed_batch_writes_nothing() {
    let mock = mock(MockStorage::new());
    let worker = worker(
        &mock,
        Config {
            commit_mode: CommitMode::WriteThrough,
            ..Config::default()
        },
    );

    let mut bytes = payload(vec![
        wire_transfer("0xabc", 0, "0x1", "0x2", "5", ("10", "15")),
        wire_transfer("0xabc", 1, "0x1", "0x2", "five", ("10", "15")),
    ]);
    let err = worker.handle_transfers(&bytes).await.unwrap_err();
    assert!(matches!(err, ETLError::Decode(_)));

    bytes.truncate(bytes.len() - 3);
    let err = worker.handle_transfers(&bytes).await.unwrap_err();
    assert!(matches!(err, ETLError::Decode(_)));

    assert!(mock.lock().await.writes.is_empty());
}

#[tokio::test]
async fn event_applies_delta_to_existing_accounts() {
    let sender = Address::with_last_byte(1);
    let receiver = Address::with_last_byte(2);
    let mock = mock(MockStorage::with_accounts([
        account(&format_address(&sender), 10),
        account(&format_address(&receiver), 15),
    ]));
    let worker = worker(&mock, Config::default());

    let summary = worker
        .handle_transfer_event(&event(sender, receiver, 5, 0, None))
        .await
        .unwrap();
    assert_eq!(summary.transfers, 1);

    let storage = mock.lock().await;
    let transfer = storage.load_transfer("-0").await.unwrap().unwrap();
    assert_eq!(transfer.evt_tx_hash, "");
    assert_eq!(transfer.from, format_address(&sender));
    assert_eq!(storage.balance_of(&format_address(&sender)), Some(BigInt::from(5)));
    assert_eq!(storage.balance_of(&format_address(&receiver)), Some(BigInt::from(20)));
}

#[tokio::test]
async fn mint_only_touches_the_receiver() {
    let receiver = Address::with_last_byte(2);
    let mock = mock(MockStorage::new());
    let worker = worker(&mock, Config::default());

    worker
        .handle_transfer_event(&event(Address::ZERO, receiver, 5, 0, None))
        .await
        .unwrap();

    let storage = mock.lock().await;
    assert_eq!(storage.accounts.len(), 1);
    assert_eq!(storage.balance_of(&format_address(&receiver)), Some(BigInt::from(5)));
    // transfer, receiver creation, receiver update
    assert_eq!(storage.writes.len(), 3);
}

#[tokio::test]
async fn same_event_twice_collides() {
    let tx = Some(B256::repeat_byte(0xab));
    let sender = Address::with_last_byte(1);
    let receiver = Address::with_last_byte(2);
    let first = event(sender, receiver, 5, 0, tx);

    let mock_reject = mock(MockStorage::new());
    let rejecting = worker(&mock_reject, Config::default());
    rejecting.handle_transfer_event(&first).await.unwrap();
    let err = rejecting.handle_transfer_event(&first).await.unwrap_err();
    assert!(matches!(err, ETLError::DuplicateTransfer { .. }));

    let mock_skip = mock(MockStorage::new());
    let skipping = worker(
        &mock_skip,
        Config {
            duplicate_policy: DuplicatePolicy::Skip,
            ..Config::default()
        },
    );
    skipping.handle_transfer_event(&first).await.unwrap();
    let summary = skipping.handle_transfer_event(&first).await.unwrap();
    assert_eq!(
        summary,
        DeliverySummary {
            transfers: 0,
            duplicates: 1,
            writes: 0,
        }
    );
    assert_eq!(
        mock_skip.lock().await.balance_of(&format_address(&receiver)),
        Some(BigInt::from(5))
    );

    // a different log index is a different transfer
    skipping
        .handle_transfer_event(&event(sender, receiver, 5, 1, tx))
        .await
        .unwrap();
    let storage = mock_skip.lock().await;
    assert_eq!(storage.transfers.len(), 2);
    assert_eq!(storage.balance_of(&format_address(&receiver)), Some(BigInt::from(10)));
}

#[tokio::test]
async fn atomic_batches_leave_no_writes_on_failure() {
    let mock = mock(MockStorage::new());
    let worker = worker(&mock, Config::default());

    let bytes = payload(vec![
        wire_transfer("0xabc", 0, "0x1", "0x2", "5", ("10", "15")),
        wire_transfer("0xabc", 0, "0x1", "0x2", "5", ("5", "20")),
    ]);
    let err = worker.handle_transfers(&bytes).await.unwrap_err();
    assert!(matches!(err, ETLError::DuplicateTransfer { ref id } if id == "0xabc-0"));
    assert!(mock.lock().await.writes.is_empty());
}

#[tokio::test]
async fn atomic_batches_leave_no_writes_when_the_store_fails() {
    let mock = mock(MockStorage::failing_on("0x3"));
    let worker = worker(&mock, Config::default());

    let bytes = payload(vec![
        wire_transfer("0xabc", 0, "0x1", "0x2", "5", ("10", "15")),
        wire_transfer("0xabc", 1, "0x2", "0x3", "5", ("10", "5")),
    ]);
    let err = worker.handle_transfers(&bytes).await.unwrap_err();
    assert!(matches!(err, ETLError::Storage(_)));
    assert!(mock.lock().await.writes.is_empty());
}

#[tokio::test]
async fn write_through_batches_keep_earlier_writes() {
    let mock = mock(MockStorage::new());
    let worker = worker(
        &mock,
        Config {
            commit_mode: CommitMode::WriteThrough,
            ..Config::default()
        },
    );

    let bytes = payload(vec![
        wire_transfer("0xabc", 0, "0x1", "0x2", "5", ("10", "15")),
        wire_transfer("0xabc", 0, "0x1", "0x2", "5", ("5", "20")),
    ]);
    assert!(worker.handle_transfers(&bytes).await.is_err());

    let storage = mock.lock().await;
    assert_eq!(storage.writes.len(), 3);
    assert_eq!(storage.balance_of("0x1"), Some(BigInt::from(10)));
}

#[tokio::test]
async fn sqlite_store_sees_both_ingestion_paths() {
    let mut sqlite = Sqlite3Storage::new("sqlite::memory:".to_string());
    sqlite.prepare_db().await.unwrap();
    let storage: Arc<Mutex<dyn Storage>> = Arc::new(Mutex::new(sqlite));
    let worker = ETLWorker::new(Config::default(), storage.clone());

    let sender = Address::repeat_byte(0xab);
    let receiver = Address::repeat_byte(0xcd);
    let (sender_id, receiver_id) = (format_address(&sender), format_address(&receiver));

    let bytes = payload(vec![wire_transfer(
        "0xabc",
        0,
        // mixed case on the wire still lands on the canonical account
        &sender_id.to_uppercase().replacen("0X", "0x", 1),
        &receiver_id,
        "5",
        ("10", "15"),
    )]);
    worker.handle_transfers(&bytes).await.unwrap();
    worker
        .handle_transfer_event(&event(sender, receiver, 5, 1, None))
        .await
        .unwrap();

    let store = storage.lock().await;
    assert_eq!(store.get_all_transfers().await.unwrap().len(), 2);
    assert_eq!(
        store.load_account(&sender_id).await.unwrap().unwrap().grt_balance,
        BigInt::from(5)
    );
    assert_eq!(
        store.load_account(&receiver_id).await.unwrap().unwrap().grt_balance,
        BigInt::from(20)
    );
    assert_eq!(store.get_all_accounts().await.unwrap().len(), 2);
    assert!(matches!(
        store.load_transfer("0xabc-0").await.unwrap(),
        Some(t) if t.evt_block_time == "1607962751"
    ));
}
