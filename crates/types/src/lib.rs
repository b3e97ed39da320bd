pub mod address;
pub use address::{
    canonical_address, format_address, format_tx_hash, is_zero_address, ZeroAddress, ZERO_ADDRESS,
};

pub mod transfer;
pub use transfer::{BalanceUpdate, Transfer, TransferRecord};

pub mod account;
pub use account::Account;

pub mod entity;
pub use entity::Entity;

pub mod event;
pub use event::{EventBlock, EventReceipt, TransferEvent, TransferParams};

pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
pub use alloy_primitives::{Address, B256, U256};
