use alloy_primitives::{hex, Address, B256};
use std::str::FromStr;

/// Canonical string form of the all-zero address. The token contract uses it as
/// the sender of a mint and the receiver of a burn.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Recognizes the mint/burn sentinel regardless of how the address is carried.
///
/// Both the string form produced by the batch path and the native form of the
/// event path are compared against [`Address::ZERO`], so there is exactly one
/// definition of the sentinel.
pub trait ZeroAddress {
    fn is_zero_address(&self) -> bool;
}

impl ZeroAddress for Address {
    fn is_zero_address(&self) -> bool {
        *self == Address::ZERO
    }
}

impl ZeroAddress for str {
    fn is_zero_address(&self) -> bool {
        // Strings that are not 20-byte hex addresses can't be the sentinel
        Address::from_str(self.trim())
            .map(|address| address.is_zero_address())
            .unwrap_or(false)
    }
}

impl ZeroAddress for String {
    fn is_zero_address(&self) -> bool {
        self.as_str().is_zero_address()
    }
}

pub fn is_zero_address<A: ZeroAddress + ?Sized>(address: &A) -> bool {
    address.is_zero_address()
}

/// Normalizes an address string so account keys match across ingestion paths.
pub fn canonical_address(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// Renders a native address as `0x` followed by lowercase hex.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

pub fn format_tx_hash(hash: &B256) -> String {
    format!("0x{}", hex::encode(hash))
}
