use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Address of the holder
    pub id: String,
    pub grt_balance: BigInt,
}

impl Account {
    /// A holder seen for the first time starts from a zero balance.
    pub fn new(id: impl Into<String>) -> Self {
        Account {
            id: id.into(),
            grt_balance: BigInt::from(0),
        }
    }
}
