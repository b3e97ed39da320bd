#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed transfers payload: {0}")]
    Protobuf(#[from] prost::DecodeError),
    #[error("transfer #{index} has no block time")]
    MissingBlockTime { index: usize },
    #[error("transfer #{index} has invalid value {value:?}")]
    InvalidValue { index: usize, value: String },
    #[error("transfer #{index} has invalid {field} {value:?}")]
    InvalidBalance {
        index: usize,
        field: &'static str,
        value: String,
    },
}
