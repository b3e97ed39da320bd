use decoder::DecodeError;
use storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ETLError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("transfer {id} already exists")]
    DuplicateTransfer { id: String },
}
