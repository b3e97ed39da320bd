use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum StorageError {
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
    #[error("storage is not connected, call prepare_db first")]
    NotConnected,
    #[error("stored {kind} {key:?} is corrupt: {reason}")]
    Corrupt {
        kind: &'static str,
        key: String,
        reason: String,
    },
}
