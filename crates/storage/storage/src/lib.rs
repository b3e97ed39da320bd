mod error;
pub use error::StorageError;

mod storage;
pub use storage::Storage;
