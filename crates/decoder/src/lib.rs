pub mod pb;

mod error;
pub use error::DecodeError;

pub mod batch;
pub use batch::{decode_transfers, Batch};

pub mod event;
pub use event::normalize;
