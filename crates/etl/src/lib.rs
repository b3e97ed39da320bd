mod error;
pub use error::ETLError;

mod session;
pub use session::Session;

pub mod recorder;
pub use recorder::{record_transfer, transfer_id, Recorded};

pub mod reconciler;
pub use reconciler::{get_or_create_account, reconcile};

mod etl;
pub use etl::{Delivery, DeliverySummary, ETLWorker};
