use config::Config;

use crate::{app_storage::StorageType, Args};

impl Args {
    pub fn load_config(&self) -> Config {
        let storage_url = match self.storage {
            StorageType::Sqlite3Storage => self.sqlite3_path.clone(),
            StorageType::MockStorage => "memory".to_string(),
        };

        Config {
            storage_url,
            duplicate_policy: self.duplicate_policy,
            commit_mode: self.commit_mode,
        }
    }
}
