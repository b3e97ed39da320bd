mod sqlite3;
pub use sqlite3::Sqlite3Storage;
