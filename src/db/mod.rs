pub mod schema;
pub mod contact_repo;
pub mod sqlite_directory;

pub use sqlite_directory::SqliteDirectory;
