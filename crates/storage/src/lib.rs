#![forbid(unsafe_code)]

pub mod export;
pub mod local;
pub mod repository;
pub mod sqlite;

pub use export::ExportBundle;
pub use local::LocalFileStore;
pub use repository::{AttemptStore, InMemoryRepository, Storage, StorageError};
pub use sqlite::{SqliteInitError, SqliteRepository};
