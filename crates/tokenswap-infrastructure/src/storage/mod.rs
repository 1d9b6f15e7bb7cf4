//! Low-level file storage.

pub mod config_storage;

pub use config_storage::{ConfigStorage, ConfigStorageError};
