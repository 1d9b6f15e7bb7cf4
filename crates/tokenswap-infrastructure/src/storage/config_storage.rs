//! TOML settings file storage with atomic writes.
//!
//! Values go in and out as typed serde structs. Writes land in a temporary
//! sibling file that is fsynced and renamed over the target; read-modify-write
//! cycles run under an exclusive lock file.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokenswap_core::SwapError;

/// Errors that can occur during config storage operations.
#[derive(Debug, Error)]
pub enum ConfigStorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<ConfigStorageError> for SwapError {
    fn from(err: ConfigStorageError) -> Self {
        match err {
            ConfigStorageError::Io(e) => e.into(),
            ConfigStorageError::TomlParse(e) => e.into(),
            ConfigStorageError::TomlSer(e) => e.into(),
            ConfigStorageError::Lock(message) => SwapError::io(message),
        }
    }
}

/// Handle to one TOML file on disk.
#[derive(Debug, Clone)]
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read or parse the file
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, ConfigStorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Serializes `data` and writes it atomically.
    pub fn save<T: Serialize>(&self, data: &T) -> Result<(), ConfigStorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Loads (or defaults), applies `f`, and saves, all under the file lock.
    pub fn update<T, F>(&self, f: F) -> Result<T, ConfigStorageError>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T),
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data: T = self.load()?.unwrap_or_default();
        f(&mut data);
        self.save(&data)?;

        Ok(data)
    }

    fn temp_path(&self) -> Result<PathBuf, ConfigStorageError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            ConfigStorageError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// Exclusive lock on `<file>.lock`, released on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, ConfigStorageError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        use fs2::FileExt;
        file.lock_exclusive()
            .map_err(|e| ConfigStorageError::Lock(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock happens when the handle closes; removing the file is best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(default)]
        name: String,
        #[serde(default)]
        count: i64,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("test.toml"));

        let data = Sample {
            name: "test".into(),
            count: 42,
        };
        storage.save(&data).unwrap();

        let loaded: Sample = storage.load().unwrap().unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("nonexistent.toml"));

        let result: Option<Sample> = storage.load().unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_starts_from_default() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("nested/test.toml"));

        let first: Sample = storage.update(|s: &mut Sample| s.count += 10).unwrap();
        assert_eq!(first.count, 10);

        let second: Sample = storage.update(|s: &mut Sample| s.count += 5).unwrap();
        assert_eq!(second.count, 15);

        // Lock file is cleaned up after each update.
        assert!(!temp_dir.path().join("nested/test.lock").exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.toml");
        let storage = ConfigStorage::new(file_path.clone());

        storage.save(&Sample::default()).unwrap();

        assert!(!temp_dir.path().join(".test.toml.tmp").exists());
        assert!(file_path.exists());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("broken.toml");
        fs::write(&file_path, "this is = = not toml").unwrap();

        let err = ConfigStorage::new(file_path).load::<Sample>().unwrap_err();
        assert!(matches!(err, ConfigStorageError::TomlParse(_)));
        assert!(SwapError::from(err).is_serialization());
    }
}
