use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::storage::{CacheError, KeyValueStore};

/// One file per slot inside a data directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Opens the store, creating `directory` if needed.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|error| CacheError::io(&directory, error))?;

        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && key.chars().all(|character| character.is_ascii_alphanumeric() || matches!(character, '_' | '-'));

        if !valid {
            return Err(CacheError::InvalidKey(key.to_string()));
        }

        Ok(self.directory.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.slot_path(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(CacheError::io(path, error)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let path = self.slot_path(key)?;
        let temporary = path.with_extension("tmp");

        fs::write(&temporary, value).map_err(|error| CacheError::io(&temporary, error))?;
        fs::rename(&temporary, &path).map_err(|error| CacheError::io(&path, error))?;
        trace!("Wrote {} bytes to slot [{key}]", value.len());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let path = self.slot_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(CacheError::io(path, error)),
        }
    }
}
