//! FileStorage - one JSON file per collection key, replaced atomically.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use super::{StorageBackend, StorageConfig, StorageError};

/// Directory-backed storage. `key` is stored at `<data_dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileStorage {
    config: StorageConfig,
}

impl FileStorage {
    /// Open (creating if needed) the configured data directory.
    pub fn open(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir).map_err(|e| StorageError::Io {
            key: config.data_dir.display().to_string(),
            message: format!("could not create data directory: {}", e),
        })?;
        Ok(Self { config })
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.config.data_dir.join(format!("{}.json", key)))
    }
}

fn io_error(key: &str, context: &str, err: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        message: format!("{}: {}", context, err),
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, "read failed", e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let mut tmp = NamedTempFile::new_in(&self.config.data_dir)
            .map_err(|e| io_error(key, "could not create temporary file", e))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| io_error(key, "could not write temporary file", e))?;
        tmp.flush()
            .map_err(|e| io_error(key, "could not flush temporary file", e))?;
        if self.config.sync_writes {
            tmp.as_file()
                .sync_all()
                .map_err(|e| io_error(key, "could not sync temporary file", e))?;
        }
        tmp.persist(&path)
            .map_err(|e| io_error(key, "could not replace file", e.error))?;
        debug!(
            "event=storage_write backend=file key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(key, "remove failed", e)),
        }
    }
}
