use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "RECORD_SHELF_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "data";

/// File storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding one JSON file per collection key.
    pub data_dir: PathBuf,

    /// Fsync each file before the atomic rename.
    pub sync_writes: bool,
}

impl StorageConfig {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            sync_writes: true,
        }
    }

    /// Reads `RECORD_SHELF_DATA_DIR`, falling back to `./data`.
    pub fn from_env() -> Self {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(PathBuf::from(dir)),
            _ => Self::default(),
        }
    }

    /// Set whether writes are fsynced
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.sync_writes = sync;
        self
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_data_dir() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.sync_writes);
    }

    #[test]
    fn builder_overrides_sync() {
        let config = StorageConfig::new("/tmp/shelf").sync_writes(false);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/shelf"));
        assert!(!config.sync_writes);
    }
}
