//! Configuration management and validation.
//!
//! Provides configuration structures for the SQLite-backed upload store
//! and the ingestion limits applied before parsing.

use crate::constants::{DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_MAX_RETAINED_UPLOADS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Upload store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file; parent directories are created on open
    pub database_path: PathBuf,

    /// Uploads retained per owner; the oldest beyond this count are deleted
    /// inside the same transaction that commits a new upload
    pub max_retained_uploads: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            max_retained_uploads: DEFAULT_MAX_RETAINED_UPLOADS,
        }
    }
}

/// Ingestion limits applied before the parser runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum accepted upload size in bytes
    pub max_file_size_bytes: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
        }
    }
}

/// Top-level pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub ingest: IngestConfig,
}

impl Config {
    /// Build a configuration rooted at an explicit database path,
    /// keeping defaults for everything else
    pub fn with_database_path(database_path: PathBuf) -> Self {
        Self {
            store: StoreConfig {
                database_path,
                ..StoreConfig::default()
            },
            ingest: IngestConfig::default(),
        }
    }

    /// Validate configuration values before any component consumes them
    pub fn validate(&self) -> Result<()> {
        if self.store.max_retained_uploads == 0 {
            return Err(Error::configuration(
                "max_retained_uploads must be at least 1",
            ));
        }
        if self.ingest.max_file_size_bytes == 0 {
            return Err(Error::configuration(
                "max_file_size_bytes must be greater than zero",
            ));
        }
        if self.store.database_path.as_os_str().is_empty() {
            return Err(Error::configuration("database_path must not be empty"));
        }
        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}

/// Default database location under the platform data directory,
/// falling back to the working directory when none is available
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("chemstats").join("chemstats.db"))
        .unwrap_or_else(|| PathBuf::from("chemstats.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.max_retained_uploads, 5);
    }

    #[test]
    fn test_zero_retention_rejected() {
        let mut config = Config::default();
        config.store.max_retained_uploads = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_size_cap_rejected() {
        let mut config = Config::default();
        config.ingest.max_file_size_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_database_path() {
        let config = Config::with_database_path(PathBuf::from("/tmp/test.db"));
        assert_eq!(config.store.database_path, PathBuf::from("/tmp/test.db"));
        assert_eq!(config.store.max_retained_uploads, 5);
    }
}
