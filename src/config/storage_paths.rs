//! StorageConfig and path resolution for the durable stores.

use crate::config::xdg;
use crate::error::ApiError;
use crate::store::cookie_jar::{DEFAULT_MAX_AGE_DAYS, DEFAULT_MAX_BYTES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_schema_version() -> String {
    "v1".to_string()
}

fn default_cookie_max_bytes() -> usize {
    DEFAULT_MAX_BYTES
}

fn default_cookie_max_age_days() -> i64 {
    DEFAULT_MAX_AGE_DAYS
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding both stores; defaults to `$XDG_DATA_HOME/syllabus`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Suffix of the storage keys. Changing it orphans previously saved state.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Size limit of one secondary-store entry.
    #[serde(default = "default_cookie_max_bytes")]
    pub cookie_max_bytes: usize,

    /// Retention of secondary-store entries.
    #[serde(default = "default_cookie_max_age_days")]
    pub cookie_max_age_days: i64,
}

/// Resolved on-disk locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub store_path: PathBuf,
    pub cookie_path: PathBuf,
}

impl StorageConfig {
    pub fn resolve_paths(&self) -> Result<StoragePaths, ApiError> {
        let data_dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => xdg::syllabus_data_dir()?,
        };
        Ok(StoragePaths {
            store_path: data_dir.join("store"),
            cookie_path: data_dir.join("cookies.json"),
        })
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            schema_version: default_schema_version(),
            cookie_max_bytes: default_cookie_max_bytes(),
            cookie_max_age_days: default_cookie_max_age_days(),
        }
    }
}
