//! Configuration
//!
//! Layered configuration built with the `config` crate: defaults, the global
//! `config.toml`, an optional explicit file, then `SYLLABUS__*` environment
//! variables.

mod facade;
mod merge;
mod sources;
mod storage_paths;
pub mod xdg;

pub use facade::ConfigLoader;
pub use storage_paths::{StorageConfig, StoragePaths};

use crate::countdown::parse_target;
use crate::document::{load_document, parse_document, BUNDLED_DOCUMENT};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::types::Forest;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyllabusConfig {
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_target() -> String {
    "2027-02-01T00:00:00".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Local date-time the countdown runs to.
    #[serde(default = "default_target")]
    pub target: String,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
        }
    }
}

impl CountdownConfig {
    pub fn target_datetime(&self) -> Result<DateTime<Local>, ApiError> {
        parse_target(&self.target).ok_or_else(|| {
            ApiError::ConfigError(format!(
                "Invalid countdown target '{}' (expected YYYY-MM-DDTHH:MM:SS)",
                self.target
            ))
        })
    }
}

/// Where the subject document comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Path to a subject document; the bundled sample is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl DocumentConfig {
    pub fn load(&self) -> Result<Forest, ApiError> {
        match &self.path {
            Some(path) => load_document(path),
            None => parse_document(BUNDLED_DOCUMENT),
        }
    }
}
