//! Secondary store: a cookie-style jar kept in a single JSON file.
//!
//! Each entry carries an expiry. Values over the size limit are refused,
//! the way a browser drops an oversized cookie.

use crate::error::StorageError;
use crate::store::DurableStore;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default size limit for `name=value`, in bytes.
pub const DEFAULT_MAX_BYTES: usize = 4096;

/// Default retention: one year.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CookieEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

type Jar = BTreeMap<String, CookieEntry>;

pub struct CookieJarStore {
    path: PathBuf,
    max_bytes: usize,
    max_age: Duration,
}

impl CookieJarStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            max_bytes: DEFAULT_MAX_BYTES,
            max_age: Duration::days(DEFAULT_MAX_AGE_DAYS),
        }
    }

    pub fn with_limits(mut self, max_bytes: usize, max_age_days: i64) -> Self {
        self.max_bytes = max_bytes;
        self.max_age = Duration::days(max_age_days);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_jar(&self) -> Result<Jar, StorageError> {
        if !self.path.exists() {
            return Ok(Jar::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Jar::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn read_at(&self, key: &str, now: DateTime<Utc>) -> Result<Option<String>, StorageError> {
        let jar = self.load_jar()?;
        Ok(jar
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone()))
    }

    fn write_at(&self, key: &str, value: &str, now: DateTime<Utc>) -> Result<(), StorageError> {
        let size = key.len() + 1 + value.len();
        if size > self.max_bytes {
            return Err(StorageError::TooLarge {
                key: key.to_string(),
                size,
                limit: self.max_bytes,
            });
        }

        let mut jar = self.load_jar()?;
        jar.retain(|_, entry| entry.expires_at > now);
        jar.insert(
            key.to_string(),
            CookieEntry {
                value: value.to_string(),
                expires_at: now + self.max_age,
            },
        );

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&jar)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl DurableStore for CookieJarStore {
    fn name(&self) -> &'static str {
        "cookie-jar"
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.read_at(key, Utc::now())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_at(key, value, Utc::now())
    }
}
