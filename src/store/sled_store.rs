//! Primary store backed by a sled tree.

use crate::error::StorageError;
use crate::store::DurableStore;
use std::path::Path;

const STATE_TREE: &str = "checklist_state";

pub struct SledStore {
    tree: sled::Tree,
}

impl SledStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        Self::from_db(&db)
    }

    pub fn from_db(db: &sled::Db) -> Result<Self, StorageError> {
        let tree = db.open_tree(STATE_TREE)?;
        Ok(Self { tree })
    }
}

impl DurableStore for SledStore {
    fn name(&self) -> &'static str {
        "sled"
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.tree.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|_| StorageError::InvalidEncoding(key.to_string())),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.tree.insert(key.as_bytes(), value.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }
}
