//! Persistence adapter mirroring checklist state into the durable stores.
//!
//! Loads read the primary store first and fall back to the secondary.
//! Saves write the full map to both stores. Every failure is logged and
//! swallowed: the in-memory state stays authoritative for the session.

use crate::checklist::{ChecklistState, StateChange};
use crate::store::DurableStore;
use crate::types::NodeKey;
use std::collections::BTreeMap;

/// Storage key prefix for the checked-leaves map.
pub const CHECKED_LEAVES_KEY: &str = "checked-leaves";

/// Storage key prefix for the open-node map.
pub const OPEN_NODE_MAP_KEY: &str = "open-node-map";

type KeyMap = BTreeMap<NodeKey, bool>;

pub struct PersistenceAdapter {
    primary: Box<dyn DurableStore>,
    secondary: Box<dyn DurableStore>,
    version: String,
}

impl PersistenceAdapter {
    pub fn new(
        primary: Box<dyn DurableStore>,
        secondary: Box<dyn DurableStore>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            primary,
            secondary,
            version: version.into(),
        }
    }

    /// Versioned storage key, e.g. `checked-leaves-v1`.
    pub fn storage_key(&self, record: &str) -> String {
        format!("{}-{}", record, self.version)
    }

    pub fn load_state(&self) -> ChecklistState {
        let checked = self.load_map(&self.storage_key(CHECKED_LEAVES_KEY));
        let open = self.load_map(&self.storage_key(OPEN_NODE_MAP_KEY));
        ChecklistState::from_maps(checked, open)
    }

    pub fn save_checked(&self, state: &ChecklistState) {
        self.save_map(&self.storage_key(CHECKED_LEAVES_KEY), state.checked_leaves());
    }

    pub fn save_open(&self, state: &ChecklistState) {
        self.save_map(&self.storage_key(OPEN_NODE_MAP_KEY), state.open_nodes());
    }

    /// Persist only the map a transition touched.
    pub fn save_change(&self, state: &ChecklistState, change: StateChange) {
        match change {
            StateChange::Checked => self.save_checked(state),
            StateChange::Open => self.save_open(state),
        }
    }

    fn load_map(&self, key: &str) -> KeyMap {
        let raw = match self.read_from(self.primary.as_ref(), key) {
            Some(value) => Some(value),
            None => self.read_from(self.secondary.as_ref(), key),
        };
        let Some(raw) = raw else {
            return KeyMap::new();
        };
        match serde_json::from_str::<KeyMap>(&raw) {
            Ok(map) => {
                tracing::debug!(key, entries = map.len(), "Loaded persisted state");
                map
            }
            Err(e) => {
                tracing::warn!(key, "Failed to parse persisted state, starting empty: {}", e);
                KeyMap::new()
            }
        }
    }

    fn read_from(&self, store: &dyn DurableStore, key: &str) -> Option<String> {
        match store.read(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, store = store.name(), "Failed to read persisted state: {}", e);
                None
            }
        }
    }

    fn save_map(&self, key: &str, map: &KeyMap) {
        let serialized = match serde_json::to_string(map) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(key, "Failed to serialize state: {}", e);
                return;
            }
        };
        for store in [self.primary.as_ref(), self.secondary.as_ref()] {
            if let Err(e) = store.write(key, &serialized) {
                tracing::warn!(key, store = store.name(), "Failed to persist state: {}", e);
            }
        }
    }
}
