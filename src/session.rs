//! Checklist session: the forest, its state, and the adapter that persists it.

use crate::checklist::{ChecklistAction, ChecklistState, Progress, StateChange};
use crate::error::ApiError;
use crate::store::PersistenceAdapter;
use crate::types::{Forest, NodeId, NodeKey, Subject, SubjectId};

pub struct ChecklistSession {
    forest: Forest,
    state: ChecklistState,
    persistence: PersistenceAdapter,
}

impl ChecklistSession {
    /// Hydrate state from the stores once, at open.
    pub fn open(forest: Forest, persistence: PersistenceAdapter) -> Self {
        let state = persistence.load_state();
        tracing::info!(
            subjects = forest.subjects.len(),
            checked = state.checked_leaves().len(),
            open = state.open_nodes().len(),
            "Opened checklist session"
        );
        Self {
            forest,
            state,
            persistence,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn state(&self) -> &ChecklistState {
        &self.state
    }

    pub fn subject(&self, id: &SubjectId) -> Result<&Subject, ApiError> {
        self.forest
            .subject(id)
            .ok_or_else(|| ApiError::SubjectNotFound(id.to_string()))
    }

    /// Apply one action and persist the touched map once.
    pub fn dispatch(
        &mut self,
        subject_id: &SubjectId,
        action: &ChecklistAction,
    ) -> Result<StateChange, ApiError> {
        let subject = self
            .forest
            .subject(subject_id)
            .ok_or_else(|| ApiError::SubjectNotFound(subject_id.to_string()))?;
        let change = self.state.apply(subject, action)?;
        self.persistence.save_change(&self.state, change);
        Ok(change)
    }

    /// Checkbox click addressed by node key text.
    pub fn click(&mut self, key: &str) -> Result<StateChange, ApiError> {
        let (subject_id, path) = parse_key(key)?;
        self.dispatch(&subject_id, &ChecklistAction::ClickCheckbox { path })
    }

    /// Expand or collapse an interior node addressed by node key text.
    pub fn toggle_open(&mut self, key: &str) -> Result<StateChange, ApiError> {
        let (subject_id, path) = parse_key(key)?;
        self.dispatch(&subject_id, &ChecklistAction::ToggleNodeOpen { path })
    }

    pub fn progress(&self, subject: &Subject) -> Progress {
        self.state.progress(subject)
    }
}

fn parse_key(key: &str) -> Result<(SubjectId, Vec<NodeId>), ApiError> {
    NodeKey::parse(key).ok_or_else(|| {
        ApiError::InvalidArgument(format!(
            "Invalid node key '{}', expected <subject>:<id>[:<id>...]",
            key
        ))
    })
}
