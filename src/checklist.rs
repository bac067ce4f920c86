//! Checklist state engine.
//!
//! Holds which leaves are checked and which interior nodes are expanded,
//! both keyed by [`NodeKey`]. Aggregate "fully checked" status is always
//! derived from the leaf map on demand and never stored.

use crate::error::ApiError;
use crate::types::{Node, NodeId, NodeKey, Subject, SubjectId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Leaf key -> checked. Absent means unchecked.
pub type CheckedLeaves = BTreeMap<NodeKey, bool>;

/// Interior node key -> expanded. Absent means collapsed.
pub type OpenNodes = BTreeMap<NodeKey, bool>;

/// Keys of every leaf under `node`, depth-first and left to right.
///
/// `path_to_node` is the path of the node's parent; the node's own id is
/// appended to it. A leaf yields its own key.
pub fn collect_leaf_keys(
    subject_id: &SubjectId,
    path_to_node: &[NodeId],
    node: &Node,
) -> Vec<NodeKey> {
    let mut path = path_to_node.to_vec();
    path.push(node.id.clone());
    let mut keys = Vec::new();
    collect_into(subject_id, &mut path, node, &mut keys);
    keys
}

fn collect_into(
    subject_id: &SubjectId,
    path: &mut Vec<NodeId>,
    node: &Node,
    keys: &mut Vec<NodeKey>,
) {
    if node.is_leaf() {
        keys.push(NodeKey::new(subject_id, path));
        return;
    }
    for child in &node.children {
        path.push(child.id.clone());
        collect_into(subject_id, path, child, keys);
        path.pop();
    }
}

/// Which persisted map a transition touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Checked,
    Open,
}

/// A user interaction on one subject's checklist.
///
/// Paths are full root-to-node paths, target id included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ChecklistAction {
    ToggleLeaf { path: Vec<NodeId> },
    SetAllDescendants { path: Vec<NodeId>, value: bool },
    ToggleNodeOpen { path: Vec<NodeId> },
    /// Checkbox click: leaves toggle, interior nodes bulk-set to the inverse
    /// of their current fully-checked status.
    ClickCheckbox { path: Vec<NodeId> },
}

impl ChecklistAction {
    pub fn path(&self) -> &[NodeId] {
        match self {
            ChecklistAction::ToggleLeaf { path }
            | ChecklistAction::SetAllDescendants { path, .. }
            | ChecklistAction::ToggleNodeOpen { path }
            | ChecklistAction::ClickCheckbox { path } => path,
        }
    }
}

/// Checked leaves over total leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub checked: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.checked * 100) / self.total) as u32
    }
}

/// Checked and open maps for the whole forest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistState {
    checked: CheckedLeaves,
    open: OpenNodes,
}

impl ChecklistState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_maps(checked: CheckedLeaves, open: OpenNodes) -> Self {
        Self { checked, open }
    }

    pub fn checked_leaves(&self) -> &CheckedLeaves {
        &self.checked
    }

    pub fn open_nodes(&self) -> &OpenNodes {
        &self.open
    }

    pub fn is_checked(&self, key: &NodeKey) -> bool {
        self.checked.get(key).copied().unwrap_or(false)
    }

    pub fn is_open(&self, key: &NodeKey) -> bool {
        self.open.get(key).copied().unwrap_or(false)
    }

    /// True iff the subtree has at least one leaf and every leaf is checked.
    pub fn is_fully_checked(
        &self,
        subject_id: &SubjectId,
        path_to_node: &[NodeId],
        node: &Node,
    ) -> bool {
        let keys = collect_leaf_keys(subject_id, path_to_node, node);
        !keys.is_empty() && keys.iter().all(|k| self.is_checked(k))
    }

    /// Set every leaf under `node` to `value` in a single map replacement.
    pub fn set_all_descendants(
        &mut self,
        subject_id: &SubjectId,
        path_to_node: &[NodeId],
        node: &Node,
        value: bool,
    ) {
        let keys = collect_leaf_keys(subject_id, path_to_node, node);
        let mut next = self.checked.clone();
        for key in &keys {
            next.insert(key.clone(), value);
        }
        self.checked = next;
        tracing::debug!(leaves = keys.len(), value, "Set all descendants");
    }

    pub fn toggle_leaf(
        &mut self,
        subject_id: &SubjectId,
        path_to_node: &[NodeId],
        leaf_id: &NodeId,
    ) {
        let key = NodeKey::child(subject_id, path_to_node, leaf_id);
        let value = !self.is_checked(&key);
        tracing::debug!(key = %key, value, "Toggled leaf");
        self.checked.insert(key, value);
    }

    pub fn toggle_node_open(
        &mut self,
        subject_id: &SubjectId,
        path_to_node: &[NodeId],
        node_id: &NodeId,
    ) {
        let key = NodeKey::child(subject_id, path_to_node, node_id);
        let value = !self.is_open(&key);
        tracing::debug!(key = %key, value, "Toggled node open");
        self.open.insert(key, value);
    }

    /// Checkbox click on `node`, routed by whether it is a leaf.
    pub fn click_checkbox(&mut self, subject_id: &SubjectId, path_to_node: &[NodeId], node: &Node) {
        if node.is_leaf() {
            self.toggle_leaf(subject_id, path_to_node, &node.id);
        } else {
            let fully = self.is_fully_checked(subject_id, path_to_node, node);
            self.set_all_descendants(subject_id, path_to_node, node, !fully);
        }
    }

    /// Apply an action in place and report which map changed.
    pub fn apply(
        &mut self,
        subject: &Subject,
        action: &ChecklistAction,
    ) -> Result<StateChange, ApiError> {
        let path = action.path();
        let (_, parent) = path
            .split_last()
            .ok_or_else(|| ApiError::InvalidArgument("Empty node path".to_string()))?;
        let node = lookup(subject, path)?;
        match action {
            ChecklistAction::ToggleLeaf { .. } => {
                if !node.is_leaf() {
                    return Err(not_applicable(subject, path, "is not a leaf"));
                }
                self.toggle_leaf(&subject.id, parent, &node.id);
                Ok(StateChange::Checked)
            }
            ChecklistAction::ToggleNodeOpen { .. } => {
                if node.is_leaf() {
                    return Err(not_applicable(subject, path, "is a leaf and cannot be expanded"));
                }
                self.toggle_node_open(&subject.id, parent, &node.id);
                Ok(StateChange::Open)
            }
            ChecklistAction::SetAllDescendants { value, .. } => {
                self.set_all_descendants(&subject.id, parent, node, *value);
                Ok(StateChange::Checked)
            }
            ChecklistAction::ClickCheckbox { .. } => {
                self.click_checkbox(&subject.id, parent, node);
                Ok(StateChange::Checked)
            }
        }
    }

    /// Pure transition: `(state, action) -> state`.
    pub fn reduce(
        &self,
        subject: &Subject,
        action: &ChecklistAction,
    ) -> Result<ChecklistState, ApiError> {
        let mut next = self.clone();
        next.apply(subject, action)?;
        Ok(next)
    }

    pub fn progress(&self, subject: &Subject) -> Progress {
        let keys: Vec<NodeKey> = subject
            .topics
            .iter()
            .flat_map(|topic| collect_leaf_keys(&subject.id, &[], topic))
            .collect();
        Progress {
            checked: keys.iter().filter(|k| self.is_checked(k)).count(),
            total: keys.len(),
        }
    }
}

fn lookup<'a>(subject: &'a Subject, path: &[NodeId]) -> Result<&'a Node, ApiError> {
    subject
        .find_node(path)
        .ok_or_else(|| ApiError::NodeNotFound(NodeKey::new(&subject.id, path).to_string()))
}

fn not_applicable(subject: &Subject, path: &[NodeId], reason: &str) -> ApiError {
    ApiError::InvalidArgument(format!("{} {}", NodeKey::new(&subject.id, path), reason))
}

/// Framework-independent description of one checklist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedNode {
    pub key: NodeKey,
    pub path: Vec<NodeId>,
    pub name: String,
    pub depth: usize,
    pub checked: bool,
    pub has_children: bool,
    pub expanded: bool,
    pub children: Vec<RenderedNode>,
}

/// Render a sibling list. Children of collapsed nodes are left out unless
/// `expand_all` is set.
pub fn render_nodes(
    subject_id: &SubjectId,
    nodes: &[Node],
    path: &[NodeId],
    state: &ChecklistState,
    expand_all: bool,
) -> Vec<RenderedNode> {
    nodes
        .iter()
        .map(|node| {
            let mut own_path = path.to_vec();
            own_path.push(node.id.clone());
            let key = NodeKey::new(subject_id, &own_path);
            let has_children = !node.is_leaf();
            let expanded = has_children && state.is_open(&key);
            let children = if has_children && (expanded || expand_all) {
                render_nodes(subject_id, &node.children, &own_path, state, expand_all)
            } else {
                Vec::new()
            };
            RenderedNode {
                checked: state.is_fully_checked(subject_id, path, node),
                name: node.name.clone(),
                depth: path.len(),
                key,
                path: own_path,
                has_children,
                expanded,
                children,
            }
        })
        .collect()
}

pub fn render_subject(
    subject: &Subject,
    state: &ChecklistState,
    expand_all: bool,
) -> Vec<RenderedNode> {
    render_nodes(&subject.id, &subject.topics, &[], state, expand_all)
}

/// Rendered rows in display order.
pub fn flatten(rows: &[RenderedNode]) -> Vec<&RenderedNode> {
    let mut out = Vec::new();
    for row in rows {
        out.push(row);
        out.extend(flatten(&row.children));
    }
    out
}
