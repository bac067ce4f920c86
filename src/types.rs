//! Core types for the syllabus checklist: ids, node keys, and the canonical forest.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delimiter joining the subject id and path elements of a [`NodeKey`].
pub const KEY_DELIMITER: char = ':';

/// Identifier of a node or subject.
///
/// Ids are unique only within their sibling list. The source document is not
/// validated, so string ids and missing ids are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Number(i64),
    Text(String),
    Missing,
}

/// Subjects share the node id space.
pub type SubjectId = NodeId;

impl NodeId {
    /// Parse one segment of a node key. Canonical integers win over text; an
    /// empty segment is a missing id.
    pub fn parse_segment(segment: &str) -> Self {
        if segment.is_empty() {
            return NodeId::Missing;
        }
        match segment.parse::<i64>() {
            Ok(n) if n.to_string() == segment => NodeId::Number(n),
            _ => NodeId::Text(segment.to_string()),
        }
    }

    /// Equal as key segments. `Number(2)` and `Text("2")` address the same node.
    pub fn matches(&self, other: &NodeId) -> bool {
        match (self, other) {
            (NodeId::Number(n), NodeId::Text(s)) | (NodeId::Text(s), NodeId::Number(n)) => {
                *s == n.to_string()
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Number(n) => write!(f, "{}", n),
            NodeId::Text(s) => f.write_str(s),
            NodeId::Missing => Ok(()),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Number(n)
    }
}

impl From<i32> for NodeId {
    fn from(n: i32) -> Self {
        NodeId::Number(n.into())
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Text(s.to_string())
    }
}

/// String key addressing a tree position: `<subject>:<id>:<id>...`.
///
/// Injective over `(subject, path)` as long as no id contains [`KEY_DELIMITER`].
/// Text ids holding the delimiter can collide; this is a known limitation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(subject_id: &SubjectId, path: &[NodeId]) -> Self {
        let joined = path
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(&KEY_DELIMITER.to_string());
        NodeKey(format!("{}{}{}", subject_id, KEY_DELIMITER, joined))
    }

    /// Key for `path + [id]`, the usual way callers address a child.
    pub fn child(subject_id: &SubjectId, path: &[NodeId], id: &NodeId) -> Self {
        let mut full = path.to_vec();
        full.push(id.clone());
        Self::new(subject_id, &full)
    }

    /// Split a key back into subject id and path.
    ///
    /// Returns `None` for text without a delimiter or with an empty path.
    pub fn parse(text: &str) -> Option<(SubjectId, Vec<NodeId>)> {
        let mut parts = text.split(KEY_DELIMITER);
        let subject = NodeId::parse_segment(parts.next()?);
        let path: Vec<NodeId> = parts.map(NodeId::parse_segment).collect();
        if path.is_empty() || path == [NodeId::Missing] {
            return None;
        }
        Some((subject, path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        NodeKey(s.to_string())
    }
}

/// Canonical tree node. A node without children is a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(id: impl Into<NodeId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn branch(id: impl Into<NodeId>, name: &str, children: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of leaves in this subtree, counting the node itself if it is one.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(Node::leaf_count).sum()
        }
    }
}

/// External link attached to a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub label: String,
    pub url: String,
}

/// A subject and its topic trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub topics: Vec<Node>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Subject {
    /// Resolve a root-to-node path. The first sibling whose id matches the
    /// segment wins.
    pub fn find_node(&self, path: &[NodeId]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.topics.iter().find(|n| n.id.matches(first))?;
        for id in rest {
            node = node.children.iter().find(|n| n.id.matches(id))?;
        }
        Some(node)
    }

    pub fn leaf_count(&self) -> usize {
        self.topics.iter().map(Node::leaf_count).sum()
    }
}

/// The normalized, read-only collection of subjects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    pub subjects: Vec<Subject>,
}

impl Forest {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    pub fn subject(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id.matches(id))
    }

    /// Look up a subject by id text, falling back to a case-insensitive name match.
    pub fn find_subject(&self, query: &str) -> Option<&Subject> {
        let id = NodeId::parse_segment(query);
        self.subject(&id).or_else(|| {
            self.subjects
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(query))
        })
    }
}
