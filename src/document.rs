//! Subject document normalization.
//!
//! The subject document is external content with a loose shape: the topic
//! level may nest its items under `items` or `subtopics`, deeper levels under
//! `children` or `items`. This is the only place that knows about those raw
//! field names. Everything downstream sees the canonical [`Forest`].

use crate::error::ApiError;
use crate::types::{Forest, Node, NodeId, Resource, Subject};
use serde_json::Value;
use std::path::Path;

/// Child field names accepted on a topic, in precedence order.
pub const TOPIC_CHILD_FIELDS: &[&str] = &["items", "subtopics"];

/// Child field names accepted below the topic level, in precedence order.
///
/// `subtopics` comes last because the bundled document uses it at every depth.
pub const NESTED_CHILD_FIELDS: &[&str] = &["children", "items", "subtopics"];

/// Sample document used when no document path is configured.
pub const BUNDLED_DOCUMENT: &str = include_str!("../data/subjects.json");

/// Read and normalize a document from disk.
pub fn load_document(path: &Path) -> Result<Forest, ApiError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ApiError::DocumentError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let forest = parse_document(&content)?;
    tracing::debug!(
        path = %path.display(),
        subjects = forest.subjects.len(),
        "Loaded subject document"
    );
    Ok(forest)
}

/// Parse document text and normalize it.
///
/// Only invalid JSON is an error. Shape problems are tolerated.
pub fn parse_document(content: &str) -> Result<Forest, ApiError> {
    let raw: Value = serde_json::from_str(content)
        .map_err(|e| ApiError::DocumentError(format!("Invalid subject document: {}", e)))?;
    Ok(normalize(&raw))
}

/// Normalize a raw document into the canonical forest.
///
/// Accepts either a list of subjects or a mapping whose values are subjects
/// (kept in document order).
pub fn normalize(raw: &Value) -> Forest {
    let subjects = match raw {
        Value::Array(entries) => entries.iter().map(normalize_subject).collect(),
        Value::Object(map) => map.values().map(normalize_subject).collect(),
        _ => Vec::new(),
    };
    Forest::new(subjects)
}

fn normalize_subject(raw: &Value) -> Subject {
    let topics = match raw.get("topics") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| normalize_node(item, TOPIC_CHILD_FIELDS))
            .collect(),
        _ => Vec::new(),
    };
    let resources = match raw.get("resources") {
        Some(Value::Array(items)) => items.iter().map(normalize_resource).collect(),
        _ => Vec::new(),
    };
    Subject {
        id: read_id(raw),
        name: read_string(raw, "name"),
        topics,
        resources,
    }
}

/// Map one raw item, picking children from the first present field name.
fn normalize_node(raw: &Value, fields: &[&str]) -> Node {
    let children = select_children(raw, fields)
        .map(|items| {
            items
                .iter()
                .map(|item| normalize_node(item, NESTED_CHILD_FIELDS))
                .collect()
        })
        .unwrap_or_default();
    Node {
        id: read_id(raw),
        name: read_string(raw, "name"),
        children,
    }
}

/// First listed field that is present and not null wins, even if it is empty.
/// A present field that is not an array means no children.
fn select_children<'a>(raw: &'a Value, fields: &[&str]) -> Option<&'a Vec<Value>> {
    let value = fields
        .iter()
        .filter_map(|field| raw.get(*field))
        .find(|value| !value.is_null())?;
    value.as_array()
}

fn normalize_resource(raw: &Value) -> Resource {
    Resource {
        label: read_string(raw, "label"),
        url: read_string(raw, "url"),
    }
}

fn read_id(raw: &Value) -> NodeId {
    match raw.get("id") {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => NodeId::Number(i),
            None => NodeId::Text(n.to_string()),
        },
        Some(Value::String(s)) => NodeId::Text(s.clone()),
        _ => NodeId::Missing,
    }
}

fn read_string(raw: &Value, field: &str) -> String {
    match raw.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
