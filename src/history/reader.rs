//! Subtree reading and flattening.
//!
//! # Responsibilities
//! - Fetch a node through a `SubtreeSource`
//! - Flatten children and grandchildren into `HistoryNode`s
//! - Order nodes by key, descending, as plain strings
//!
//! # Design Decisions
//! - Ordering is byte-wise on the key, not numeric: `"9"` sorts before `"10"`.
//!   Keys are only "newest first" when they have a fixed width
//!   (push IDs, zero-padded timestamps)
//! - A missing node (`null`) is an empty history, not an error

use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::firebase::FirebaseResult;
use crate::history::path::DbPath;
use crate::history::types::{FieldEntry, HistoryNode};

/// Key used when a child holds a bare scalar instead of an object.
pub const SCALAR_FIELD_KEY: &str = "value";

/// Anything that can return the JSON value stored at a database path.
pub trait SubtreeSource: Send + Sync {
    fn fetch<'a>(&'a self, path: &'a DbPath) -> BoxFuture<'a, FirebaseResult<Value>>;
}

/// Reads a node and reshapes it into a sorted history list.
#[derive(Clone)]
pub struct HistoryReader {
    source: Arc<dyn SubtreeSource>,
}

impl HistoryReader {
    pub fn new(source: Arc<dyn SubtreeSource>) -> Self {
        Self { source }
    }

    pub async fn read(&self, path: &DbPath) -> FirebaseResult<Vec<HistoryNode>> {
        let value = self.source.fetch(path).await?;
        let nodes = flatten_subtree(value);
        tracing::debug!(path = %path, count = nodes.len(), "Subtree flattened");
        Ok(nodes)
    }
}

impl std::fmt::Debug for HistoryReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryReader").finish_non_exhaustive()
    }
}

/// Flatten the value of a node into one `HistoryNode` per child, sorted by
/// key in descending string order.
///
/// Firebase serves nodes whose keys are dense integers as JSON arrays, so
/// arrays are read as index-keyed objects with `null` holes skipped.
pub fn flatten_subtree(root: Value) -> Vec<HistoryNode> {
    let mut nodes: Vec<HistoryNode> = entries(root)
        .map(|(key, child)| HistoryNode::new(key, fields(child)))
        .collect();
    sort_desc(&mut nodes);
    nodes
}

/// Reverse lexicographic order on the raw key bytes.
pub fn sort_desc(nodes: &mut [HistoryNode]) {
    nodes.sort_by(|a, b| b.key.cmp(&a.key));
}

fn fields(child: Value) -> Vec<FieldEntry> {
    match child {
        Value::Null => Vec::new(),
        Value::Object(_) | Value::Array(_) => entries(child)
            .map(|(key, data)| FieldEntry::new(key, data))
            .collect(),
        scalar => vec![FieldEntry::new(SCALAR_FIELD_KEY, scalar)],
    }
}

fn entries(value: Value) -> Box<dyn Iterator<Item = (String, Value)>> {
    match value {
        Value::Object(map) => Box::new(map.into_iter()),
        Value::Array(items) => Box::new(
            items
                .into_iter()
                .enumerate()
                .filter(|(_, v)| !v.is_null())
                .map(|(i, v)| (i.to_string(), v)),
        ),
        _ => Box::new(std::iter::empty()),
    }
}
