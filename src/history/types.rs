//! History records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One child of the requested node, with its own children flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryNode {
    /// Database key of the child.
    pub key: String,
    /// Grandchildren in the order the database returned them. May be empty.
    pub children: Vec<FieldEntry>,
}

/// A grandchild key and its raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub key: String,
    /// Scalar or nested value; stringified only when rendered.
    pub data: Value,
}

impl HistoryNode {
    pub fn new(key: impl Into<String>, children: Vec<FieldEntry>) -> Self {
        Self {
            key: key.into(),
            children,
        }
    }
}

impl FieldEntry {
    pub fn new(key: impl Into<String>, data: Value) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }
}
