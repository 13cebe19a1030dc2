//! On-disk document format
//!
//! ```json
//! {
//!   "node-ids": "1,2",
//!   "path-ids": "3",
//!   "document-style": { "properties": { "line-width": "0.6pt" } },
//!   "nodes": {
//!     "node-1": { "pos": "(-3cm, 3cm)", "text": "a", "style": { "parent": 0, "properties": {} } }
//!   },
//!   "paths": {
//!     "path-3": { "type": "line", "start": "(1)", "end": "(2.north)", "style": { ... } }
//!   }
//! }
//! ```
//!
//! Property values are stored as canonical strings so the file stays
//! readable and diffable.

use crate::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File extension for saved documents
pub const FILE_EXTENSION: &str = "tikzkit";

/// Parent id written for a style that has no parent
pub const NO_PARENT: i64 = -1;

/// Complete file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DocumentFile {
    /// Comma separated node ids in creation order
    #[serde(default)]
    pub node_ids: String,
    /// Comma separated path ids in creation order
    #[serde(default)]
    pub path_ids: String,
    #[serde(default)]
    pub document_style: DocumentStyleRecord,
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeRecord>,
    #[serde(default)]
    pub paths: BTreeMap<String, PathRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStyleRecord {
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// Style of a node or path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRecord {
    /// Id of the parent style; 0 is the document style
    #[serde(default)]
    pub parent: i64,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl Default for StyleRecord {
    fn default() -> Self {
        Self {
            parent: 0,
            properties: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub pos: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub style: StyleRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,
    #[serde(default)]
    pub style: StyleRecord,
}

pub fn node_key(id: i64) -> String {
    format!("node-{}", id)
}

pub fn path_key(id: i64) -> String {
    format!("path-{}", id)
}

/// Join ids as `1,2,3`
pub fn format_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse `1,2,3`; an empty string is an empty list
pub fn parse_ids(text: &str) -> Result<Vec<i64>> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| StoreError::InvalidFormat(format!("invalid id '{}'", part)))
        })
        .collect()
}
