//! Document storage seam.
//!
//! The board engine only needs a small slice of a document database: put,
//! get and delete a JSON document by id inside a named collection, and list
//! a collection filtered by one equality predicate, ordered by creation time.
//! Anything that can do that (a hosted backend, a directory of JSON files, a
//! hash map) can sit behind [`DocumentStore`].

mod file;
mod memory;

pub use file::{FileStore, StoreLock};
pub use memory::MemoryStore;

use crate::error::Result;
use crate::types::{Board, Column, LogEntry, Task};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Named collections known to the board engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Boards,
    Columns,
    Tasks,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boards => "boards",
            Self::Columns => "columns",
            Self::Tasks => "tasks",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality predicate on a top-level document field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEq {
    pub field: &'static str,
    pub value: Value,
}

impl FieldEq {
    pub fn new(field: &'static str, value: impl Into<Value>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Whether `doc` satisfies the predicate
    pub fn matches(&self, doc: &Value) -> bool {
        doc.get(self.field) == Some(&self.value)
    }
}

/// Minimal async document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace a document
    async fn put(&self, collection: Collection, id: &str, doc: Value) -> Result<()>;

    /// Fetch a document; `None` when absent
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>>;

    /// Remove a document; returns whether it existed
    async fn delete(&self, collection: Collection, id: &str) -> Result<bool>;

    /// All documents of a collection matching `filter`, oldest first by `created_at`
    async fn list(&self, collection: Collection, filter: Option<&FieldEq>) -> Result<Vec<Value>>;

    /// Append an entry to the activity log
    async fn append_activity(&self, entry: &LogEntry) -> Result<()>;

    /// Activity log entries, newest first
    async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>>;
}

/// A typed record stored in a [`Collection`]
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    fn record_id(&self) -> &str;
}

impl Record for Board {
    const COLLECTION: Collection = Collection::Boards;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for Column {
    const COLLECTION: Collection = Collection::Columns;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for Task {
    const COLLECTION: Collection = Collection::Tasks;

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Order documents by their `created_at` timestamp, then by `id`.
///
/// Documents without a parseable timestamp sort first.
pub(crate) fn sort_by_created_at(docs: &mut [Value]) {
    fn created_at(doc: &Value) -> Option<DateTime<Utc>> {
        doc.get("created_at")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn id(doc: &Value) -> &str {
        doc.get("id").and_then(Value::as_str).unwrap_or_default()
    }

    docs.sort_by(|a, b| match created_at(a).cmp(&created_at(b)) {
        Ordering::Equal => id(a).cmp(id(b)),
        other => other,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_eq_matches() {
        let pred = FieldEq::new("board_id", "b1");
        assert!(pred.matches(&json!({"board_id": "b1"})));
        assert!(!pred.matches(&json!({"board_id": "b2"})));
        assert!(!pred.matches(&json!({})));
    }

    #[test]
    fn test_sort_by_created_at_uses_time_not_text() {
        let mut docs = vec![
            json!({"id": "b", "created_at": "2026-01-01T00:00:01Z"}),
            json!({"id": "a", "created_at": "2026-01-01T00:00:00.5Z"}),
            json!({"id": "c"}),
        ];
        sort_by_created_at(&mut docs);
        let ids: Vec<_> = docs.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }
}
