//! In-memory document store

use super::{sort_by_created_at, Collection, DocumentStore, FieldEq};
use crate::error::Result;
use crate::types::LogEntry;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Volatile store backed by hash maps; used for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<Collection, HashMap<String, Value>>>,
    activity: RwLock<Vec<LogEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: Collection) -> usize {
        self.docs
            .read()
            .await
            .get(&collection)
            .map_or(0, HashMap::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn put(&self, collection: Collection, id: &str, doc: Value) -> Result<()> {
        self.docs
            .write()
            .await
            .entry(collection)
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        Ok(self
            .docs
            .read()
            .await
            .get(&collection)
            .and_then(|c| c.get(id))
            .cloned())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
        Ok(self
            .docs
            .write()
            .await
            .get_mut(&collection)
            .and_then(|c| c.remove(id))
            .is_some())
    }

    async fn list(&self, collection: Collection, filter: Option<&FieldEq>) -> Result<Vec<Value>> {
        let docs = self.docs.read().await;
        let mut out: Vec<Value> = docs
            .get(&collection)
            .map(|c| {
                c.values()
                    .filter(|doc| filter.map_or(true, |f| f.matches(doc)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        sort_by_created_at(&mut out);
        Ok(out)
    }

    async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.activity.write().await.push(entry.clone());
        Ok(())
    }

    async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let activity = self.activity.read().await;
        let take = limit.unwrap_or(activity.len());
        Ok(activity.iter().rev().take(take).cloned().collect())
    }
}
