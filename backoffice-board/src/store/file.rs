//! File-backed document store.
//!
//! ```text
//! data/
//! ├── boards/{id}.json
//! ├── columns/{id}.json
//! ├── tasks/{id}.json
//! ├── activity/current.jsonl   # newest entry last on disk
//! └── .lock
//! ```

use super::{sort_by_created_at, Collection, DocumentStore, FieldEq};
use crate::error::{BoardError, Result};
use crate::types::LogEntry;
use async_trait::async_trait;
use fs2::FileExt;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// One JSON file per document under a root directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`; directories are created lazily
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a collection
    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.as_str())
    }

    /// Path to one document
    pub fn document_path(&self, collection: Collection, id: &str) -> PathBuf {
        self.collection_dir(collection).join(format!("{}.json", id))
    }

    /// Path to the activity log
    pub fn activity_path(&self) -> PathBuf {
        self.root.join("activity").join("current.jsonl")
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    /// Try to acquire an exclusive lock (non-blocking)
    pub async fn lock(&self) -> Result<StoreLock> {
        let lock_path = self.lock_path();
        fs::create_dir_all(&self.root).await?;

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(StoreLock { file }),
            Err(_) => Err(BoardError::LockBusy { path: lock_path }),
        }
    }

    /// Reject ids that would escape the collection directory
    fn check_id(id: &str) -> Result<()> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(BoardError::invalid_value("id", format!("'{}' is not a valid document id", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn put(&self, collection: Collection, id: &str, doc: Value) -> Result<()> {
        Self::check_id(id)?;
        let _lock = self.lock().await?;
        let content = serde_json::to_string_pretty(&doc)?;
        atomic_write(&self.document_path(collection, id), content.as_bytes()).await
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        Self::check_id(id)?;
        let path = self.document_path(collection, id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
        Self::check_id(id)?;
        let _lock = self.lock().await?;
        let path = self.document_path(collection, id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).await?;
        Ok(true)
    }

    async fn list(&self, collection: Collection, filter: Option<&FieldEq>) -> Result<Vec<Value>> {
        let dir = self.collection_dir(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            let doc: Value = serde_json::from_str(&content)?;
            if filter.map_or(true, |f| f.matches(&doc)) {
                docs.push(doc);
            }
        }

        sort_by_created_at(&mut docs);
        Ok(docs)
    }

    async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        let path = self.activity_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let path = self.activity_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).await?;
        let mut entries: Vec<LogEntry> = content
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();
        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }
}

/// RAII lock guard - releases on drop
pub struct StoreLock {
    file: std::fs::File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await?;
    Ok(())
}
