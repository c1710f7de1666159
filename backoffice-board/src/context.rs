//! BoardContext - typed I/O primitives over a document store
//!
//! The context provides access to storage. No business logic methods, just
//! data access primitives. Commands do all the work.

use crate::error::{BoardError, Result};
use crate::store::{DocumentStore, FieldEq, Record};
use crate::types::{Board, BoardId, Column, ColumnId, LogEntry, Task, TaskId};
use std::sync::Arc;

/// Context passed to every command - provides access, not logic
#[derive(Clone)]
pub struct BoardContext {
    store: Arc<dyn DocumentStore>,
}

impl BoardContext {
    /// Create a context over any store
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a context sharing an already boxed store
    pub fn from_arc(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    // =========================================================================
    // Generic record I/O
    // =========================================================================

    async fn read<R: Record>(&self, id: &str) -> Result<Option<R>> {
        match self.store.get(R::COLLECTION, id).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    async fn write<R: Record>(&self, record: &R) -> Result<()> {
        let doc = serde_json::to_value(record)?;
        self.store.put(R::COLLECTION, record.record_id(), doc).await
    }

    async fn list<R: Record>(&self, filter: Option<&FieldEq>) -> Result<Vec<R>> {
        self.store
            .list(R::COLLECTION, filter)
            .await?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(BoardError::from))
            .collect()
    }

    // =========================================================================
    // Board I/O
    // =========================================================================

    /// Read a board
    pub async fn read_board(&self, id: &BoardId) -> Result<Board> {
        self.read(id.as_str())
            .await?
            .ok_or_else(|| BoardError::BoardNotFound { id: id.to_string() })
    }

    /// Write a board
    pub async fn write_board(&self, board: &Board) -> Result<()> {
        self.write(board).await
    }

    /// Delete a board document (children are not touched)
    pub async fn delete_board_record(&self, id: &BoardId) -> Result<bool> {
        self.store.delete(Board::COLLECTION, id.as_str()).await
    }

    /// All boards, oldest first
    pub async fn read_all_boards(&self) -> Result<Vec<Board>> {
        self.list(None).await
    }

    // =========================================================================
    // Column I/O
    // =========================================================================

    /// Read a column
    pub async fn read_column(&self, id: &ColumnId) -> Result<Column> {
        self.read(id.as_str())
            .await?
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })
    }

    /// Write a column
    pub async fn write_column(&self, column: &Column) -> Result<()> {
        self.write(column).await
    }

    /// Delete a column document
    pub async fn delete_column_record(&self, id: &ColumnId) -> Result<bool> {
        self.store.delete(Column::COLLECTION, id.as_str()).await
    }

    /// Columns of a board in fixed position order
    pub async fn read_columns(&self, board: &BoardId) -> Result<Vec<Column>> {
        let filter = FieldEq::new("board_id", board.as_str());
        let mut columns: Vec<Column> = self.list(Some(&filter)).await?;
        columns.sort_by_key(|c| c.position);
        Ok(columns)
    }

    // =========================================================================
    // Task I/O
    // =========================================================================

    /// Read a task
    pub async fn read_task(&self, id: &TaskId) -> Result<Task> {
        self.read(id.as_str())
            .await?
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })
    }

    /// Write a task
    pub async fn write_task(&self, task: &Task) -> Result<()> {
        self.write(task).await
    }

    /// Delete a task document
    pub async fn delete_task_record(&self, id: &TaskId) -> Result<bool> {
        self.store.delete(Task::COLLECTION, id.as_str()).await
    }

    /// All tasks of a board, oldest first.
    ///
    /// This is the authoritative read used for reconciliation.
    pub async fn read_tasks(&self, board: &BoardId) -> Result<Vec<Task>> {
        let filter = FieldEq::new("board_id", board.as_str());
        self.list(Some(&filter)).await
    }

    /// Tasks of one column, oldest first
    pub async fn read_column_tasks(&self, column: &ColumnId) -> Result<Vec<Task>> {
        let filter = FieldEq::new("column_id", column.as_str());
        self.list(Some(&filter)).await
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    /// Append a log entry to the activity log
    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.store.append_activity(entry).await
    }

    /// Activity log entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        self.store.read_activity(limit).await
    }
}
