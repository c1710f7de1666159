//! Kanban board ordering engine with pluggable document storage
//!
//! This crate keeps the tasks of a board ordered inside their columns and
//! moves them between columns optimistically: a move is applied to a local
//! view first, written through a [`DocumentStore`], and then reconciled by
//! re-reading the board from the store.
//!
//! ## Overview
//!
//! - **Pure ordering** - [`ordering`] computes appends, moves, compaction and filtered grouping
//! - **Command objects** - every mutation is a serde struct implementing [`Execute`]
//! - **Activity log** - [`BoardOperationProcessor`] appends one entry per mutation, with the actor
//! - **Store seam** - [`FileStore`] (JSON files with a lock file) or [`MemoryStore`]
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use backoffice_board::{board::CreateBoard, task::{AddTask, MoveTask}, BoardContext, Execute, FileStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = BoardContext::new(FileStore::new("/var/lib/backoffice"));
//! let board = CreateBoard::new("Operations").execute(&ctx).await.into_result()?;
//!
//! let todo = board["columns"][0]["id"].as_str().unwrap_or_default();
//! let done = board["columns"][2]["id"].as_str().unwrap_or_default();
//! let task = AddTask::new(board["id"].as_str().unwrap_or_default(), todo, "Send quote")
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//!
//! MoveTask::to_column(task["id"].as_str().unwrap_or_default(), done)
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! ```text
//! data/
//! ├── boards/{id}.json
//! ├── columns/{id}.json
//! ├── tasks/{id}.json
//! ├── activity/current.jsonl   # Global operation log
//! └── .lock                    # Advisory write lock
//! ```

pub mod auto_color;
mod context;
pub mod drag;
mod error;
pub mod filter;
mod operation;
pub mod ordering;
mod processor;
mod session;
pub mod store;
pub mod types;

// Command modules
pub mod board;
pub mod column;
pub mod task;

pub use async_trait::async_trait;
pub use context::BoardContext;
pub use error::{BoardError, Result, GENERIC_FAILURE_MESSAGE};
pub use operation::{Execute, ExecutionResult, Operation};
pub use processor::{BoardOperationProcessor, OperationProcessor};
pub use session::{BoardSession, MoveOutcome};
pub use store::{Collection, DocumentStore, FieldEq, FileStore, MemoryStore};

// Re-export commonly used types
pub use filter::{Match, TaskFilter};
pub use types::{Board, BoardId, Column, ColumnId, LogEntry, Priority, Task, TaskId};
