//! Core types for the board engine

mod board;
mod ids;
mod log;
mod task;

pub use board::{Board, Column, DEFAULT_BACKGROUND};
pub use ids::{BoardId, ColumnId, LogEntryId, TaskId};
pub use log::LogEntry;
pub use task::{Priority, Task};
