//! Optimistic board session.
//!
//! A session keeps a local copy of one board's columns and tasks. Moves are
//! applied to the local copy first, then written through the store, then
//! reconciled by re-reading the board's tasks. The store is always the
//! source of truth after the reconciliation fetch.

use crate::context::BoardContext;
use crate::drag::{DragState, DragTracker};
use crate::error::{BoardError, Result};
use crate::filter::TaskFilter;
use crate::ordering::{apply_move, compact_column, compute_column_groups, next_order, ColumnGroups};
use crate::processor::{BoardOperationProcessor, OperationProcessor};
use crate::task::MoveTask;
use crate::types::{Board, BoardId, Column, ColumnId, Task, TaskId};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, error, warn};

/// What a move request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task already sat in the target column
    Unchanged,
    /// The task was appended to the target column at `order`
    Moved { order: u32 },
}

/// Local view of one board
pub struct BoardSession {
    ctx: BoardContext,
    processor: BoardOperationProcessor,
    presence: watch::Receiver<bool>,
    board: Board,
    columns: Vec<Column>,
    tasks: Vec<Task>,
    drag: DragTracker,
}

impl BoardSession {
    /// Load a board. `presence` carries whether a user is signed in.
    pub async fn open(
        ctx: BoardContext,
        board_id: &BoardId,
        presence: watch::Receiver<bool>,
    ) -> Result<Self> {
        if !*presence.borrow() {
            return Err(BoardError::Unauthenticated);
        }
        let board = ctx.read_board(board_id).await?;
        let columns = ctx.read_columns(board_id).await?;
        let tasks = ctx.read_tasks(board_id).await?;
        debug!(board = %board.id, columns = columns.len(), tasks = tasks.len(), "opened board session");

        Ok(Self {
            ctx,
            processor: BoardOperationProcessor::new(),
            presence,
            board,
            columns,
            tasks,
            drag: DragTracker::new(),
        })
    }

    /// Attribute writes to `processor`'s actor
    pub fn with_processor(mut self, processor: BoardOperationProcessor) -> Self {
        self.processor = processor;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Columns in position order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Local task list; may be ahead of the store between a move and its reconciliation
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Filtered tasks grouped by column
    pub fn column_groups(&self, filter: &TaskFilter) -> ColumnGroups {
        compute_column_groups(&self.tasks, filter)
    }

    fn ensure_signed_in(&self) -> Result<()> {
        if *self.presence.borrow() {
            Ok(())
        } else {
            Err(BoardError::Unauthenticated)
        }
    }

    /// Replace the local task list with the store's
    pub async fn refresh(&mut self) -> Result<()> {
        self.ensure_signed_in()?;
        self.tasks = self.ctx.read_tasks(&self.board.id).await?;
        Ok(())
    }

    /// Move a task to the end of another column.
    ///
    /// The local list changes before the write. Whatever the write's
    /// outcome, one fetch of the board's tasks follows and replaces the
    /// local list; a failed fetch keeps the optimistic state.
    pub async fn move_task(&mut self, task_id: &TaskId, column: &ColumnId) -> Result<MoveOutcome> {
        self.ensure_signed_in()?;

        let source = self
            .tasks
            .iter()
            .find(|t| &t.id == task_id)
            .map(|t| t.column_id.clone())
            .ok_or_else(|| BoardError::TaskNotFound {
                id: task_id.to_string(),
            })?;
        if !self.columns.iter().any(|c| &c.id == column) {
            return Err(BoardError::ColumnNotFound {
                id: column.to_string(),
            });
        }

        if &source == column {
            debug!(task = %task_id, "task already in target column");
            return Ok(MoveOutcome::Unchanged);
        }

        let order = next_order(&self.tasks, column);
        apply_move(&mut self.tasks, task_id, column, order);
        compact_column(&mut self.tasks, &source);

        // The store appends against its own view of the column
        let command = MoveTask::to_column(task_id, column);
        let written = self.processor.process(&command, &self.ctx).await;
        if let Err(e) = &written {
            error!(task = %task_id, error = %e, "move write failed");
        }

        if let Err(e) = self.refresh().await {
            warn!(board = %self.board.id, error = %e, "reconciliation fetch failed; keeping local order");
        }

        written.map(|stored| MoveOutcome::Moved {
            order: stored
                .get("order")
                .and_then(Value::as_u64)
                .map_or(order, |o| o as u32),
        })
    }

    // =========================================================================
    // Drag gesture
    // =========================================================================

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Pick up a task
    pub fn begin_drag(&self, task: TaskId) {
        self.drag.begin(task);
    }

    /// Pointer is over `column`
    pub fn drag_over(&self, column: ColumnId) {
        self.drag.hover(column);
    }

    pub fn cancel_drag(&self) {
        self.drag.cancel();
    }

    /// Drop the dragged task on `column`, or on the hovered column when `None`.
    ///
    /// The gesture is idle again once this returns or is abandoned.
    pub async fn drop(&mut self, column: Option<ColumnId>) -> Result<MoveOutcome> {
        let _reset = self.drag.reset_on_drop();
        match self.drag.start_drop(column) {
            Some((task, column)) => self.move_task(&task, &column).await,
            None => Ok(MoveOutcome::Unchanged),
        }
    }
}
