//! MoveTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{logged, operation, Execute, ExecutionResult, Operation};
use crate::ordering::{compact_column, insert_at};
use crate::types::{ColumnId, TaskId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Move a task to another column of the same board.
///
/// Without an explicit `order` the task is appended to the target column;
/// an explicit `order` is a position, clamped to the column's size, and the
/// tasks at or after it shift down. Both columns are renumbered from the
/// stored tasks so their orders stay contiguous. Moving a
/// task to the column it already sits in changes nothing and is not logged.
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveTask {
    /// The task to move
    pub id: TaskId,
    /// Target column
    pub column: ColumnId,
    /// Target rank; appended when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

operation!(
    MoveTask,
    verb = "move",
    noun = "task",
    description = "Move a task to another column"
);

impl MoveTask {
    /// Move to the end of a column
    pub fn to_column(id: impl Into<TaskId>, column: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            order: None,
        }
    }

    /// Move to an explicit rank
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for MoveTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        // Ok((value, moved)); unmoved tasks are reported without a log entry
        let result: Result<(Value, bool)> = async {
            let task = ctx.read_task(&self.id).await?;
            let target = ctx.read_column(&self.column).await?;
            if target.board_id != task.board_id {
                return Err(BoardError::CrossBoardMove {
                    board: task.board_id.to_string(),
                    column: target.id.to_string(),
                });
            }

            if task.column_id == self.column {
                debug!(task = %task.id, "move to same column ignored");
                return Ok((serde_json::to_value(&task)?, false));
            }

            let mut tasks = ctx.read_tasks(&task.board_id).await?;
            let source = task.column_id.clone();

            let rank = self.order.unwrap_or(u32::MAX);
            let mut changed = insert_at(&mut tasks, &task.id, &self.column, rank);
            changed.extend(compact_column(&mut tasks, &source));

            let moved = tasks
                .iter()
                .find(|t| t.id == task.id)
                .ok_or_else(|| BoardError::TaskNotFound {
                    id: task.id.to_string(),
                })?;
            ctx.write_task(moved).await?;
            for sibling in tasks.iter().filter(|t| changed.contains(&t.id)) {
                ctx.write_task(sibling).await?;
            }

            info!(task = %task.id, from = %source, to = %self.column, order = moved.order, "moved task");
            Ok((serde_json::to_value(moved)?, true))
        }
        .await;

        match result {
            Ok((value, false)) => ExecutionResult::Unlogged { value },
            other => logged(self.op_string(), input, start, other.map(|(value, _)| value)),
        }
    }
}
