//! DeleteBoard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{logged, operation, Execute, ExecutionResult, Operation};
use crate::types::BoardId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Delete a board and everything on it.
///
/// The store has no cascading constraints, so the command removes the tasks
/// and columns itself before the board record.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteBoard {
    /// The board ID to delete
    pub id: BoardId,
}

operation!(
    DeleteBoard,
    verb = "delete",
    noun = "board",
    description = "Delete a board with its columns and tasks"
);

impl DeleteBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            ctx.read_board(&self.id).await?;

            let tasks = ctx.read_tasks(&self.id).await?;
            for task in &tasks {
                ctx.delete_task_record(&task.id).await?;
            }
            let columns = ctx.read_columns(&self.id).await?;
            for column in &columns {
                ctx.delete_column_record(&column.id).await?;
            }
            ctx.delete_board_record(&self.id).await?;

            info!(board = %self.id, tasks = tasks.len(), columns = columns.len(), "deleted board");

            Ok(serde_json::json!({
                "deleted": true,
                "id": self.id,
                "tasks_deleted": tasks.len(),
                "columns_deleted": columns.len(),
            }))
        }
        .await;

        logged(self.op_string(), input, start, result)
    }
}
