//! DeleteTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{logged, operation, Execute, ExecutionResult, Operation};
use crate::ordering::compact_column;
use crate::types::TaskId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Delete a task and close the gap it leaves in its column
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteTask {
    /// The task ID to delete
    pub id: TaskId,
}

operation!(
    DeleteTask,
    verb = "delete",
    noun = "task",
    description = "Delete a task"
);

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let task = ctx.read_task(&self.id).await?;
            ctx.delete_task_record(&task.id).await?;

            let mut siblings = ctx.read_column_tasks(&task.column_id).await?;
            let changed = compact_column(&mut siblings, &task.column_id);
            for sibling in siblings.iter().filter(|t| changed.contains(&t.id)) {
                ctx.write_task(sibling).await?;
            }
            debug!(task = %task.id, renumbered = changed.len(), "deleted task");

            Ok(serde_json::json!({
                "deleted": true,
                "id": task.id,
                "board_id": task.board_id,
                "column_id": task.column_id,
            }))
        }
        .await;

        logged(self.op_string(), input, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::store::MemoryStore;
    use crate::task::AddTask;
    use crate::types::ColumnId;

    #[tokio::test]
    async fn test_delete_task_compacts_column() {
        let ctx = BoardContext::new(MemoryStore::new());
        let board = CreateBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        let board_id = board["id"].as_str().unwrap();
        let todo = board["columns"][0]["id"].as_str().unwrap();

        let mut ids = Vec::new();
        for title in ["a", "b", "c"] {
            let t = AddTask::new(board_id, todo, title).execute(&ctx).await.into_result().unwrap();
            ids.push(t["id"].as_str().unwrap().to_string());
        }

        DeleteTask::new(ids[0].as_str())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let mut remaining = ctx.read_column_tasks(&ColumnId::from_string(todo)).await.unwrap();
        remaining.sort_by_key(|t| t.order);
        let ranks: Vec<_> = remaining.iter().map(|t| (t.title.as_str(), t.order)).collect();
        assert_eq!(ranks, [("b", 0), ("c", 1)]);
    }

    #[tokio::test]
    async fn test_delete_missing_task() {
        let ctx = BoardContext::new(MemoryStore::new());
        let result = DeleteTask::new("gone").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::TaskNotFound { .. })));
    }
}
