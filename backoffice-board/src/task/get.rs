//! GetTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{operation, unlogged, Execute, ExecutionResult};
use crate::types::TaskId;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a task by ID with computed fields
#[derive(Debug, Deserialize, Serialize)]
pub struct GetTask {
    /// The task ID to retrieve
    pub id: TaskId,
}

operation!(
    GetTask,
    verb = "get",
    noun = "task",
    description = "Retrieve a task by ID"
);

impl GetTask {
    /// Create a new GetTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result: Result<Value> = async {
            let task = ctx.read_task(&self.id).await?;
            let column = ctx.read_column(&task.column_id).await?;

            let mut result = serde_json::to_value(&task)?;
            result["column_name"] = serde_json::json!(column.name);
            result["overdue"] = serde_json::json!(task.is_overdue(Utc::now().date_naive()));
            Ok(result)
        }
        .await;

        unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::store::MemoryStore;
    use crate::task::AddTask;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_get_task_with_column_name() {
        let ctx = BoardContext::new(MemoryStore::new());
        let board = CreateBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        let added = AddTask::new(
            board["id"].as_str().unwrap(),
            board["columns"][0]["id"].as_str().unwrap(),
            "Pay rent",
        )
        .with_due_date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

        let result = GetTask::new(added["id"].as_str().unwrap())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["title"], "Pay rent");
        assert_eq!(result["column_name"], "To Do");
        assert_eq!(result["overdue"], true);
    }

    #[tokio::test]
    async fn test_get_missing_task() {
        let ctx = BoardContext::new(MemoryStore::new());
        let result = GetTask::new("nope").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::TaskNotFound { .. })));
    }
}
