//! DeleteColumn command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{logged, operation, Execute, ExecutionResult, Operation};
use crate::types::ColumnId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Delete a column (fails if it has tasks)
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
}

operation!(
    DeleteColumn,
    verb = "delete",
    noun = "column",
    description = "Delete an empty column"
);

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let column = ctx.read_column(&self.id).await?;

            let count = ctx.read_column_tasks(&self.id).await?.len();
            if count > 0 {
                return Err(BoardError::ColumnNotEmpty {
                    id: self.id.to_string(),
                    count,
                });
            }

            ctx.delete_column_record(&self.id).await?;
            Ok(serde_json::json!({
                "deleted": true,
                "id": self.id,
                "board_id": column.board_id,
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

    #[tokio::test]
    async fn test_delete_empty_column() {
        let ctx = BoardContext::new(MemoryStore::new());
        let created = CreateBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        let done = created["columns"][2]["id"].as_str().unwrap();

        let result = DeleteColumn::new(done).execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["deleted"], true);
        assert!(ctx.read_column(&ColumnId::from_string(done)).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_column_with_tasks_refused() {
        let ctx = BoardContext::new(MemoryStore::new());
        let created = CreateBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        let board = created["id"].as_str().unwrap();
        let todo = created["columns"][0]["id"].as_str().unwrap();
        AddTask::new(board, todo, "Keep me")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = DeleteColumn::new(todo).execute(&ctx).await.into_result();
        assert!(matches!(
            result,
            Err(BoardError::ColumnNotEmpty { count: 1, .. })
        ));
    }
}
