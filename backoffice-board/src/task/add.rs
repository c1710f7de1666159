//! AddTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{logged, operation, Execute, ExecutionResult, Operation};
use crate::ordering::next_order;
use crate::types::{BoardId, ColumnId, Priority, Task};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Add a task to the end of a column
#[derive(Debug, Deserialize, Serialize)]
pub struct AddTask {
    /// The owning board
    pub board_id: BoardId,
    /// The column the task starts in
    pub column_id: ColumnId,
    /// The task title (required)
    pub title: String,
    /// Free-text description
    pub description: Option<String>,
    /// Assignee name
    pub assignee: Option<String>,
    /// Priority; medium when absent
    pub priority: Option<Priority>,
    /// Due date
    pub due_date: Option<NaiveDate>,
}

operation!(
    AddTask,
    verb = "add",
    noun = "task",
    description = "Create a new task at the end of a column"
);

impl AddTask {
    /// Create a new AddTask command with just a title
    pub fn new(
        board_id: impl Into<BoardId>,
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            column_id: column_id.into(),
            title: title.into(),
            description: None,
            assignee: None,
            priority: None,
            due_date: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let title = self.title.trim();
            if title.is_empty() {
                return Err(BoardError::missing_field("title"));
            }

            ctx.read_board(&self.board_id).await?;
            let column = ctx.read_column(&self.column_id).await?;
            if column.board_id != self.board_id {
                return Err(BoardError::CrossBoardMove {
                    board: self.board_id.to_string(),
                    column: self.column_id.to_string(),
                });
            }

            let siblings = ctx.read_column_tasks(&self.column_id).await?;
            let order = next_order(&siblings, &self.column_id);

            let mut task = Task::new(self.board_id.clone(), self.column_id.clone(), title, order)
                .with_priority(self.priority.unwrap_or_default());
            if let Some(description) = &self.description {
                task = task.with_description(description.trim());
            }
            if let Some(assignee) = &self.assignee {
                task = task.with_assignee(assignee.trim());
            }
            if let Some(due) = self.due_date {
                task = task.with_due_date(due);
            }

            ctx.write_task(&task).await?;
            debug!(task = %task.id, column = %task.column_id, order, "added task");
            Ok(serde_json::to_value(&task)?)
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

    async fn setup() -> (BoardContext, Value) {
        let ctx = BoardContext::new(MemoryStore::new());
        let created = CreateBoard::new("Test")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        (ctx, created)
    }

    #[tokio::test]
    async fn test_add_task_appends_to_column() {
        let (ctx, board) = setup().await;
        let board_id = board["id"].as_str().unwrap();
        let todo = board["columns"][0]["id"].as_str().unwrap();

        let first = AddTask::new(board_id, todo, "First")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let second = AddTask::new(board_id, todo, "Second")
            .with_assignee("Ana")
            .with_priority(Priority::High)
            .with_due_date(NaiveDate::from_ymd_opt(2026, 11, 30).unwrap())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(first["order"], 0);
        assert_eq!(second["order"], 1);
        assert_eq!(second["priority"], "high");
        assert_eq!(second["assignee"], "Ana");
        assert_eq!(second["due_date"], "2026-11-30");
    }

    #[tokio::test]
    async fn test_add_task_requires_title() {
        let (ctx, board) = setup().await;
        let result = AddTask::new(
            board["id"].as_str().unwrap(),
            board["columns"][0]["id"].as_str().unwrap(),
            "",
        )
        .execute(&ctx)
        .await
        .into_result();
        assert!(matches!(result, Err(BoardError::MissingField { .. })));
    }

    #[tokio::test]
    async fn test_add_task_column_of_other_board() {
        let (ctx, board) = setup().await;
        let other = CreateBoard::new("Other")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = AddTask::new(
            board["id"].as_str().unwrap(),
            other["columns"][0]["id"].as_str().unwrap(),
            "Misplaced",
        )
        .execute(&ctx)
        .await
        .into_result();
        assert!(matches!(result, Err(BoardError::CrossBoardMove { .. })));
    }
}
