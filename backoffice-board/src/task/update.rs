//! UpdateTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{logged, operation, Execute, ExecutionResult, Operation};
use crate::types::{Priority, TaskId};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Edit the fields of a task; column and order are changed by MoveTask only
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateTask {
    /// The task ID
    pub id: TaskId,
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New assignee; empty clears it
    pub assignee: Option<String>,
    /// New priority
    pub priority: Option<Priority>,
    /// New due date (None = don't change, Some(None) = clear)
    pub due_date: Option<Option<NaiveDate>>,
}

operation!(
    UpdateTask,
    verb = "update",
    noun = "task",
    description = "Update task title, description, assignee, priority or due date"
);

impl UpdateTask {
    /// Create a new UpdateTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            assignee: None,
            priority: None,
            due_date: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set or clear the due date
    pub fn with_due_date(mut self, due: Option<NaiveDate>) -> Self {
        self.due_date = Some(due);
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let mut task = ctx.read_task(&self.id).await?;

            if let Some(title) = &self.title {
                let title = title.trim();
                if title.is_empty() {
                    return Err(BoardError::missing_field("title"));
                }
                task.title = title.to_string();
            }
            if let Some(description) = &self.description {
                task.description = description.trim().to_string();
            }
            if let Some(assignee) = &self.assignee {
                task.assignee = assignee.trim().to_string();
            }
            if let Some(priority) = self.priority {
                task.priority = priority;
            }
            if let Some(due) = self.due_date {
                task.due_date = due;
            }

            ctx.write_task(&task).await?;
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
    use crate::task::AddTask;

    async fn setup() -> (BoardContext, String) {
        let ctx = BoardContext::new(MemoryStore::new());
        let board = CreateBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        let task = AddTask::new(
            board["id"].as_str().unwrap(),
            board["columns"][0]["id"].as_str().unwrap(),
            "Draft",
        )
        .with_due_date(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
        (ctx, task["id"].as_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_update_task_fields() {
        let (ctx, id) = setup().await;
        let result = UpdateTask::new(id.as_str())
            .with_title("Final")
            .with_assignee("Bruno")
            .with_priority(Priority::Low)
            .with_due_date(None)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["title"], "Final");
        assert_eq!(result["assignee"], "Bruno");
        assert_eq!(result["priority"], "low");
        assert!(result.get("due_date").is_none());
        assert_eq!(result["order"], 0);
    }

    #[tokio::test]
    async fn test_update_task_rejects_blank_title() {
        let (ctx, id) = setup().await;
        let result = UpdateTask::new(id.as_str())
            .with_title("  ")
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(BoardError::MissingField { .. })));
    }
}
