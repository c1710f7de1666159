//! ListTasks command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::filter::TaskFilter;
use crate::operation::{operation, unlogged, Execute, ExecutionResult};
use crate::ordering::compute_column_groups;
use crate::types::BoardId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List the tasks of a board grouped by column
#[derive(Debug, Deserialize, Serialize)]
pub struct ListTasks {
    /// The board whose tasks to list
    pub board_id: BoardId,
    /// Filters applied before grouping
    #[serde(default)]
    pub filter: TaskFilter,
}

operation!(
    ListTasks,
    verb = "list",
    noun = "tasks",
    description = "List board tasks grouped by column"
);

impl ListTasks {
    /// Create a new ListTasks command with no filter
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
            filter: TaskFilter::default(),
        }
    }

    /// Set the filter
    pub fn with_filter(mut self, filter: TaskFilter) -> Self {
        self.filter = filter;
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListTasks {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result: Result<Value> = async {
            ctx.read_board(&self.board_id).await?;
            let columns = ctx.read_columns(&self.board_id).await?;
            let tasks = ctx.read_tasks(&self.board_id).await?;
            let mut groups = compute_column_groups(&tasks, &self.filter);

            let mut count = 0;
            let mut out = Vec::with_capacity(columns.len());
            for column in columns {
                let tasks = groups.remove(&column.id).unwrap_or_default();
                count += tasks.len();
                let mut entry = serde_json::to_value(&column)?;
                entry["tasks"] = serde_json::to_value(&tasks)?;
                out.push(entry);
            }

            Ok(serde_json::json!({
                "columns": out,
                "count": count,
            }))
        }
        .await;

        unlogged(result)
    }
}
