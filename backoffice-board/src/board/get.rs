//! GetBoard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{operation, unlogged, Execute, ExecutionResult};
use crate::types::BoardId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Get a board with its columns and per-column task counts
#[derive(Debug, Deserialize, Serialize)]
pub struct GetBoard {
    /// The board ID
    pub id: BoardId,
}

operation!(
    GetBoard,
    verb = "get",
    noun = "board",
    description = "Retrieve a board with its columns and task counts"
);

impl GetBoard {
    /// Create a new GetBoard command
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result: Result<Value> = async {
            let board = ctx.read_board(&self.id).await?;
            let columns = ctx.read_columns(&self.id).await?;
            let tasks = ctx.read_tasks(&self.id).await?;

            let mut counts: BTreeMap<String, usize> = columns
                .iter()
                .map(|c| (c.id.to_string(), 0))
                .collect();
            for task in &tasks {
                *counts.entry(task.column_id.to_string()).or_default() += 1;
            }

            let mut result = serde_json::to_value(&board)?;
            result["columns"] = serde_json::to_value(&columns)?;
            result["task_counts"] = serde_json::to_value(&counts)?;
            Ok(result)
        }
        .await;

        unlogged(result)
    }
}
