//! ListColumns command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{operation, unlogged, Execute, ExecutionResult};
use crate::types::BoardId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List the columns of a board in position order
#[derive(Debug, Deserialize, Serialize)]
pub struct ListColumns {
    pub board_id: BoardId,
}

operation!(
    ListColumns,
    verb = "list",
    noun = "columns",
    description = "List the columns of a board"
);

impl ListColumns {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListColumns {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result: Result<Value> = async {
            ctx.read_board(&self.board_id).await?;
            let columns = ctx.read_columns(&self.board_id).await?;
            Ok(serde_json::json!({
                "columns": columns,
                "count": columns.len(),
            }))
        }
        .await;

        unlogged(result)
    }
}
