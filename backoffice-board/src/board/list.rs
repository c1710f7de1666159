//! ListBoards command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{operation, unlogged, Execute, ExecutionResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List every board, oldest first
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListBoards;

operation!(
    ListBoards,
    verb = "list",
    noun = "boards",
    description = "List all boards"
);

#[async_trait]
impl Execute<BoardContext, BoardError> for ListBoards {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result: Result<Value> = async {
            let boards = ctx.read_all_boards().await?;
            Ok(serde_json::json!({
                "boards": boards,
                "count": boards.len(),
            }))
        }
        .await;

        unlogged(result)
    }
}
