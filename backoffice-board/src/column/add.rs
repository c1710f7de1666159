//! AddColumn command

use crate::auto_color::normalize_color;
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{logged, operation, Execute, ExecutionResult, Operation};
use crate::types::{BoardId, Column};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Append a column to a board
#[derive(Debug, Deserialize, Serialize)]
pub struct AddColumn {
    /// The owning board
    pub board_id: BoardId,
    /// The column display name
    pub name: String,
    /// Optional color; derived from the name when absent
    pub color: Option<String>,
}

operation!(
    AddColumn,
    verb = "add",
    noun = "column",
    description = "Add a new column to the end of a board"
);

impl AddColumn {
    /// Create a new AddColumn command
    pub fn new(board_id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            name: name.into(),
            color: None,
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let name = self.name.trim();
            if name.is_empty() {
                return Err(BoardError::missing_field("name"));
            }
            ctx.read_board(&self.board_id).await?;

            // Columns keep creation order: the new one goes after the last
            let position = ctx
                .read_columns(&self.board_id)
                .await?
                .iter()
                .map(|c| c.position + 1)
                .max()
                .unwrap_or(0);

            let mut column = Column::new(self.board_id.clone(), name, position);
            if let Some(color) = &self.color {
                let color = normalize_color(color).ok_or_else(|| {
                    BoardError::invalid_value("color", format!("'{}' is not a hex color", color))
                })?;
                column = column.with_color(color);
            }

            ctx.write_column(&column).await?;
            Ok(serde_json::to_value(&column)?)
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

    async fn setup() -> (BoardContext, String) {
        let ctx = BoardContext::new(MemoryStore::new());
        let created = CreateBoard::new("Test")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let id = created["id"].as_str().unwrap().to_string();
        (ctx, id)
    }

    #[tokio::test]
    async fn test_add_column_appends() {
        let (ctx, board) = setup().await;

        let result = AddColumn::new(board.as_str(), "Blocked")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "Blocked");
        assert_eq!(result["position"], 3);
        assert_eq!(result["board_id"], board);
    }

    #[tokio::test]
    async fn test_add_column_with_color() {
        let (ctx, board) = setup().await;

        let result = AddColumn::new(board.as_str(), "Review")
            .with_color("#ABCDEF")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["color"], "abcdef");
    }

    #[tokio::test]
    async fn test_add_column_unknown_board() {
        let ctx = BoardContext::new(MemoryStore::new());
        let result = AddColumn::new("ghost", "Nope").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::BoardNotFound { .. })));
    }
}
