//! CreateBoard command

use crate::auto_color::normalize_color;
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{logged, operation, Execute, ExecutionResult, Operation};
use crate::types::{Board, Column};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Create a board together with its starting columns
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateBoard {
    /// The board name
    pub name: String,
    /// Optional board description
    pub description: Option<String>,
    /// Background color (`#rrggbb` or `rrggbb`)
    pub background_color: Option<String>,
    /// Column names to create; the defaults when empty
    #[serde(default)]
    pub columns: Vec<String>,
}

operation!(
    CreateBoard,
    verb = "create",
    noun = "board",
    description = "Create a new board with its columns"
);

impl CreateBoard {
    /// Create a new CreateBoard command
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            background_color: None,
            columns: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the background color
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Replace the default columns
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    fn build(&self) -> Result<Board> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(BoardError::missing_field("name"));
        }

        let mut board = Board::new(name);
        if let Some(desc) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            board = board.with_description(desc.trim());
        }
        if let Some(color) = &self.background_color {
            let color = normalize_color(color).ok_or_else(|| {
                BoardError::invalid_value("background_color", format!("'{}' is not a hex color", color))
            })?;
            board = board.with_background(color);
        }
        Ok(board)
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for CreateBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let board = self.build()?;
            ctx.write_board(&board).await?;

            let names: Vec<String> = if self.columns.is_empty() {
                Board::default_column_names().iter().map(|s| s.to_string()).collect()
            } else {
                self.columns.clone()
            };

            let mut columns = Vec::with_capacity(names.len());
            for (position, name) in names.iter().enumerate() {
                let column = Column::new(board.id.clone(), name.trim(), position as u32);
                ctx.write_column(&column).await?;
                columns.push(column);
            }

            info!(board = %board.id, columns = columns.len(), "created board");

            let mut result = serde_json::to_value(&board)?;
            result["columns"] = serde_json::to_value(&columns)?;
            Ok(result)
        }
        .await;

        logged(self.op_string(), input, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::BoardId;

    #[tokio::test]
    async fn test_create_board_with_default_columns() {
        let ctx = BoardContext::new(MemoryStore::new());

        let result = CreateBoard::new("Agency")
            .with_description("Client projects")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "Agency");
        let board_id = BoardId::from_string(result["id"].as_str().unwrap());
        let names: Vec<_> = ctx
            .read_columns(&board_id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["To Do", "Doing", "Done"]);
    }

    #[tokio::test]
    async fn test_create_board_custom_columns_and_color() {
        let ctx = BoardContext::new(MemoryStore::new());

        let result = CreateBoard::new("Sales")
            .with_background("#00AA88")
            .with_columns(["Lead", "Proposal", "Won"])
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["background_color"], "00aa88");
        assert_eq!(result["columns"].as_array().unwrap().len(), 3);
        assert_eq!(result["columns"][2]["position"], 2);
    }

    #[tokio::test]
    async fn test_create_board_requires_name() {
        let ctx = BoardContext::new(MemoryStore::new());
        let result = CreateBoard::new("   ").execute(&ctx).await;
        assert!(result.should_log());
        assert!(matches!(
            result.into_result(),
            Err(BoardError::MissingField { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_board_rejects_bad_color() {
        let ctx = BoardContext::new(MemoryStore::new());
        let result = CreateBoard::new("X")
            .with_background("blue")
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(BoardError::InvalidValue { .. })));
    }
}
