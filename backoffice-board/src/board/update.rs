//! UpdateBoard command

use crate::auto_color::normalize_color;
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{logged, operation, Execute, ExecutionResult, Operation};
use crate::types::BoardId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Update board metadata
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateBoard {
    /// The board ID
    pub id: BoardId,
    /// New name
    pub name: Option<String>,
    /// New description (None = don't change, Some(None) = clear)
    pub description: Option<Option<String>>,
    /// New background color
    pub background_color: Option<String>,
}

operation!(
    UpdateBoard,
    verb = "update",
    noun = "board",
    description = "Update board name, description or background"
);

impl UpdateBoard {
    /// Create a new UpdateBoard command
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            background_color: None,
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set or clear the description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Set the background color
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let mut board = ctx.read_board(&self.id).await?;

            if let Some(name) = &self.name {
                let name = name.trim();
                if name.is_empty() {
                    return Err(BoardError::missing_field("name"));
                }
                board.name = name.to_string();
            }
            if let Some(description) = &self.description {
                board.description = description.clone().filter(|d| !d.trim().is_empty());
            }
            if let Some(color) = &self.background_color {
                board.background_color = normalize_color(color).ok_or_else(|| {
                    BoardError::invalid_value("background_color", format!("'{}' is not a hex color", color))
                })?;
            }

            ctx.write_board(&board).await?;
            Ok(serde_json::to_value(&board)?)
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

    #[tokio::test]
    async fn test_update_board() {
        let ctx = BoardContext::new(MemoryStore::new());
        let created = CreateBoard::new("Old")
            .with_description("desc")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let id = created["id"].as_str().unwrap();

        let result = UpdateBoard::new(id)
            .with_name("New")
            .with_description(None)
            .with_background("#112233")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "New");
        assert!(result.get("description").is_none());
        assert_eq!(result["background_color"], "112233");
    }

    #[tokio::test]
    async fn test_update_board_rejects_empty_name() {
        let ctx = BoardContext::new(MemoryStore::new());
        let created = CreateBoard::new("Keep").execute(&ctx).await.into_result().unwrap();
        let id = created["id"].as_str().unwrap();

        let result = UpdateBoard::new(id).with_name(" ").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::MissingField { .. })));
        assert_eq!(ctx.read_board(&BoardId::from_string(id)).await.unwrap().name, "Keep");
    }
}
