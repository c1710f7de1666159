//! UpdateColumn command

use crate::auto_color::normalize_color;
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{logged, operation, Execute, ExecutionResult, Operation};
use crate::types::ColumnId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rename or recolor a column. Position is fixed.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateColumn {
    pub id: ColumnId,
    pub name: Option<String>,
    pub color: Option<String>,
}

operation!(
    UpdateColumn,
    verb = "update",
    noun = "column",
    description = "Rename or recolor a column"
);

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            color: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let mut column = ctx.read_column(&self.id).await?;

            if let Some(name) = &self.name {
                let name = name.trim();
                if name.is_empty() {
                    return Err(BoardError::missing_field("name"));
                }
                column.name = name.to_string();
            }
            if let Some(color) = &self.color {
                column.color = normalize_color(color).ok_or_else(|| {
                    BoardError::invalid_value("color", format!("'{}' is not a hex color", color))
                })?;
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

    #[tokio::test]
    async fn test_update_column_keeps_position() {
        let ctx = BoardContext::new(MemoryStore::new());
        let created = CreateBoard::new("Test").execute(&ctx).await.into_result().unwrap();
        let doing = created["columns"][1]["id"].as_str().unwrap();

        let result = UpdateColumn::new(doing)
            .with_name("In Progress")
            .with_color("00ff00")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "In Progress");
        assert_eq!(result["color"], "00ff00");
        assert_eq!(result["position"], 1);
    }

    #[tokio::test]
    async fn test_update_missing_column() {
        let ctx = BoardContext::new(MemoryStore::new());
        let result = UpdateColumn::new("nope").with_name("x").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::ColumnNotFound { .. })));
    }
}
