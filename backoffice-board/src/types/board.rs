//! Board-level types: Board, Column

use super::ids::{BoardId, ColumnId};
use crate::auto_color::auto_color;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default board background (6-char hex without `#`)
pub const DEFAULT_BACKGROUND: &str = "f4f5f7";

/// The top-level kanban container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_background")]
    pub background_color: String,
    pub created_at: DateTime<Utc>,
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

impl Board {
    /// Create a new board with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BoardId::new(),
            name: name.into(),
            description: None,
            background_color: default_background(),
            created_at: Utc::now(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the background color
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Column names a freshly created board starts with
    pub fn default_column_names() -> [&'static str; 3] {
        ["To Do", "Doing", "Done"]
    }
}

/// A column is a workflow stage on exactly one board.
///
/// `position` is fixed at creation; columns are not reorderable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub board_id: BoardId,
    pub name: String,
    pub color: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

impl Column {
    /// Create a column; the color is derived from the name
    pub fn new(board_id: BoardId, name: impl Into<String>, position: u32) -> Self {
        let name = name.into();
        Self {
            id: ColumnId::new(),
            board_id,
            color: auto_color(&name.to_lowercase()).to_string(),
            name,
            position,
            created_at: Utc::now(),
        }
    }

    /// Override the derived color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}
