//! Task types: Task, Priority

use super::ids::{BoardId, ColumnId, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

/// A card on the board.
///
/// `order` is the zero-based rank inside `column_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub order: u32,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task at the given rank of a column
    pub fn new(
        board_id: BoardId,
        column_id: ColumnId,
        title: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id: TaskId::new(),
            board_id,
            column_id,
            title: title.into(),
            description: String::new(),
            assignee: String::new(),
            priority: Priority::default(),
            due_date: None,
            order,
            created_at: Utc::now(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Whether the due date is strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date.map(|d| d < today).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_serde() {
        assert_eq!(serde_json::to_value(Priority::Medium).unwrap(), "medium");
    }

    #[test]
    fn test_task_round_trips_without_optional_fields() {
        let json = r#"{
            "id": "t1", "board_id": "b1", "column_id": "c1",
            "title": "Call supplier", "created_at": "2026-03-01T10:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.order, 0);
        assert!(task.due_date.is_none());
        assert!(task.assignee.is_empty());
    }

    #[test]
    fn test_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
        let task = Task::new(BoardId::new(), ColumnId::new(), "Invoice", 0)
            .with_due_date(NaiveDate::from_ymd_opt(2026, 5, 9).unwrap());
        assert!(task.is_overdue(today));
        assert!(!task.clone().with_due_date(today).is_overdue(today));
    }
}
