//! Activity log records

use super::ids::{BoardId, LogEntryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One mutating board command, successful or not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogEntryId,

    pub timestamp: DateTime<Utc>,

    /// Canonical op string, e.g. "move task"
    pub op: String,

    /// Board the command touched; absent when it failed before resolving one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<BoardId>,

    /// Id of the board, column or task the command acted on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// The command as it was issued
    pub input: Value,

    /// The stored record, or `{"error": ...}`
    pub output: Value,

    /// Signed-in user who issued the command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    pub duration_ms: u64,
}

impl LogEntry {
    /// Record a command; the board and target are read from `input` and `output`
    pub fn new(
        op: impl Into<String>,
        input: Value,
        output: Value,
        actor: Option<String>,
        duration_ms: u64,
    ) -> Self {
        let op = op.into();
        let lookup = |key: &str| {
            output
                .get(key)
                .or_else(|| input.get(key))
                .and_then(Value::as_str)
                .map(str::to_owned)
        };
        let target = lookup("id");
        let board_id = lookup("board_id")
            .or_else(|| target.clone().filter(|_| op.ends_with(" board")))
            .map(BoardId::from_string);

        Self {
            id: LogEntryId::new(),
            timestamp: Utc::now(),
            op,
            board_id,
            target,
            input,
            output,
            actor,
            duration_ms,
        }
    }

    pub fn failure(op: impl Into<String>, input: Value, error: &str, duration_ms: u64) -> Self {
        Self::new(
            op,
            input,
            serde_json::json!({ "error": error }),
            None,
            duration_ms,
        )
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Whether the command failed
    pub fn is_failure(&self) -> bool {
        self.output.get("error").is_some()
    }

    /// Whether this entry belongs to `board`
    pub fn concerns(&self, board: &BoardId) -> bool {
        self.board_id.as_ref() == Some(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_keeps_board_from_input() {
        let entry = LogEntry::failure(
            "add task",
            json!({"board_id": "b1", "column": "c1", "title": "Send quote"}),
            "column not found",
            3,
        );
        assert!(entry.is_failure());
        assert_eq!(entry.output["error"], "column not found");
        assert!(entry.concerns(&BoardId::from_string("b1")));
        assert!(entry.target.is_none());
        assert!(entry.actor.is_none());
    }

    #[test]
    fn test_task_entry_takes_board_and_target_from_output() {
        let entry = LogEntry::new(
            "move task",
            json!({"id": "t1", "column": "c2"}),
            json!({"id": "t1", "board_id": "b1", "column_id": "c2", "order": 0}),
            None,
            1,
        );
        assert_eq!(entry.board_id, Some(BoardId::from_string("b1")));
        assert_eq!(entry.target.as_deref(), Some("t1"));
    }

    #[test]
    fn test_board_entry_is_its_own_board() {
        let entry = LogEntry::new("create board", json!({"name": "Ops"}), json!({"id": "b9"}), None, 0);
        assert_eq!(entry.board_id, Some(BoardId::from_string("b9")));

        let entry = LogEntry::new("add column", json!({"name": "Review"}), json!({"id": "c3"}), None, 0);
        assert!(entry.board_id.is_none());
    }

    #[test]
    fn test_optional_fields_skipped_when_absent() {
        let entry = LogEntry::new("add task", Value::Null, Value::Null, None, 0);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("actor").is_none());
        assert!(json.get("board_id").is_none());

        let json = serde_json::to_value(entry.with_actor("ana")).unwrap();
        assert_eq!(json["actor"], "ana");
    }
}
