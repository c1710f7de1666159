//! Table rendering for command results

use backoffice_board::{Board, Column, LogEntry, Task};
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Deserialize;
use serde_json::Value;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header);
    table
}

/// Deserialize `value[key]` as a list, empty when absent
fn list<T: for<'de> Deserialize<'de>>(value: &Value, key: &str) -> serde_json::Result<Vec<T>> {
    match value.get(key) {
        Some(items) => serde_json::from_value(items.clone()),
        None => Ok(Vec::new()),
    }
}

pub fn boards_table(result: &Value) -> serde_json::Result<Table> {
    let mut t = table(vec!["ID", "Name", "Description", "Created"]);
    for board in list::<Board>(result, "boards")? {
        t.add_row(vec![
            board.id.to_string(),
            board.name,
            board.description.unwrap_or_default(),
            board.created_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    Ok(t)
}

pub fn columns_table(result: &Value) -> serde_json::Result<Table> {
    let mut t = table(vec!["#", "ID", "Name", "Color"]);
    for column in list::<Column>(result, "columns")? {
        t.add_row(vec![
            column.position.to_string(),
            column.id.to_string(),
            column.name,
            column.color,
        ]);
    }
    Ok(t)
}

/// One row per task, grouped by column in board order
pub fn tasks_table(result: &Value) -> serde_json::Result<Table> {
    let mut t = table(vec!["Column", "#", "Title", "Assignee", "Priority", "Due", "ID"]);
    let Some(columns) = result.get("columns").and_then(Value::as_array) else {
        return Ok(t);
    };
    for column in columns {
        let name = column["name"].as_str().unwrap_or_default();
        for task in list::<Task>(column, "tasks")? {
            t.add_row(vec![
                name.to_string(),
                task.order.to_string(),
                task.title,
                task.assignee,
                task.priority.to_string(),
                task.due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                task.id.to_string(),
            ]);
        }
    }
    Ok(t)
}

pub fn activity_table(entries: &[LogEntry]) -> Table {
    let mut t = table(vec!["When", "Operation", "Target", "Actor", "ms", "Outcome"]);
    for entry in entries {
        let outcome = match entry.output.get("error").and_then(Value::as_str) {
            Some(error) => format!("failed: {}", error),
            None => "ok".to_string(),
        };
        t.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            entry.op.clone(),
            entry.target.clone().unwrap_or_default(),
            entry.actor.clone().unwrap_or_default(),
            entry.duration_ms.to_string(),
            outcome,
        ]);
    }
    t
}
