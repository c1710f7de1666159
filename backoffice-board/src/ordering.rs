//! Column ordering primitives.
//!
//! Everything here is pure and works on a plain slice of tasks, so the same
//! functions drive both the optimistic local view and the authoritative
//! store-side commands.

use crate::filter::TaskFilter;
use crate::types::{ColumnId, Task, TaskId};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Tasks partitioned by column, each group sorted by rank
pub type ColumnGroups = BTreeMap<ColumnId, Vec<Task>>;

/// Rank comparison: `order`, then creation time, then id
pub fn rank_cmp(a: &Task, b: &Task) -> Ordering {
    a.order
        .cmp(&b.order)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Number of tasks currently in `column`.
///
/// A task moved or added to a column is appended, so this is its new order.
pub fn next_order(tasks: &[Task], column: &ColumnId) -> u32 {
    tasks.iter().filter(|t| &t.column_id == column).count() as u32
}

/// Relocate `task_id` to `column` at `order`.
///
/// Returns `false` when the task is missing or already sits exactly there, so
/// applying the same move twice is harmless.
pub fn apply_move(tasks: &mut [Task], task_id: &TaskId, column: &ColumnId, order: u32) -> bool {
    match tasks.iter_mut().find(|t| &t.id == task_id) {
        Some(task) if task.column_id != *column || task.order != order => {
            task.column_id = column.clone();
            task.order = order;
            true
        }
        _ => false,
    }
}

/// Renumber one column to `0..n` keeping its current relative order.
///
/// Returns the ids whose `order` changed; untouched tasks are not reported so
/// callers only persist what moved.
pub fn compact_column(tasks: &mut [Task], column: &ColumnId) -> Vec<TaskId> {
    let mut members: Vec<&mut Task> = tasks.iter_mut().filter(|t| &t.column_id == column).collect();
    members.sort_by(|a, b| rank_cmp(a, b));

    let mut changed = Vec::new();
    for (rank, task) in members.into_iter().enumerate() {
        let rank = rank as u32;
        if task.order != rank {
            task.order = rank;
            changed.push(task.id.clone());
        }
    }
    changed
}

/// Insert `task_id` into `column` at `rank` and renumber that column.
///
/// `rank` is clamped to the column's size, so the column stays contiguous
/// whatever the caller asked for. Returns the ids of the other tasks whose
/// `order` changed.
pub fn insert_at(
    tasks: &mut [Task],
    task_id: &TaskId,
    column: &ColumnId,
    rank: u32,
) -> Vec<TaskId> {
    let siblings = tasks
        .iter()
        .filter(|t| &t.column_id == column && &t.id != task_id)
        .count() as u32;
    let rank = rank.min(siblings);

    let mut changed = Vec::new();
    for task in tasks.iter_mut() {
        if &task.id == task_id {
            task.column_id = column.clone();
            task.order = rank;
        } else if &task.column_id == column && task.order >= rank {
            task.order += 1;
            changed.push(task.id.clone());
        }
    }
    for id in compact_column(tasks, column) {
        if &id != task_id && !changed.contains(&id) {
            changed.push(id);
        }
    }
    changed
}

/// Filter `tasks` and partition them by column, each group sorted by rank.
///
/// Every task that passes the filter lands in exactly one group.
pub fn compute_column_groups(tasks: &[Task], filter: &TaskFilter) -> ColumnGroups {
    let mut groups = ColumnGroups::new();
    for task in tasks.iter().filter(|t| filter.matches(t)) {
        groups
            .entry(task.column_id.clone())
            .or_default()
            .push(task.clone());
    }
    for group in groups.values_mut() {
        group.sort_by(rank_cmp);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoardId, Priority};
    use chrono::{Duration, Utc};

    fn column_of(tasks: &[Task], column: &ColumnId) -> Vec<(String, u32)> {
        let mut v: Vec<_> = tasks.iter().filter(|t| &t.column_id == column).collect();
        v.sort_by(|a, b| rank_cmp(a, b));
        v.into_iter().map(|t| (t.title.clone(), t.order)).collect()
    }

    fn board_with(todo: &ColumnId, titles: &[&str]) -> Vec<Task> {
        let board = BoardId::new();
        let base = Utc::now();
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let mut t = Task::new(board.clone(), todo.clone(), *title, i as u32);
                t.created_at = base + Duration::seconds(i as i64);
                t
            })
            .collect()
    }

    #[test]
    fn test_next_order_counts_column() {
        let todo = ColumnId::new();
        let done = ColumnId::new();
        let tasks = board_with(&todo, &["a", "b", "c"]);
        assert_eq!(next_order(&tasks, &todo), 3);
        assert_eq!(next_order(&tasks, &done), 0);
    }

    #[test]
    fn test_apply_move_is_idempotent() {
        let todo = ColumnId::new();
        let done = ColumnId::new();
        let mut tasks = board_with(&todo, &["a", "b"]);
        let id = tasks[0].id.clone();

        assert!(apply_move(&mut tasks, &id, &done, 0));
        let once = tasks.clone();
        assert!(!apply_move(&mut tasks, &id, &done, 0));
        assert_eq!(tasks, once);
    }

    #[test]
    fn test_apply_move_unknown_task() {
        let todo = ColumnId::new();
        let mut tasks = board_with(&todo, &["a"]);
        assert!(!apply_move(&mut tasks, &TaskId::new(), &todo, 4));
    }

    #[test]
    fn test_compact_column_renumbers_only_gaps() {
        let todo = ColumnId::new();
        let done = ColumnId::new();
        let mut tasks = board_with(&todo, &["a", "b", "c"]);
        let b = tasks[1].id.clone();
        apply_move(&mut tasks, &b, &done, 0);

        let changed = compact_column(&mut tasks, &todo);
        assert_eq!(changed, vec![tasks[2].id.clone()]);
        assert_eq!(
            column_of(&tasks, &todo),
            vec![("a".to_string(), 0), ("c".to_string(), 1)]
        );
    }

    #[test]
    fn test_compact_breaks_ties_by_creation() {
        let todo = ColumnId::new();
        let mut tasks = board_with(&todo, &["first", "second"]);
        tasks[0].order = 5;
        tasks[1].order = 5;
        compact_column(&mut tasks, &todo);
        assert_eq!(
            column_of(&tasks, &todo),
            vec![("first".to_string(), 0), ("second".to_string(), 1)]
        );
    }

    #[test]
    fn test_insert_at_shifts_and_clamps() {
        let todo = ColumnId::new();
        let done = ColumnId::new();
        let mut tasks = board_with(&todo, &["a", "b", "c"]);
        let (a, c) = (tasks[0].id.clone(), tasks[2].id.clone());
        tasks[2].column_id = done.clone();
        tasks[2].order = 0;

        let changed = insert_at(&mut tasks, &a, &done, 0);
        assert_eq!(changed, vec![c.clone()]);
        assert_eq!(
            column_of(&tasks, &done),
            vec![("a".to_string(), 0), ("c".to_string(), 1)]
        );

        let b = tasks[1].id.clone();
        insert_at(&mut tasks, &b, &done, 7);
        assert_eq!(
            column_of(&tasks, &done),
            vec![("a".to_string(), 0), ("c".to_string(), 1), ("b".to_string(), 2)]
        );
    }

    #[test]
    fn test_insert_at_repairs_duplicate_orders() {
        let todo = ColumnId::new();
        let done = ColumnId::new();
        let mut tasks = board_with(&todo, &["other", "late", "moved"]);
        for t in tasks.iter_mut().take(2) {
            t.column_id = done.clone();
            t.order = 0;
        }
        let moved = tasks[2].id.clone();

        insert_at(&mut tasks, &moved, &done, 2);
        assert_eq!(
            column_of(&tasks, &done),
            vec![("other".to_string(), 0), ("late".to_string(), 1), ("moved".to_string(), 2)]
        );
    }

    #[test]
    fn test_groups_sorted_by_order() {
        let todo = ColumnId::new();
        let mut tasks = board_with(&todo, &["a", "b", "c"]);
        tasks[0].order = 2;
        tasks[2].order = 0;

        let groups = compute_column_groups(&tasks, &TaskFilter::new());
        let titles: Vec<_> = groups[&todo].iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["c", "b", "a"]);
    }

    #[test]
    fn test_groups_apply_filter_first() {
        let todo = ColumnId::new();
        let mut tasks = board_with(&todo, &["Invoice ACME", "Call bank"]);
        tasks[0].priority = Priority::High;

        let groups = compute_column_groups(&tasks, &TaskFilter::new().with_priority(Priority::High));
        assert_eq!(groups[&todo].len(), 1);
        assert_eq!(groups[&todo][0].title, "Invoice ACME");

        let groups = compute_column_groups(&tasks, &TaskFilter::new().with_search("payroll"));
        assert!(groups.is_empty());
    }
}
