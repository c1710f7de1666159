//! Property tests for the pure ordering functions

use backoffice_board::ordering::{apply_move, compact_column, compute_column_groups, next_order, rank_cmp};
use backoffice_board::{BoardId, ColumnId, Priority, Task, TaskFilter};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

const TITLES: [&str; 6] = ["Quote", "Invoice", "Receipt", "Call bank", "Payroll", "Taxes"];
const ASSIGNEES: [&str; 3] = ["", "Ana", "Bruno"];

fn columns() -> Vec<ColumnId> {
    (0..3)
        .map(|i| ColumnId::from_string(format!("col-{}", i)))
        .collect()
}

fn priority(n: u8) -> Priority {
    match n % 3 {
        0 => Priority::Low,
        1 => Priority::Medium,
        _ => Priority::High,
    }
}

/// (column, order, title, assignee, priority) per task
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((0usize..3, 0u32..6, 0usize..6, 0usize..3, any::<u8>()), 0..24).prop_map(
        |specs| {
            let board = BoardId::from_string("board");
            let cols = columns();
            let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (col, order, title, assignee, prio))| {
                    let mut task = Task::new(board.clone(), cols[col].clone(), TITLES[title], order)
                        .with_assignee(ASSIGNEES[assignee])
                        .with_priority(priority(prio));
                    task.created_at = base + Duration::seconds(i as i64);
                    task
                })
                .collect()
        },
    )
}

fn arb_filter() -> impl Strategy<Value = TaskFilter> {
    (
        prop::option::of(prop::sample::select(vec!["", "inv", "CALL", "zzz"])),
        prop::option::of(prop::sample::select(ASSIGNEES.to_vec())),
        prop::option::of(any::<u8>()),
    )
        .prop_map(|(search, assignee, prio)| {
            let mut filter = TaskFilter::new();
            if let Some(search) = search {
                filter = filter.with_search(search);
            }
            if let Some(assignee) = assignee {
                filter = filter.with_assignee(assignee);
            }
            if let Some(prio) = prio {
                filter = filter.with_priority(priority(prio));
            }
            filter
        })
}

proptest! {
    #[test]
    fn groups_partition_the_filtered_tasks(tasks in arb_tasks(), filter in arb_filter()) {
        let groups = compute_column_groups(&tasks, &filter);

        let grouped: usize = groups.values().map(Vec::len).sum();
        let matching = tasks.iter().filter(|t| filter.matches(t)).count();
        prop_assert_eq!(grouped, matching);

        for (column, group) in &groups {
            prop_assert!(!group.is_empty());
            for task in group {
                prop_assert_eq!(&task.column_id, column);
                prop_assert!(filter.matches(task));
            }
            for pair in group.windows(2) {
                prop_assert!(rank_cmp(&pair[0], &pair[1]).is_le());
            }
        }
    }

    #[test]
    fn grouping_is_deterministic(tasks in arb_tasks(), filter in arb_filter()) {
        prop_assert_eq!(
            compute_column_groups(&tasks, &filter),
            compute_column_groups(&tasks, &filter)
        );
    }

    #[test]
    fn move_then_compact_keeps_columns_contiguous(
        mut tasks in arb_tasks().prop_filter("need a task", |t| !t.is_empty()),
        pick in any::<prop::sample::Index>(),
        target in 0usize..3,
    ) {
        let cols = columns();
        for column in &cols {
            compact_column(&mut tasks, column);
        }

        let task = tasks[pick.index(tasks.len())].clone();
        let target = &cols[target];
        let order = next_order(&tasks, target);

        if &task.column_id != target {
            prop_assert!(apply_move(&mut tasks, &task.id, target, order));
            prop_assert!(!apply_move(&mut tasks, &task.id, target, order));
            compact_column(&mut tasks, &task.column_id);
        }

        for column in &cols {
            let mut orders: Vec<u32> = tasks
                .iter()
                .filter(|t| &t.column_id == column)
                .map(|t| t.order)
                .collect();
            orders.sort_unstable();
            let expected: Vec<u32> = (0..orders.len() as u32).collect();
            prop_assert_eq!(orders, expected);
        }
    }
}
