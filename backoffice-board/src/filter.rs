//! Task filters applied before grouping

use crate::types::{Priority, Task};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Either the wildcard `all` or one exact value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Match<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Match<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> Match<T> {
    /// Parse a form value; empty input and `all` (any case) are the wildcard
    pub fn parse(input: &str) -> Result<Self, T::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            trimmed.parse().map(Self::Only)
        }
    }
}

/// The three independent board filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Case-insensitive substring of title or description; empty matches everything
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub assignee: Match<String>,
    #[serde(default)]
    pub priority: Match<Priority>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Match::Only(assignee.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Match::Only(priority);
        self
    }

    /// Whether every predicate accepts `task`
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && self.assignee.accepts(&task.assignee)
            && self.priority.accepts(&task.priority)
    }

    fn matches_search(&self, task: &Task) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoardId, ColumnId};

    fn task(title: &str, description: &str, assignee: &str, priority: Priority) -> Task {
        Task::new(BoardId::new(), ColumnId::new(), title, 0)
            .with_description(description)
            .with_assignee(assignee)
            .with_priority(priority)
    }

    #[test]
    fn test_default_filter_accepts_everything() {
        let t = task("Anything", "", "", Priority::Low);
        assert!(TaskFilter::new().matches(&t));
    }

    #[test]
    fn test_search_is_case_insensitive_on_title_and_description() {
        let t = task("Prepare Invoice", "for ACME Corp", "ana", Priority::High);
        assert!(TaskFilter::new().with_search("invoice").matches(&t));
        assert!(TaskFilter::new().with_search("acme").matches(&t));
        assert!(!TaskFilter::new().with_search("payroll").matches(&t));
    }

    #[test]
    fn test_assignee_is_exact() {
        let t = task("Call", "", "Ana", Priority::Medium);
        assert!(TaskFilter::new().with_assignee("Ana").matches(&t));
        assert!(!TaskFilter::new().with_assignee("ana").matches(&t));
    }

    #[test]
    fn test_filters_combine() {
        let t = task("Call client", "", "Ana", Priority::High);
        let filter = TaskFilter::new()
            .with_search("call")
            .with_assignee("Ana")
            .with_priority(Priority::Low);
        assert!(!filter.matches(&t));
    }

    #[test]
    fn test_match_parse() {
        assert_eq!(Match::<Priority>::parse("all").unwrap(), Match::All);
        assert_eq!(Match::<Priority>::parse("ALL").unwrap(), Match::All);
        assert_eq!(Match::<Priority>::parse("").unwrap(), Match::All);
        assert_eq!(
            Match::<Priority>::parse("high").unwrap(),
            Match::Only(Priority::High)
        );
        assert!(Match::<Priority>::parse("urgent").is_err());
    }
}
