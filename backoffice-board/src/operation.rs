//! Command plumbing shared by every board operation.
//!
//! Operations are plain structs whose fields are their parameters. Each one
//! names itself with a verb/noun pair (used as the activity-log op string)
//! and implements [`Execute`] against a context.

use crate::types::LogEntry;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Instant;

/// Static metadata about an operation
pub trait Operation {
    /// Verb part of the op string ("add", "move", ...)
    fn verb(&self) -> &'static str;

    /// Noun part of the op string ("task", "column", ...)
    fn noun(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Canonical op string, e.g. "move task"
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against a context `C`, failing with `E`
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
{
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: operations that mutated state and should be audited
/// - Unlogged: read-only operations and no-ops
/// - Failed: errors (optionally logged)
#[derive(Debug)]
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

/// Wrap the outcome of a mutating operation, attaching a log entry either way.
pub(crate) fn logged<E: std::fmt::Display>(
    op: String,
    input: Value,
    start: Instant,
    result: Result<Value, E>,
) -> ExecutionResult<Value, E> {
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(value) => ExecutionResult::Logged {
            log_entry: LogEntry::new(op, input, value.clone(), None, duration_ms),
            value,
        },
        Err(error) => {
            let log_entry = LogEntry::failure(op, input, &error.to_string(), duration_ms);
            ExecutionResult::Failed {
                error,
                log_entry: Some(log_entry),
            }
        }
    }
}

/// Wrap the outcome of a read-only operation.
pub(crate) fn unlogged<E>(result: Result<Value, E>) -> ExecutionResult<Value, E> {
    match result {
        Ok(value) => ExecutionResult::Unlogged { value },
        Err(error) => ExecutionResult::Failed {
            error,
            log_entry: None,
        },
    }
}

/// Implement [`Operation`] for a command struct.
macro_rules! operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal) => {
        impl $crate::operation::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }
        }
    };
}

pub(crate) use operation;

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;
    operation!(Ping, verb = "ping", noun = "board", description = "Check the board");

    #[test]
    fn test_op_string() {
        assert_eq!(Ping.op_string(), "ping board");
        assert_eq!(Ping.description(), "Check the board");
    }

    #[test]
    fn test_logged_failure_carries_entry() {
        let result: ExecutionResult<Value, String> = logged(
            "move task".into(),
            Value::Null,
            Instant::now(),
            Err("disk full".to_string()),
        );
        assert!(result.should_log());
        let (value, entry) = result.split();
        assert_eq!(value.unwrap_err(), "disk full");
        assert!(entry.unwrap().is_failure());
    }

    #[test]
    fn test_unlogged_success_is_not_logged() {
        let result: ExecutionResult<Value, String> = unlogged(Ok(serde_json::json!(1)));
        assert!(!result.should_log());
        assert_eq!(result.into_result().unwrap(), 1);
    }
}
