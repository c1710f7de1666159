//! Board operation processor
//!
//! Runs a command and writes its log entry, stamped with the actor, to the
//! store's activity log. Read-only commands leave no trace.

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::Execute;
use crate::types::LogEntry;
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// Executes operations and persists their audit trail
#[async_trait]
pub trait OperationProcessor<C, E>
where
    C: Send + Sync,
{
    /// Execute `operation` and record its log entry when it produced one
    async fn process<T>(&self, operation: &T, ctx: &C) -> std::result::Result<Value, E>
    where
        T: Execute<C, E> + Send + Sync;

    /// Persist one log entry
    async fn write_log(&self, ctx: &C, log_entry: &LogEntry) -> std::result::Result<(), E>;
}

/// Processor for board commands
#[derive(Debug, Clone, Default)]
pub struct BoardOperationProcessor {
    actor: Option<String>,
}

impl BoardOperationProcessor {
    /// Create a processor with no actor attribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor that stamps every entry with `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

#[async_trait]
impl OperationProcessor<BoardContext, BoardError> for BoardOperationProcessor {
    async fn process<T>(&self, operation: &T, ctx: &BoardContext) -> Result<Value>
    where
        T: Execute<BoardContext, BoardError> + Send + Sync,
    {
        let (result, log_entry) = operation.execute(ctx).await.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry = entry.with_actor(actor.clone());
            }
            // A lost audit line must not mask the command's own outcome
            if let Err(e) = self.write_log(ctx, &entry).await {
                warn!(op = %entry.op, error = %e, "failed to write activity log");
            }
        }

        result
    }

    async fn write_log(&self, ctx: &BoardContext, log_entry: &LogEntry) -> Result<()> {
        ctx.append_activity(log_entry).await
    }
}
