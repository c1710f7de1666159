//! Drag-and-drop gesture state.
//!
//! The gesture is ephemeral UI state: which task is picked up, which column
//! it hovers, and whether a drop is being committed. Every terminal event
//! returns the machine to [`DragState::Idle`]; the drop path enforces this
//! with a scope guard so an error or a dropped future cannot leave it stuck.

use crate::types::{ColumnId, TaskId};
use scopeguard::ScopeGuard;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Current gesture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// A task is picked up; `over` is the column currently under the pointer
    Dragging {
        task: TaskId,
        over: Option<ColumnId>,
    },
    /// The drop is being committed
    Dropping { task: TaskId, column: ColumnId },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Shared handle to the gesture state
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    state: Arc<Mutex<DragState>>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, DragState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state
    pub fn state(&self) -> DragState {
        self.lock().clone()
    }

    /// Pick up a task; supersedes any previous gesture
    pub fn begin(&self, task: TaskId) {
        trace!(%task, "drag begin");
        *self.lock() = DragState::Dragging { task, over: None };
    }

    /// Record the column under the pointer; ignored unless dragging
    pub fn hover(&self, column: ColumnId) {
        if let DragState::Dragging { over, .. } = &mut *self.lock() {
            *over = Some(column);
        }
    }

    /// Abandon the gesture
    pub fn cancel(&self) {
        trace!("drag cancelled");
        self.reset();
    }

    /// Force the machine back to idle
    pub fn reset(&self) {
        *self.lock() = DragState::Idle;
    }

    /// Enter `Dropping` for the dragged task.
    ///
    /// `column` overrides the hovered column. Returns `None` (and goes idle)
    /// when nothing is being dragged or there is no target.
    pub fn start_drop(&self, column: Option<ColumnId>) -> Option<(TaskId, ColumnId)> {
        let mut state = self.lock();
        let next = match &*state {
            DragState::Dragging { task, over } => column
                .or_else(|| over.clone())
                .map(|column| (task.clone(), column)),
            _ => None,
        };
        *state = match &next {
            Some((task, column)) => DragState::Dropping {
                task: task.clone(),
                column: column.clone(),
            },
            None => DragState::Idle,
        };
        next
    }

    /// Guard that resets the machine to idle when dropped
    pub fn reset_on_drop(&self) -> ScopeGuard<DragTracker, impl FnOnce(DragTracker)> {
        scopeguard::guard(self.clone(), |tracker| tracker.reset())
    }
}
