// src/dag/task_state.rs

//! Per-invocation task state.

/// State of a task within one invocation (internal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState<V> {
    /// Waiting on dependencies.
    Pending,
    /// Handed to the executor and currently running.
    Running,
    /// Completed successfully with this value.
    Done(V),
    /// The task's function reported an error.
    Failed,
}

impl<V> TaskState<V> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Done(_) | TaskState::Failed)
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            TaskState::Done(v) => Some(v),
            _ => None,
        }
    }
}

/// Public, read-only view of a task's state.
///
/// This is exposed for tests and diagnostics without handing out the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRunState {
    Pending,
    Running,
    Done,
    Failed,
}

impl<V> From<&TaskState<V>> for TaskRunState {
    fn from(state: &TaskState<V>) -> Self {
        match state {
            TaskState::Pending => TaskRunState::Pending,
            TaskState::Running => TaskRunState::Running,
            TaskState::Done(_) => TaskRunState::Done,
            TaskState::Failed => TaskRunState::Failed,
        }
    }
}

/// Outcome of a single task run, as reported back to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<V> {
    Success(V),
    Failed,
}
