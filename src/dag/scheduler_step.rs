// src/dag/scheduler_step.rs

//! Step-by-step result type for the scheduler.

use crate::dag::TaskName;

/// Structured result of a single scheduler "step".
///
/// The executor uses it to decide what to spawn; tests use it to step the
/// graph by hand and make assertions about what changed.
#[derive(Debug, Clone, Default)]
pub struct SchedulerStep {
    /// Tasks that became ready (and are now `Running`) as a result of this step.
    pub newly_scheduled: Vec<TaskName>,
    /// Task newly marked as failed in this step, if any.
    pub failed: Option<TaskName>,
    /// Whether nothing is running any more and nothing will be started.
    pub run_just_finished: bool,
}
