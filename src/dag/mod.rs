// src/dag/mod.rs

//! Task graph representation and scheduling.
//!
//! - [`task_graph`] holds the caller-facing [`TaskGraph`]: nodes carrying
//!   task functions, with dependency edges declared separately.
//! - [`graph`] is the plain adjacency view the scheduler works on.
//! - [`validate`] rejects bad graphs before anything runs.
//! - [`scheduler`] contains the per-invocation state machine that decides
//!   which tasks are ready to run, and when the invocation is finished.
//! - [`state_manager`] implements the readiness rules over the state map.
//! - [`task_state`] and [`inputs`] define per-task state and the values a
//!   task receives from its dependencies.

pub mod graph;
pub mod inputs;
pub mod scheduler;
pub mod scheduler_step;
pub mod state_manager;
pub mod task_graph;
pub mod task_state;
pub mod validate;

/// Canonical task name type used throughout the crate.
pub type TaskName = String;

pub use graph::DagGraph;
pub use inputs::TaskInputs;
pub use scheduler::Scheduler;
pub use scheduler_step::SchedulerStep;
pub use task_graph::{TaskFn, TaskFuture, TaskGraph};
pub use task_state::{TaskOutcome, TaskRunState, TaskState};
pub use validate::validate_graph;
