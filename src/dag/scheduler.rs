use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::dag::scheduler_step::SchedulerStep;
use crate::dag::state_manager::{ReadOnlyStateManager, StateManager};
use crate::dag::task_state::{TaskOutcome, TaskRunState, TaskState};
use crate::dag::{DagGraph, TaskInputs, TaskName};

/// Scheduler holds the immutable graph plus the mutable execution state of
/// a single invocation.
///
/// It is responsible for:
/// - handing out the initial ready set
/// - recording each task's completion (`Done` or `Failed`)
/// - deciding which dependents became ready
/// - switching to draining after the first failure
///
/// It is synchronous and performs no IO; the async shell in
/// [`crate::exec`] feeds it completions one at a time.
#[derive(Debug)]
pub struct Scheduler<V> {
    graph: DagGraph,
    states: HashMap<TaskName, TaskState<V>>,
    /// First task observed as failed, in completion order.
    first_failure: Option<TaskName>,
    started: bool,
}

impl<V: Clone> Scheduler<V> {
    /// Construct a scheduler with every task `Pending`.
    ///
    /// Assumes the graph has already been validated.
    pub fn new(graph: DagGraph) -> Self {
        let states = graph
            .tasks()
            .map(|name| (name.to_string(), TaskState::Pending))
            .collect();

        Self {
            graph,
            states,
            first_failure: None,
            started: false,
        }
    }

    pub fn graph(&self) -> &DagGraph {
        &self.graph
    }

    /// Read-only view of the given task's state.
    pub fn run_state_of(&self, task: &str) -> Option<TaskRunState> {
        self.states.get(task).map(TaskRunState::from)
    }

    /// Whether every dependency of `task` is `Done`.
    ///
    /// Returns `None` if the task is unknown.
    pub fn deps_satisfied(&self, task: &str) -> Option<bool> {
        if !self.states.contains_key(task) {
            return None;
        }
        Some(self.read_only().deps_satisfied(task))
    }

    /// Whether a failure has been observed and no new tasks will start.
    pub fn is_draining(&self) -> bool {
        self.first_failure.is_some()
    }

    pub fn first_failure(&self) -> Option<&str> {
        self.first_failure.as_deref()
    }

    pub fn running_count(&self) -> usize {
        self.read_only().running_count()
    }

    /// Nothing is running and nothing more will be started.
    pub fn is_finished(&self) -> bool {
        self.running_count() == 0 && (self.is_draining() || self.read_only().all_tasks_terminal())
    }

    /// Nothing is running, no failure was seen, yet some task never ran.
    ///
    /// Cannot happen for a validated graph.
    pub fn is_stalled(&self) -> bool {
        self.started
            && self.running_count() == 0
            && !self.is_draining()
            && !self.read_only().all_tasks_terminal()
    }

    /// Inputs for `task`: the final values of its declared dependencies.
    pub fn inputs_for(&self, task: &str) -> TaskInputs<V> {
        self.read_only().inputs_for(task)
    }

    /// Final value of a `Done` task.
    pub fn result_of(&self, task: &str) -> Option<&V> {
        self.states.get(task).and_then(TaskState::value)
    }

    /// Move the final value of a `Done` task out of the state map.
    pub fn take_result(&mut self, task: &str) -> Option<V> {
        match self.states.remove(task) {
            Some(TaskState::Done(v)) => Some(v),
            Some(other) => {
                self.states.insert(task.to_string(), other);
                None
            }
            None => None,
        }
    }

    /// Start the invocation: every task without dependencies becomes `Running`.
    pub fn start(&mut self) -> SchedulerStep {
        if self.started {
            warn!("scheduler already started; ignoring");
            return SchedulerStep::default();
        }
        self.started = true;

        let candidates: Vec<TaskName> = self.graph.tasks().map(str::to_string).collect();
        let mut manager = StateManager::new(&self.graph, &mut self.states);
        let newly_scheduled = manager.collect_new_ready_tasks(candidates.iter().map(String::as_str));

        info!(ready = ?newly_scheduled, "scheduler: initial ready set");

        SchedulerStep {
            newly_scheduled,
            failed: None,
            run_just_finished: self.is_finished(),
        }
    }

    /// Record the completion of a running task.
    ///
    /// On success the task's dependents are checked for readiness (unless
    /// draining). On failure the scheduler starts draining; only the first
    /// failure is remembered.
    pub fn step_completion(&mut self, task: &str, outcome: TaskOutcome<V>) -> SchedulerStep {
        let mut step = SchedulerStep::default();

        match outcome {
            TaskOutcome::Success(value) => {
                let mut manager = StateManager::new(&self.graph, &mut self.states);
                if !manager.mark_done(task, value) {
                    return step;
                }
                debug!(task = %task, "task completed successfully");

                if self.is_draining() {
                    debug!(task = %task, "draining; result discarded and dependents not scheduled");
                } else {
                    let dependents = self.graph.dependents_of(task).to_vec();
                    let mut manager = StateManager::new(&self.graph, &mut self.states);
                    step.newly_scheduled =
                        manager.collect_new_ready_tasks(dependents.iter().map(String::as_str));
                }
            }
            TaskOutcome::Failed => {
                let mut manager = StateManager::new(&self.graph, &mut self.states);
                if !manager.mark_failed(task) {
                    return step;
                }
                step.failed = Some(task.to_string());

                if self.first_failure.is_none() {
                    warn!(
                        task = %task,
                        running = self.running_count(),
                        "task failed; draining in-flight tasks"
                    );
                    self.first_failure = Some(task.to_string());
                } else {
                    debug!(task = %task, "further failure while draining");
                }
            }
        }

        step.run_just_finished = self.is_finished();
        if step.run_just_finished {
            info!(
                failed = self.first_failure.as_deref(),
                "scheduler: no tasks running; invocation finished"
            );
        }
        step
    }

    fn read_only(&self) -> ReadOnlyStateManager<'_, V> {
        ReadOnlyStateManager::new(&self.graph, &self.states)
    }
}
