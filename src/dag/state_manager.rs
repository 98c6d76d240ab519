// src/dag/state_manager.rs

//! Readiness rules over the per-invocation state map.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::dag::task_state::TaskState;
use crate::dag::{DagGraph, TaskInputs, TaskName};

/// Manages state transitions for tasks in one invocation.
pub struct StateManager<'a, V> {
    graph: &'a DagGraph,
    states: &'a mut HashMap<TaskName, TaskState<V>>,
}

impl<'a, V: Clone> StateManager<'a, V> {
    pub fn new(graph: &'a DagGraph, states: &'a mut HashMap<TaskName, TaskState<V>>) -> Self {
        Self { graph, states }
    }

    /// Whether every dependency of `task` is `Done`.
    pub fn deps_satisfied(&self, task: &str) -> bool {
        ReadOnlyStateManager::new(self.graph, &*self.states).deps_satisfied(task)
    }

    /// Among `candidates`, collect tasks that are `Pending` with all
    /// dependencies `Done`, mark them `Running`, and return their names in
    /// the order given.
    ///
    /// This is the only place a task leaves `Pending`, so a task can never
    /// be handed out twice.
    pub fn collect_new_ready_tasks<'n>(
        &mut self,
        candidates: impl IntoIterator<Item = &'n str>,
    ) -> Vec<TaskName> {
        // Decide first, then mutate to avoid borrowing issues.
        let ready: Vec<TaskName> = candidates
            .into_iter()
            .filter(|name| matches!(self.states.get(*name), Some(TaskState::Pending)))
            .filter(|name| self.deps_satisfied(name))
            .map(|name| name.to_string())
            .collect();

        for name in ready.iter() {
            if let Some(state) = self.states.get_mut(name) {
                debug!(task = %name, "dependencies satisfied; marking Running");
                *state = TaskState::Running;
            }
        }

        ready
    }

    /// Record the final value of a running task.
    pub fn mark_done(&mut self, task: &str, value: V) -> bool {
        self.transition(task, TaskState::Done(value))
    }

    pub fn mark_failed(&mut self, task: &str) -> bool {
        self.transition(task, TaskState::Failed)
    }

    fn transition(&mut self, task: &str, next: TaskState<V>) -> bool {
        match self.states.get_mut(task) {
            Some(state) if matches!(state, TaskState::Running) => {
                *state = next;
                true
            }
            Some(_) => {
                warn!(task = %task, "completion for a task that is not running; ignoring");
                false
            }
            None => {
                warn!(task = %task, "completion for unknown task; ignoring");
                false
            }
        }
    }
}

/// A read-only view over the state map.
pub struct ReadOnlyStateManager<'a, V> {
    graph: &'a DagGraph,
    states: &'a HashMap<TaskName, TaskState<V>>,
}

impl<'a, V: Clone> ReadOnlyStateManager<'a, V> {
    pub fn new(graph: &'a DagGraph, states: &'a HashMap<TaskName, TaskState<V>>) -> Self {
        Self { graph, states }
    }

    /// Whether every dependency of `task` is `Done`.
    pub fn deps_satisfied(&self, task: &str) -> bool {
        self.graph
            .dependencies_of(task)
            .iter()
            .all(|dep| matches!(self.states.get(dep), Some(TaskState::Done(_))))
    }

    /// Build the inputs for `task` from its dependencies' final values.
    pub fn inputs_for(&self, task: &str) -> TaskInputs<V> {
        let values = self
            .graph
            .dependencies_of(task)
            .iter()
            .filter_map(|dep| {
                self.states
                    .get(dep)
                    .and_then(TaskState::value)
                    .map(|v| (dep.clone(), v.clone()))
            })
            .collect();
        TaskInputs::new(task, values)
    }

    pub fn all_tasks_terminal(&self) -> bool {
        self.states.values().all(TaskState::is_terminal)
    }

    pub fn running_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| matches!(s, TaskState::Running))
            .count()
    }
}
