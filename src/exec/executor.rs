// src/exec/executor.rs

//! Async shell that drives the [`Scheduler`] on tokio.

use std::collections::HashMap;
use std::fmt;

use anyhow::anyhow;
use tokio::task::{Id, JoinSet};
use tracing::{debug, error, info};

use crate::dag::{Scheduler, TaskFn, TaskGraph, TaskName, TaskOutcome, validate_graph};
use crate::errors::{BalanceError, Result};

/// Execute every task in `graph` and return the value of `target`.
///
/// Convenience wrapper around [`Executor::new`] + [`Executor::run`].
pub async fn execute<V>(graph: TaskGraph<V>, target: &str) -> Result<V>
where
    V: Clone + Send + Sync + 'static,
{
    Executor::new(graph, target)?.run().await
}

/// One invocation of a task graph.
///
/// Ready tasks are spawned onto a [`JoinSet`] so independent tasks run
/// concurrently. Completions are consumed one at a time by [`Executor::run`],
/// which is the only code touching the scheduler state; each completion is
/// therefore a single atomic transition followed by the readiness check.
pub struct Executor<V> {
    scheduler: Scheduler<V>,
    runners: HashMap<TaskName, TaskFn<V>>,
    target: TaskName,
    in_flight: JoinSet<(TaskName, anyhow::Result<V>)>,
    /// Names of in-flight tasks, so a panicked task can still be named.
    names: HashMap<Id, TaskName>,
    first_error: Option<BalanceError>,
}

impl<V> fmt::Debug for Executor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("target", &self.target)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl<V> Executor<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Validate the graph and prepare an invocation.
    ///
    /// Fails with [`BalanceError::Configuration`] before any task runs if the
    /// graph is empty, `target` is unknown, an edge names an unknown task, or
    /// the dependencies form a cycle.
    pub fn new(graph: TaskGraph<V>, target: &str) -> Result<Self> {
        validate_graph(&graph, target)?;
        let (topology, runners) = graph.into_parts();

        Ok(Self {
            scheduler: Scheduler::new(topology),
            runners,
            target: target.to_string(),
            in_flight: JoinSet::new(),
            names: HashMap::new(),
            first_error: None,
        })
    }

    /// Run to completion or first failure.
    ///
    /// After the first failure no new task is started; tasks already running
    /// are awaited (never aborted) and their results discarded, then that
    /// first failure is returned.
    pub async fn run(mut self) -> Result<V> {
        info!(output = %self.target, "executing task graph");

        let step = self.scheduler.start();
        self.spawn_ready(step.newly_scheduled);

        while let Some(joined) = self.in_flight.join_next_with_id().await {
            let (task, result) = match joined {
                Ok((id, (task, result))) => {
                    self.names.remove(&id);
                    (task, result)
                }
                Err(join_err) => {
                    let task = self
                        .names
                        .remove(&join_err.id())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    (task, Err(anyhow!("task did not run to completion: {join_err}")))
                }
            };

            let outcome = match result {
                Ok(value) => {
                    debug!(task = %task, "task finished");
                    TaskOutcome::Success(value)
                }
                Err(cause) => {
                    if self.first_error.is_none() {
                        error!(task = %task, error = %format!("{cause:#}"), "task failed");
                        self.first_error = Some(BalanceError::task(task.clone(), cause));
                    } else {
                        debug!(task = %task, error = %format!("{cause:#}"), "discarding failure observed while draining");
                    }
                    TaskOutcome::Failed
                }
            };

            let step = self.scheduler.step_completion(&task, outcome);
            self.spawn_ready(step.newly_scheduled);
        }

        if let Some(err) = self.first_error.take() {
            return Err(err);
        }

        if self.scheduler.is_stalled() {
            return Err(BalanceError::Calculation(
                "task graph stalled with unfinished tasks and nothing running".to_string(),
            ));
        }

        self.scheduler.take_result(&self.target).ok_or_else(|| {
            BalanceError::Calculation(format!(
                "output task '{}' finished without a result",
                self.target
            ))
        })
    }

    fn spawn_ready(&mut self, ready: Vec<TaskName>) {
        if ready.is_empty() {
            return;
        }
        debug!(?ready, "spawning ready tasks");

        for name in ready {
            let Some(run) = self.runners.get(&name).cloned() else {
                // Validated graphs always have a runner for every node.
                self.first_error.get_or_insert_with(|| {
                    BalanceError::Configuration(format!("task '{}' has no function", name))
                });
                self.scheduler.step_completion(&name, TaskOutcome::Failed);
                continue;
            };

            let inputs = self.scheduler.inputs_for(&name);
            let task_name = name.clone();
            let handle = self.in_flight.spawn(async move {
                let result = run(inputs).await;
                (task_name, result)
            });
            self.names.insert(handle.id(), name);
        }
    }
}
