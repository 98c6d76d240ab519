// src/dag/task_graph.rs

//! Caller-facing task graph.
//!
//! Nodes carry the task functions; edges are declared separately with
//! [`TaskGraph::add_edge`] (or in one go with [`TaskGraph::add_task_after`]).
//! Nothing is checked while building: [`crate::dag::validate_graph`] runs
//! before execution and rejects duplicates, unknown names and cycles.
//!
//! ```no_run
//! # use balancedag::dag::TaskGraph;
//! let mut graph: TaskGraph<i64> = TaskGraph::new();
//! graph.add_task("a", |_| async { Ok(1) });
//! graph.add_task("b", |_| async { Ok(2) });
//! graph.add_task_after("sum", &["a", "b"], |inputs| async move {
//!     Ok(inputs.get("a")? + inputs.get("b")?)
//! });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::dag::{DagGraph, TaskInputs, TaskName};

/// Boxed future returned by a task function.
pub type TaskFuture<V> = Pin<Box<dyn Future<Output = anyhow::Result<V>> + Send + 'static>>;

/// A task function: receives its dependencies' results, produces a value.
pub type TaskFn<V> = Arc<dyn Fn(TaskInputs<V>) -> TaskFuture<V> + Send + Sync>;

pub struct TaskGraph<V> {
    order: Vec<TaskName>,
    runners: HashMap<TaskName, TaskFn<V>>,
    /// `(dependency, dependent)` pairs.
    edges: Vec<(TaskName, TaskName)>,
    /// Names declared more than once.
    duplicates: Vec<TaskName>,
}

impl<V> fmt::Debug for TaskGraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskGraph")
            .field("tasks", &self.order)
            .field("edges", &self.edges)
            .finish_non_exhaustive()
    }
}

impl<V> Default for TaskGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TaskGraph<V> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            runners: HashMap::new(),
            edges: Vec::new(),
            duplicates: Vec::new(),
        }
    }

    /// Register a task with no dependencies (yet).
    pub fn add_task<F, Fut>(&mut self, name: impl Into<TaskName>, run: F) -> &mut Self
    where
        V: 'static,
        F: Fn(TaskInputs<V>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        let name = name.into();
        let run: TaskFn<V> = Arc::new(move |inputs| Box::pin(run(inputs)) as TaskFuture<V>);

        if self.runners.insert(name.clone(), run).is_some() {
            self.duplicates.push(name);
        } else {
            self.order.push(name);
        }
        self
    }

    /// Declare that `task` depends on `dependency`.
    pub fn add_edge(&mut self, dependency: impl Into<TaskName>, task: impl Into<TaskName>) -> &mut Self {
        self.edges.push((dependency.into(), task.into()));
        self
    }

    /// Register a task together with the tasks it runs after.
    pub fn add_task_after<F, Fut>(
        &mut self,
        name: impl Into<TaskName>,
        after: &[&str],
        run: F,
    ) -> &mut Self
    where
        V: 'static,
        F: Fn(TaskInputs<V>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        let name = name.into();
        for dep in after {
            self.add_edge(*dep, name.clone());
        }
        self.add_task(name, run)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.runners.contains_key(name)
    }

    /// Task names in declaration order.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Declared `(dependency, dependent)` edges, as given.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().map(|(d, t)| (d.as_str(), t.as_str()))
    }

    pub fn duplicates(&self) -> &[TaskName] {
        &self.duplicates
    }

    /// Tasks with their declared dependencies, in declaration order.
    pub fn describe(&self) -> Vec<(TaskName, Vec<TaskName>)> {
        self.order
            .iter()
            .map(|name| {
                let deps = self
                    .edges
                    .iter()
                    .filter(|(_, task)| task == name)
                    .map(|(dep, _)| dep.clone())
                    .collect();
                (name.clone(), deps)
            })
            .collect()
    }

    /// Adjacency view used by the scheduler.
    pub fn topology(&self) -> DagGraph {
        DagGraph::from_edges(self.tasks(), self.edges())
    }

    /// Split into the adjacency view and the task functions.
    pub(crate) fn into_parts(self) -> (DagGraph, HashMap<TaskName, TaskFn<V>>) {
        let topology = self.topology();
        (topology, self.runners)
    }
}
