// src/dag/inputs.rs

use std::collections::HashMap;

use anyhow::anyhow;

use crate::dag::TaskName;

/// Values handed to a task function: the final results of exactly the
/// tasks it declared as dependencies, and nothing else.
#[derive(Debug, Clone)]
pub struct TaskInputs<V> {
    task: TaskName,
    values: HashMap<TaskName, V>,
}

impl<V> TaskInputs<V> {
    pub fn new(task: impl Into<TaskName>, values: HashMap<TaskName, V>) -> Self {
        Self {
            task: task.into(),
            values,
        }
    }

    /// Name of the task receiving these inputs.
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Result of the declared dependency `dep`.
    ///
    /// Fails if `dep` is not one of this task's dependencies.
    pub fn get(&self, dep: &str) -> anyhow::Result<&V> {
        self.values.get(dep).ok_or_else(|| {
            anyhow!(
                "task '{}' did not declare a dependency on '{}'",
                self.task,
                dep
            )
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_map(self) -> HashMap<TaskName, V> {
        self.values
    }
}
