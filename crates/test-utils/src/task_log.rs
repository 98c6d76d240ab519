use std::sync::{Arc, Mutex};

/// Shared, ordered log of task start/finish events for executor tests.
#[derive(Clone, Default)]
pub struct TaskLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl TaskLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self, task: &str) {
        self.events.lock().unwrap().push(format!("start:{task}"));
    }

    pub fn finished(&self, task: &str) {
        self.events.lock().unwrap().push(format!("end:{task}"));
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Position of `event` in the log.
    pub fn position(&self, event: &str) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }

    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }

    pub fn starts(&self) -> usize {
        self.events().iter().filter(|e| e.starts_with("start:")).count()
    }
}
