//! The "what am I doing?" label.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::storage::KeyValueStore;

const TASK_KEY: &str = "currentTask";

/// Shown in place of an empty task. Never persisted.
pub const TASK_PLACEHOLDER: &str = "What are you doing?";

/// Loads and saves the current task through an injected backend.
pub struct TaskStore {
    backend: Rc<dyn KeyValueStore>,
    task: String,
}

impl TaskStore {
    /// Create a store and load whatever the backend holds.
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            backend,
            task: String::new(),
        };
        store.load();
        store
    }

    /// Reload from the backend. Missing or non-UTF-8 data loads as empty.
    pub fn load(&mut self) {
        self.task = match self.backend.get(TASK_KEY) {
            Ok(Some(bytes)) => String::from_utf8(bytes).unwrap_or_else(|e| {
                warn!(error = %e, "Stored task is not UTF-8, ignoring");
                String::new()
            }),
            Ok(None) => String::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored task");
                String::new()
            }
        };
        debug!(task = %self.task, "Loaded task");
    }

    /// Write the current task. Failures are logged and otherwise ignored.
    pub fn save(&self) {
        if let Err(e) = self.backend.set(TASK_KEY, self.task.as_bytes()) {
            warn!(error = %e, "Task not persisted");
        }
    }

    /// Replace the task and persist it.
    pub fn set(&mut self, task: impl Into<String>) {
        self.task = task.into();
        self.save();
    }

    /// Empty the task and persist.
    pub fn clear(&mut self) {
        self.set(String::new());
    }

    /// The raw task text.
    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Whether no task is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.task.is_empty()
    }

    /// The task, or [`TASK_PLACEHOLDER`] when empty.
    #[must_use]
    pub fn display_task(&self) -> &str {
        if self.task.is_empty() {
            TASK_PLACEHOLDER
        } else {
            &self.task
        }
    }
}
