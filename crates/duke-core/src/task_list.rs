use thiserror::Error;

use crate::task::Task;

/// Raised when a zero-based index no longer points at a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("task index {index} is out of range for a list of {len} tasks")]
pub struct TaskListError {
    /// Requested zero-based index.
    pub index: usize,
    /// List size at the time of the request.
    pub len: usize,
}

/// Ordered collection of tasks; position is the identity users refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Number of live tasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list holds no tasks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a task at the end.
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Task at the zero-based `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Mutable task at the zero-based `index`.
    ///
    /// # Errors
    /// Returns [`TaskListError`] when `index` is out of range.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task, TaskListError> {
        let len = self.tasks.len();
        self.tasks.get_mut(index).ok_or(TaskListError { index, len })
    }

    /// Remove and return the task at the zero-based `index`, shifting later tasks down.
    ///
    /// # Errors
    /// Returns [`TaskListError`] when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<Task, TaskListError> {
        if index >= self.tasks.len() {
            return Err(TaskListError {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(self.tasks.remove(index))
    }

    /// Iterate in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Tasks whose description contains `query` (case-sensitive), with their zero-based positions.
    #[must_use]
    pub fn find(&self, query: &str) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.description().contains(query))
            .collect()
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
