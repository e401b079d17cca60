use crate::task::Task;
use crate::task_list::{TaskList, TaskListError};

/// Fully validated instruction produced by [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show every task.
    List,
    /// End the session.
    Bye,
    /// Show tasks whose description contains the query.
    Find {
        /// Substring to look for, verbatim.
        query: String,
    },
    /// Mark the task at the zero-based index as done.
    Mark {
        /// Zero-based position.
        index: usize,
    },
    /// Mark the task at the zero-based index as not done.
    Unmark {
        /// Zero-based position.
        index: usize,
    },
    /// Remove the task at the zero-based index.
    Delete {
        /// Zero-based position.
        index: usize,
    },
    /// Append a new task.
    Add {
        /// Task to append.
        task: Task,
    },
}

/// What applying a [`Command`] did to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Snapshot of the whole list.
    Listed(Vec<Task>),
    /// Matching tasks with their zero-based positions.
    Found(Vec<(usize, Task)>),
    /// Task after being marked done.
    Marked(Task),
    /// Task after being marked not done.
    Unmarked(Task),
    /// Removed task and the remaining list size.
    Deleted {
        /// Task that was removed.
        task: Task,
        /// Size after removal.
        remaining: usize,
    },
    /// Added task and the new list size.
    Added {
        /// Task that was appended.
        task: Task,
        /// Size after appending.
        total: usize,
    },
    /// Session should end.
    Exit,
}

impl Command {
    /// Whether applying this command changes the list and therefore needs persisting.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Mark { .. } | Self::Unmark { .. } | Self::Delete { .. } | Self::Add { .. }
        )
    }

    /// Whether this command ends the session.
    #[must_use]
    pub const fn is_exit(&self) -> bool {
        matches!(self, Self::Bye)
    }

    /// Apply the command to `tasks`.
    ///
    /// # Errors
    /// Returns [`TaskListError`] when an index validated at parse time no longer
    /// points at a task. The list is left unchanged in that case.
    pub fn apply(self, tasks: &mut TaskList) -> Result<Outcome, TaskListError> {
        let outcome = match self {
            Self::List => Outcome::Listed(tasks.iter().cloned().collect()),
            Self::Bye => Outcome::Exit,
            Self::Find { query } => Outcome::Found(
                tasks
                    .find(&query)
                    .into_iter()
                    .map(|(index, task)| (index, task.clone()))
                    .collect(),
            ),
            Self::Mark { index } => {
                let task = tasks.get_mut(index)?;
                task.mark();
                Outcome::Marked(task.clone())
            }
            Self::Unmark { index } => {
                let task = tasks.get_mut(index)?;
                task.unmark();
                Outcome::Unmarked(task.clone())
            }
            Self::Delete { index } => {
                let task = tasks.remove(index)?;
                Outcome::Deleted {
                    task,
                    remaining: tasks.len(),
                }
            }
            Self::Add { task } => {
                tasks.push(task.clone());
                Outcome::Added {
                    task,
                    total: tasks.len(),
                }
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(descriptions: &[&str]) -> TaskList {
        descriptions
            .iter()
            .map(|d| Task::todo(*d).unwrap_or_else(|err| panic!("todo must build: {err}")))
            .collect()
    }

    #[test]
    fn only_list_changes_are_mutating() {
        assert!(!Command::List.is_mutating());
        assert!(!Command::Bye.is_mutating());
        assert!(!Command::Find { query: "x".into() }.is_mutating());
        assert!(Command::Mark { index: 0 }.is_mutating());
        assert!(Command::Unmark { index: 0 }.is_mutating());
        assert!(Command::Delete { index: 0 }.is_mutating());
        let task = Task::todo("new").unwrap_or_else(|err| panic!("todo must build: {err}"));
        assert!(Command::Add { task }.is_mutating());
        assert!(Command::Bye.is_exit());
        assert!(!Command::List.is_exit());
    }

    #[test]
    fn mark_then_unmark_round_trips_status() -> Result<(), TaskListError> {
        let mut tasks = list_of(&["a", "b"]);

        let Outcome::Marked(task) = Command::Mark { index: 1 }.apply(&mut tasks)? else {
            panic!("mark must report Marked");
        };
        assert!(task.is_done());
        assert!(tasks.get(1).is_some_and(Task::is_done));
        assert!(tasks.get(0).is_some_and(|t| !t.is_done()));

        Command::Unmark { index: 1 }.apply(&mut tasks)?;
        assert!(tasks.get(1).is_some_and(|t| !t.is_done()));
        Ok(())
    }

    #[test]
    fn delete_reports_remaining_count() -> Result<(), TaskListError> {
        let mut tasks = list_of(&["a", "b", "c"]);
        let outcome = Command::Delete { index: 0 }.apply(&mut tasks)?;
        let Outcome::Deleted { task, remaining } = outcome else {
            panic!("delete must report Deleted");
        };
        assert_eq!(task.description(), "a");
        assert_eq!(remaining, 2);
        assert_eq!(tasks.get(0).map(Task::description), Some("b"));
        Ok(())
    }

    #[test]
    fn stale_index_leaves_list_untouched() {
        let mut tasks = list_of(&["only"]);
        let before = tasks.clone();
        assert!(Command::Delete { index: 1 }.apply(&mut tasks).is_err());
        assert!(Command::Mark { index: 5 }.apply(&mut tasks).is_err());
        assert_eq!(tasks, before);
    }

    #[test]
    fn find_keeps_original_positions() -> Result<(), TaskListError> {
        let mut tasks = list_of(&["read book", "buy milk", "return book"]);
        let outcome = Command::Find { query: "book".into() }.apply(&mut tasks)?;
        let Outcome::Found(hits) = outcome else {
            panic!("find must report Found");
        };
        let positions: Vec<_> = hits.iter().map(|(index, _)| *index).collect();
        assert_eq!(positions, [0, 2]);
        Ok(())
    }
}
