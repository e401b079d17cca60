//! Task model, task list and command parsing for duke.

/// Commands and the outcome of applying them.
pub mod command;
/// Line parser producing commands.
pub mod parser;
/// Task variants and their storage encoding.
pub mod task;
/// Ordered task collection.
pub mod task_list;

pub use command::{Command, Outcome};
pub use parser::{IndexedAction, Instruction, Keyword, ParseError, parse, tokenize};
pub use task::{
    Schedule, Status, Task, TaskError, TaskKind, TIMESTAMP_FORMAT, TimestampError, parse_timestamp,
};
pub use task_list::{TaskList, TaskListError};
