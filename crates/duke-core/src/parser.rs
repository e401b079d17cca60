use thiserror::Error;

use crate::command::Command;
use crate::task::{Schedule, Task, TaskKind, parse_timestamp};

/// Failure to turn an input line into a [`Command`]. Each variant displays the message
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line was empty after trimming.
    #[error("I can't do anything based off a blank instruction!")]
    BlankInstruction,
    /// The keyword is not part of the vocabulary.
    #[error("Command not recognised. Try again?")]
    UnknownCommand(String),
    /// The argument of `mark`/`unmark`/`delete` is not an integer.
    #[error("Error when parsing user input - did you supply a valid number as an index?")]
    InvalidNumber(String),
    /// The zero-based index falls outside the list.
    #[error("Invalid index provided. Try again?")]
    IndexOutOfRange {
        /// Zero-based index derived from the input.
        index: i64,
        /// List size at parse time.
        len: usize,
    },
    /// `find` without a query.
    #[error("Oops! Please provide a valid string to search for.")]
    BlankQuery,
    /// Add-task keyword without a usable description.
    #[error("Oops! Descriptions for tasks cannot be blank!")]
    BlankDescription,
    /// Deadline or event input without the expected divider.
    #[error("{}", .0.usage())]
    MissingDivider(TaskKind),
    /// Deadline or event time that is not `dd-mm-yyyy hh:mm`.
    #[error("{}", .0.date_hint())]
    InvalidDate(TaskKind),
}

impl TaskKind {
    const fn divider(self) -> &'static str {
        match self {
            Self::Todo => "",
            Self::Deadline => "/by",
            Self::Event => "/at",
        }
    }

    const fn usage(self) -> &'static str {
        match self {
            Self::Todo => "Oops! An error occurred when creating a new task.",
            Self::Deadline => {
                "Oops! To create a deadline, please format your input in this manner:\n\
                 <Deadline Name> /by dd-mm-yyyy hh:mm"
            }
            Self::Event => {
                "Oops! To create an event, please format your input in this manner:\n\
                 <Event Name> /at dd-mm-yyyy hh:mm"
            }
        }
    }

    const fn date_hint(self) -> &'static str {
        match self {
            Self::Todo => "Oops! An error occurred when creating a new task.",
            Self::Deadline => {
                "Oops! Deadlines must have a valid deadline, formatted as dd-mm-yyyy hh:mm."
            }
            Self::Event => {
                "Oops! Events must have a date of occurrence, formatted as dd-mm-yyyy hh:mm."
            }
        }
    }
}

/// Commands addressing an existing task by its visible number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexedAction {
    /// `mark <n>`
    Mark,
    /// `unmark <n>`
    Unmark,
    /// `delete <n>`
    Delete,
}

/// Closed set of recognised keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `list`
    List,
    /// `bye`
    Bye,
    /// `find <text>`
    Find,
    /// `mark`, `unmark`, `delete`
    Indexed(IndexedAction),
    /// `todo`, `deadline`, `event`
    Add(TaskKind),
}

impl Keyword {
    /// Resolve an already lower-cased keyword.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let keyword = match token {
            "list" => Self::List,
            "bye" => Self::Bye,
            "find" => Self::Find,
            "mark" => Self::Indexed(IndexedAction::Mark),
            "unmark" => Self::Indexed(IndexedAction::Unmark),
            "delete" => Self::Indexed(IndexedAction::Delete),
            "todo" => Self::Add(TaskKind::Todo),
            "deadline" => Self::Add(TaskKind::Deadline),
            "event" => Self::Add(TaskKind::Event),
            _ => return None,
        };
        Some(keyword)
    }
}

/// Tokenized input line: lower-cased keyword and trimmed remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction<'a> {
    /// First space-delimited token, lower-cased. Empty for blank input.
    pub keyword: String,
    /// Everything after the keyword, trimmed. Empty when absent.
    pub remainder: &'a str,
}

/// Split a raw line into keyword and remainder. Never fails.
#[must_use]
pub fn tokenize(raw: &str) -> Instruction<'_> {
    let line = trim_control(raw);
    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    Instruction {
        keyword: head.to_lowercase(),
        remainder: trim_control(rest),
    }
}

/// Strip spaces and ASCII control characters only; other Unicode whitespace is kept.
fn trim_control(text: &str) -> &str {
    text.trim_matches(|c: char| c <= ' ')
}

/// Parse one input line against a list currently holding `task_count` tasks.
///
/// # Errors
/// Returns a [`ParseError`] carrying the user-facing message when the line is blank,
/// unknown, or has invalid arguments.
pub fn parse(raw: &str, task_count: usize) -> Result<Command, ParseError> {
    tokenize(raw).execute(task_count)
}

impl Instruction<'_> {
    /// Route on the keyword and build the matching command.
    ///
    /// # Errors
    /// See [`parse`].
    pub fn execute(&self, task_count: usize) -> Result<Command, ParseError> {
        if self.keyword.is_empty() {
            return Err(ParseError::BlankInstruction);
        }
        let keyword = Keyword::from_token(&self.keyword)
            .ok_or_else(|| ParseError::UnknownCommand(self.keyword.clone()))?;

        match keyword {
            Keyword::List => Ok(Command::List),
            Keyword::Bye => Ok(Command::Bye),
            Keyword::Find => find_command(self.remainder),
            Keyword::Indexed(action) => indexed_command(action, self.remainder, task_count),
            Keyword::Add(kind) => add_command(kind, self.remainder),
        }
    }
}

fn find_command(remainder: &str) -> Result<Command, ParseError> {
    if remainder.is_empty() {
        return Err(ParseError::BlankQuery);
    }
    Ok(Command::Find {
        query: remainder.to_owned(),
    })
}

fn indexed_command(
    action: IndexedAction,
    remainder: &str,
    task_count: usize,
) -> Result<Command, ParseError> {
    let number: i32 = remainder
        .parse()
        .map_err(|_| ParseError::InvalidNumber(remainder.to_owned()))?;
    let position = i64::from(number) - 1;
    let index = usize::try_from(position)
        .ok()
        .filter(|&index| index < task_count)
        .ok_or(ParseError::IndexOutOfRange {
            index: position,
            len: task_count,
        })?;

    Ok(match action {
        IndexedAction::Mark => Command::Mark { index },
        IndexedAction::Unmark => Command::Unmark { index },
        IndexedAction::Delete => Command::Delete { index },
    })
}

fn add_command(kind: TaskKind, remainder: &str) -> Result<Command, ParseError> {
    if remainder.is_empty() {
        return Err(ParseError::BlankDescription);
    }

    let (description, schedule) = match kind {
        TaskKind::Todo => (remainder, Schedule::Todo),
        TaskKind::Deadline | TaskKind::Event => {
            let (description, value) = split_on_divider(kind, remainder)?;
            let time = parse_timestamp(value).map_err(|_| ParseError::InvalidDate(kind))?;
            let schedule = if kind == TaskKind::Deadline {
                Schedule::Deadline { by: time }
            } else {
                Schedule::Event { at: time }
            };
            (description, schedule)
        }
    };

    // Construction only rejects blank descriptions.
    let task = Task::new(description, schedule).map_err(|_| ParseError::BlankDescription)?;
    Ok(Command::Add { task })
}

/// Split `<description> /xx <time>` into description and time literal.
///
/// The divider is the last `/`-prefixed token, but the split happens at the first `/`
/// in the remainder. Descriptions containing an earlier `/` therefore split wrongly;
/// existing data and users rely on this behaviour.
fn split_on_divider(kind: TaskKind, remainder: &str) -> Result<(&str, &str), ParseError> {
    let divider = remainder.split(' ').rfind(|token| token.starts_with('/'));
    if divider != Some(kind.divider()) {
        return Err(ParseError::MissingDivider(kind));
    }

    let slash = remainder
        .find('/')
        .ok_or(ParseError::MissingDivider(kind))?;
    let description = match slash.checked_sub(1) {
        Some(end) => remainder
            .get(..end)
            .ok_or(ParseError::InvalidDate(kind))?,
        None => "",
    };
    // Skips the divider and the space after it.
    let value = remainder
        .get(slash + 4..)
        .ok_or(ParseError::InvalidDate(kind))?;
    Ok((description, value))
}
