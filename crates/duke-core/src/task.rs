use std::fmt;

use thiserror::Error;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Literal format accepted for deadlines and events (`dd-mm-yyyy hh:mm`).
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year] [hour]:[minute]");

const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day] [year] [hour]:[minute]");

// Letters stand for ASCII digits, everything else must match byte for byte.
const TIMESTAMP_SHAPE: &str = "dd-mm-yyyy hh:mm";

const FIELD_SEPARATOR: &str = " | ";

/// Why a time literal was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// The literal is not laid out as zero-padded `dd-mm-yyyy hh:mm`.
    #[error("expected dd-mm-yyyy hh:mm")]
    Shape,
    /// The layout is right but the date or time does not exist.
    #[error(transparent)]
    Range(#[from] time::error::Parse),
}

fn has_timestamp_shape(input: &str) -> bool {
    input.len() == TIMESTAMP_SHAPE.len()
        && input.bytes().zip(TIMESTAMP_SHAPE.bytes()).all(|(byte, slot)| {
            if slot.is_ascii_alphabetic() {
                byte.is_ascii_digit()
            } else {
                byte == slot
            }
        })
}

/// Parse a `dd-mm-yyyy hh:mm` literal.
///
/// # Errors
/// Returns [`TimestampError::Shape`] unless the input is exactly the zero-padded layout,
/// and [`TimestampError::Range`] when it names a date or time that does not exist.
pub fn parse_timestamp(input: &str) -> Result<PrimitiveDateTime, TimestampError> {
    if !has_timestamp_shape(input) {
        return Err(TimestampError::Shape);
    }
    Ok(PrimitiveDateTime::parse(input, TIMESTAMP_FORMAT)?)
}

fn format_timestamp(value: PrimitiveDateTime) -> String {
    // Formatting only fails for components the description does not reference.
    value.format(TIMESTAMP_FORMAT).unwrap_or_default()
}

fn display_timestamp(value: PrimitiveDateTime) -> String {
    value.format(DISPLAY_FORMAT).unwrap_or_default()
}

/// Errors raised while constructing or decoding a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The description is empty after trimming.
    #[error("task description cannot be blank")]
    BlankDescription,
    /// The encoded line lacks a required field.
    #[error("missing {0} field")]
    MissingField(&'static str),
    /// The encoded type tag is not one of `T`, `D`, `E`.
    #[error("unknown task type tag: {0:?}")]
    UnknownTag(String),
    /// The encoded done flag is not `0` or `1`.
    #[error("invalid done flag: {0:?}")]
    InvalidStatus(String),
    /// The encoded time value does not match `dd-mm-yyyy hh:mm`.
    #[error("invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// Offending literal.
        value: String,
        /// Parser failure.
        #[source]
        source: TimestampError,
    },
}

/// Discriminant shared by tasks and the add-task commands that create them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Plain todo item.
    Todo,
    /// Task due at a point in time.
    Deadline,
    /// Task happening at a point in time.
    Event,
}

impl TaskKind {
    /// Single-letter tag used in rendering and encoding.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Todo => 'T',
            Self::Deadline => 'D',
            Self::Event => 'E',
        }
    }

    const fn from_tag(tag: &str) -> Option<Self> {
        match tag.as_bytes() {
            b"T" => Some(Self::Todo),
            b"D" => Some(Self::Deadline),
            b"E" => Some(Self::Event),
            _ => None,
        }
    }
}

/// Completion state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    /// Not done yet.
    #[default]
    Pending,
    /// Marked as done.
    Done,
}

/// Variant-specific payload of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// No point in time attached.
    Todo,
    /// Must be finished by `by`.
    Deadline {
        /// Due time.
        by: PrimitiveDateTime,
    },
    /// Takes place at `at`.
    Event {
        /// Occurrence time.
        at: PrimitiveDateTime,
    },
}

impl Schedule {
    /// Kind of task this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        match self {
            Self::Todo => TaskKind::Todo,
            Self::Deadline { .. } => TaskKind::Deadline,
            Self::Event { .. } => TaskKind::Event,
        }
    }

    const fn time(&self) -> Option<PrimitiveDateTime> {
        match *self {
            Self::Todo => None,
            Self::Deadline { by } => Some(by),
            Self::Event { at } => Some(at),
        }
    }
}

/// A single tracked task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    status: Status,
    schedule: Schedule,
}

impl Task {
    /// Create a pending task.
    ///
    /// # Errors
    /// Returns [`TaskError::BlankDescription`] when `description` is blank.
    pub fn new(description: impl Into<String>, schedule: Schedule) -> Result<Self, TaskError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(TaskError::BlankDescription);
        }
        Ok(Self {
            description,
            status: Status::Pending,
            schedule,
        })
    }

    /// Create a pending todo.
    ///
    /// # Errors
    /// Returns [`TaskError::BlankDescription`] when `description` is blank.
    pub fn todo(description: impl Into<String>) -> Result<Self, TaskError> {
        Self::new(description, Schedule::Todo)
    }

    /// Create a pending deadline.
    ///
    /// # Errors
    /// Returns [`TaskError::BlankDescription`] when `description` is blank.
    pub fn deadline(
        description: impl Into<String>,
        by: PrimitiveDateTime,
    ) -> Result<Self, TaskError> {
        Self::new(description, Schedule::Deadline { by })
    }

    /// Create a pending event.
    ///
    /// # Errors
    /// Returns [`TaskError::BlankDescription`] when `description` is blank.
    pub fn event(
        description: impl Into<String>,
        at: PrimitiveDateTime,
    ) -> Result<Self, TaskError> {
        Self::new(description, Schedule::Event { at })
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Variant payload.
    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Variant discriminant.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.schedule.kind()
    }

    /// Current completion state.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Whether the task has been marked as done.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.status, Status::Done)
    }

    /// Transition to [`Status::Done`]. Returns the previous status.
    pub const fn mark(&mut self) -> Status {
        self.transition(Status::Done)
    }

    /// Transition to [`Status::Pending`]. Returns the previous status.
    pub const fn unmark(&mut self) -> Status {
        self.transition(Status::Pending)
    }

    const fn transition(&mut self, next: Status) -> Status {
        let previous = self.status;
        self.status = next;
        previous
    }

    /// Human-readable line, e.g. `[D][X] Report (by: Jan 31 2025 23:59)`.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Encode as a single storage line.
    #[must_use]
    pub fn encode(&self) -> String {
        let flag = if self.is_done() { "1" } else { "0" };
        let mut line = format!(
            "{tag}{FIELD_SEPARATOR}{flag}{FIELD_SEPARATOR}{description}",
            tag = self.kind().tag(),
            description = self.description,
        );
        if let Some(time) = self.schedule.time() {
            line.push_str(FIELD_SEPARATOR);
            line.push_str(&format_timestamp(time));
        }
        line
    }

    /// Decode a line produced by [`Task::encode`].
    ///
    /// # Errors
    /// Returns a [`TaskError`] describing the first malformed field.
    pub fn decode(line: &str) -> Result<Self, TaskError> {
        let mut fields = line.splitn(3, FIELD_SEPARATOR);
        let tag = fields.next().ok_or(TaskError::MissingField("type"))?;
        let kind = TaskKind::from_tag(tag).ok_or_else(|| TaskError::UnknownTag(tag.to_owned()))?;
        let flag = fields.next().ok_or(TaskError::MissingField("done flag"))?;
        let status = match flag {
            "0" => Status::Pending,
            "1" => Status::Done,
            other => return Err(TaskError::InvalidStatus(other.to_owned())),
        };
        let rest = fields.next().ok_or(TaskError::MissingField("description"))?;

        let (description, schedule) = match kind {
            TaskKind::Todo => (rest, Schedule::Todo),
            TaskKind::Deadline | TaskKind::Event => {
                let (description, value) = rest
                    .rsplit_once(FIELD_SEPARATOR)
                    .ok_or(TaskError::MissingField("time"))?;
                let time = parse_timestamp(value).map_err(|source| TaskError::InvalidTimestamp {
                    value: value.to_owned(),
                    source,
                })?;
                let schedule = if kind == TaskKind::Deadline {
                    Schedule::Deadline { by: time }
                } else {
                    Schedule::Event { at: time }
                };
                (description, schedule)
            }
        };

        let mut task = Self::new(description, schedule)?;
        if status == Status::Done {
            task.mark();
        }
        Ok(task)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_done() { 'X' } else { ' ' };
        write!(f, "[{}][{mark}] {}", self.kind().tag(), self.description)?;
        match self.schedule {
            Schedule::Todo => Ok(()),
            Schedule::Deadline { by } => write!(f, " (by: {})", display_timestamp(by)),
            Schedule::Event { at } => write!(f, " (at: {})", display_timestamp(at)),
        }
    }
}
