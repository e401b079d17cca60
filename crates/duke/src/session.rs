use std::fmt::Write as _;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use duke_core::{TaskList, parse};
use duke_store::TaskStore;
use tracing::{debug, warn};

use crate::ui;

/// Text produced for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub exit: bool,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit: false,
        }
    }
}

/// Interactive session owning the task list and its store.
pub struct Session<S> {
    store: S,
    tasks: TaskList,
}

impl<S: TaskStore> Session<S> {
    /// Load the stored task list.
    pub fn start(store: S) -> Result<Self> {
        let tasks = store
            .load()
            .map_err(Into::<anyhow::Error>::into)
            .context("failed to load saved tasks")?;
        Ok(Self { store, tasks })
    }

    #[cfg(test)]
    pub const fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Parse and apply one line, persisting when the list changed.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let command = match parse(line, self.tasks.len()) {
            Ok(command) => command,
            Err(err) => {
                debug!(input = line, error = ?err, "Rejected input");
                return Reply::say(err.to_string());
            }
        };
        debug!(?command, "Parsed command");

        let exit = command.is_exit();
        let mutating = command.is_mutating();
        let outcome = match command.apply(&mut self.tasks) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%err, "Command no longer applies");
                return Reply::say(err.to_string());
            }
        };

        let mut text = ui::render_outcome(&outcome);
        if mutating && let Err(err) = self.persist() {
            warn!("Failed to save tasks: {err:#}");
            let _ = write!(text, "\nWarning: your changes could not be saved ({err:#}).");
        }
        Reply { text, exit }
    }

    fn persist(&self) -> Result<()> {
        self.store
            .save(&self.tasks)
            .map_err(Into::<anyhow::Error>::into)
            .context("failed to save tasks")
    }

    /// Read lines from `input` until `bye` or end of input, writing replies to `output`.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
        greeting: bool,
    ) -> Result<()> {
        if greeting {
            writeln!(output, "{}", ui::GREETING)?;
            output.flush()?;
        }
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            let reply = self.handle_line(&line);
            writeln!(output, "{}", reply.text)?;
            output.flush()?;
            if reply.exit {
                return Ok(());
            }
        }
        debug!("Input closed");
        Ok(())
    }
}
