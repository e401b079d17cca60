use std::fmt::Write as _;

use duke_core::{Outcome, Task};

pub const GREETING: &str = "Hello! I'm Duke\nWhat can I do for you?";
pub const FAREWELL: &str = "Bye. Hope to see you again soon!";

fn numbered<'a>(header: &str, rows: impl Iterator<Item = (usize, &'a Task)>) -> String {
    let mut text = header.to_owned();
    for (index, task) in rows {
        let _ = write!(text, "\n{}.{task}", index + 1);
    }
    text
}

fn count(total: usize) -> String {
    let noun = if total == 1 { "task" } else { "tasks" };
    format!("Now you have {total} {noun} in the list.")
}

/// Text shown to the user for an applied command.
pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Listed(tasks) if tasks.is_empty() => "Your task list is empty.".to_owned(),
        Outcome::Listed(tasks) => numbered(
            "Here are the tasks in your list:",
            tasks.iter().enumerate(),
        ),
        Outcome::Found(hits) if hits.is_empty() => "No matching tasks found.".to_owned(),
        Outcome::Found(hits) => numbered(
            "Here are the matching tasks in your list:",
            hits.iter().map(|(index, task)| (*index, task)),
        ),
        Outcome::Marked(task) => format!("Nice! I've marked this task as done:\n  {task}"),
        Outcome::Unmarked(task) => format!("OK, I've marked this task as not done yet:\n  {task}"),
        Outcome::Deleted { task, remaining } => {
            format!("Noted. I've removed this task:\n  {task}\n{}", count(*remaining))
        }
        Outcome::Added { task, total } => {
            format!("Got it. I've added this task:\n  {task}\n{}", count(*total))
        }
        Outcome::Exit => FAREWELL.to_owned(),
    }
}
