#![allow(missing_docs)]

use anyhow::Result;
use duke_core::{Command, Outcome, Schedule, Task, TaskKind, TaskList, parse};

fn run(tasks: &mut TaskList, raw: &str) -> Result<Outcome> {
    let command = parse(raw, tasks.len())?;
    Ok(command.apply(tasks)?)
}

#[test]
fn todo_mark_list_leaves_one_done_task() -> Result<()> {
    let mut tasks = TaskList::new();

    run(&mut tasks, "todo buy milk")?;
    run(&mut tasks, "mark 1")?;
    let outcome = run(&mut tasks, "list")?;

    let Outcome::Listed(listed) = outcome else {
        panic!("list must report Listed, got {outcome:?}");
    };
    assert_eq!(listed.len(), 1);
    assert!(listed[0].is_done());
    assert_eq!(listed[0].description(), "buy milk");
    assert_eq!(listed[0].kind(), TaskKind::Todo);
    Ok(())
}

#[test]
fn failed_parse_leaves_list_untouched() -> Result<()> {
    let mut tasks = TaskList::new();
    run(&mut tasks, "todo read book")?;
    let before = tasks.clone();

    for raw in ["mark 2", "delete zero", "event party", "deadline x /by soon", "jump"] {
        assert!(parse(raw, tasks.len()).is_err(), "{raw:?} must fail");
    }
    assert_eq!(tasks, before);
    Ok(())
}

#[test]
fn delete_shifts_later_tasks_forward() -> Result<()> {
    let mut tasks = TaskList::new();
    run(&mut tasks, "todo first")?;
    run(&mut tasks, "deadline second /by 31-01-2025 23:59")?;
    run(&mut tasks, "event third /at 01-12-2024 10:00")?;

    let outcome = run(&mut tasks, "delete 2")?;
    assert!(matches!(outcome, Outcome::Deleted { remaining: 2, .. }));

    // Indices are validated against the new size.
    assert!(parse("mark 3", tasks.len()).is_err());
    assert_eq!(parse("mark 2", tasks.len())?, Command::Mark { index: 1 });
    assert_eq!(tasks.get(1).map(Task::kind), Some(TaskKind::Event));
    Ok(())
}

#[test]
fn encoded_tasks_decode_to_equal_values() -> Result<()> {
    let mut tasks = TaskList::new();
    run(&mut tasks, "todo water plants")?;
    run(&mut tasks, "deadline tax return /by 30-04-2025 17:00")?;
    run(&mut tasks, "event team dinner /at 12-12-2024 19:30")?;
    run(&mut tasks, "mark 2")?;

    let restored: TaskList = tasks
        .iter()
        .map(|task| Task::decode(&task.encode()))
        .collect::<Result<_, _>>()?;
    assert_eq!(restored, tasks);

    let Some(deadline) = restored.get(1) else {
        panic!("deadline must survive the round trip");
    };
    assert!(deadline.is_done());
    assert!(matches!(deadline.schedule(), Schedule::Deadline { .. }));
    Ok(())
}

#[test]
fn find_matches_the_query_as_typed() -> Result<()> {
    let mut tasks = TaskList::new();
    run(&mut tasks, "todo read Book")?;
    run(&mut tasks, "todo return book")?;

    let Outcome::Found(hits) = run(&mut tasks, "find book")? else {
        panic!("find must report Found");
    };
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, 1);
    Ok(())
}
