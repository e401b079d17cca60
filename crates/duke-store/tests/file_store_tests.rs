#![allow(missing_docs)]

use anyhow::Result;
use duke_core::{Task, TaskList, parse_timestamp};
use duke_store::{FileStore, StoreError, TaskStore};
use std::fs;
use tempfile::TempDir;

fn sample_tasks() -> Result<TaskList> {
    let mut done = Task::todo("buy milk")?;
    done.mark();
    Ok([
        done,
        Task::deadline("Report", parse_timestamp("31-01-2025 23:59")?)?,
        Task::event("Meeting | room 4", parse_timestamp("01-12-2024 10:00")?)?,
    ]
    .into_iter()
    .collect())
}

#[test]
fn missing_file_loads_as_empty_list() -> Result<()> {
    let dir = TempDir::with_prefix("duke-store-test-")?;
    let store = FileStore::new(dir.path().join("tasks.txt"));

    let tasks = store.load()?;
    assert!(tasks.is_empty());
    Ok(())
}

#[test]
fn save_then_load_restores_the_list() -> Result<()> {
    let dir = TempDir::with_prefix("duke-store-test-")?;
    let store = FileStore::new(dir.path().join("nested").join("tasks.txt"));
    let tasks = sample_tasks()?;

    store.save(&tasks)?;
    let loaded = store.load()?;

    assert_eq!(loaded, tasks);
    Ok(())
}

#[test]
fn saved_file_is_one_task_per_line() -> Result<()> {
    let dir = TempDir::with_prefix("duke-store-test-")?;
    let path = dir.path().join("tasks.txt");
    let store = FileStore::new(&path);

    store.save(&sample_tasks()?)?;

    let contents = fs::read_to_string(&path)?;
    assert_eq!(
        contents,
        "T | 1 | buy milk\nD | 0 | Report | 31-01-2025 23:59\nE | 0 | Meeting | room 4 | 01-12-2024 10:00\n"
    );
    Ok(())
}

#[test]
fn save_overwrites_previous_contents() -> Result<()> {
    let dir = TempDir::with_prefix("duke-store-test-")?;
    let store = FileStore::new(dir.path().join("tasks.txt"));

    store.save(&sample_tasks()?)?;
    store.save(&TaskList::new())?;

    assert!(store.load()?.is_empty());
    Ok(())
}

#[test]
fn blank_lines_are_skipped() -> Result<()> {
    let dir = TempDir::with_prefix("duke-store-test-")?;
    let path = dir.path().join("tasks.txt");
    fs::write(&path, "T | 0 | one\n\n   \nT | 1 | two\n")?;

    let tasks = FileStore::new(&path).load()?;
    assert_eq!(tasks.len(), 2);
    assert!(tasks.get(1).is_some_and(Task::is_done));
    Ok(())
}

#[test]
fn corrupt_line_reports_its_number() -> Result<()> {
    let dir = TempDir::with_prefix("duke-store-test-")?;
    let path = dir.path().join("tasks.txt");
    fs::write(&path, "T | 0 | fine\nD | 0 | no date\n")?;

    let Err(err) = FileStore::new(&path).load() else {
        panic!("corrupt data must not load");
    };
    assert!(matches!(err, StoreError::Corrupt { line: 2, .. }));
    assert!(err.to_string().contains("line 2"));
    Ok(())
}
