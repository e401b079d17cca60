//! Line-oriented file storage for duke task lists.

pub mod error;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use duke_core::{Task, TaskList};
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub use error::StoreError;

/// Persistence backend for the session's task list.
pub trait TaskStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<anyhow::Error>;

    /// Load the full task list.
    ///
    /// # Errors
    /// Returns an error when stored data cannot be read or decoded.
    fn load(&self) -> Result<TaskList, Self::Error>;

    /// Replace stored data with `tasks`.
    ///
    /// # Errors
    /// Returns an error when the data cannot be written.
    fn save(&self, tasks: &TaskList) -> Result<(), Self::Error>;
}

/// Storage in a plain text file, one encoded task per line.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Use the file at `path`. Nothing is touched until the first load or save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(path: &Path, source: io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl TaskStore for FileStore {
    type Error = StoreError;

    fn load(&self) -> Result<TaskList, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No data file yet, starting empty");
                return Ok(TaskList::new());
            }
            Err(err) => return Err(Self::io_error(&self.path, err)),
        };

        let mut tasks = TaskList::new();
        for (number, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let task = Task::decode(line).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                line: number + 1,
                source,
            })?;
            tasks.push(task);
        }

        info!(path = %self.path.display(), count = tasks.len(), "Loaded tasks");
        Ok(tasks)
    }

    fn save(&self, tasks: &TaskList) -> Result<(), StoreError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|err| Self::io_error(dir, err))?;

        // Write next to the target, then rename over it.
        let mut staged = NamedTempFile::new_in(dir).map_err(|err| Self::io_error(dir, err))?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            for task in tasks {
                writeln!(writer, "{}", task.encode())
                    .map_err(|err| Self::io_error(&self.path, err))?;
            }
            writer
                .flush()
                .map_err(|err| Self::io_error(&self.path, err))?;
        }
        staged
            .persist(&self.path)
            .map_err(|err| Self::io_error(&self.path, err.error))?;

        debug!(path = %self.path.display(), count = tasks.len(), "Saved tasks");
        Ok(())
    }
}
