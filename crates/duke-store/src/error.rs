//! Error types for task file storage.

use std::path::PathBuf;

use duke_core::TaskError;
use thiserror::Error;

/// Errors that can occur during `FileStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the data file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// A stored line could not be decoded into a task.
    #[error("corrupt task on line {line} of {path}: {source}")]
    Corrupt {
        /// Data file being loaded.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Decoding failure.
        #[source]
        source: TaskError,
    },
}
