//! Error types for reading `/proc` files.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Errors that can occur while dumping or reporting `/proc` files.
///
/// Every variant that touches the filesystem carries the path it was working
/// on and the underlying OS error.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// A file or directory could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A read from an open handle failed.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Copying the contents of `path` to the output failed.
    #[error("failed to write contents of {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a header or summary line to the output failed.
    #[error("failed to write output: {source}")]
    Output {
        #[source]
        source: io::Error,
    },

    /// Releasing a handle failed after it was otherwise used successfully.
    #[error("failed to close {}: {source}", .path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A formatted path does not fit in the path buffer.
    #[error(
        "failed to build path {}: {path_len} bytes, capacity is {capacity}",
        .path.display()
    )]
    PathTooLong {
        path: PathBuf,
        path_len: usize,
        capacity: usize,
    },
}

impl ReaderError {
    pub(crate) fn open(path: &Path, source: io::Error) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            source,
        }
        .logged()
    }

    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
        .logged()
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
        .logged()
    }

    pub(crate) fn output(source: io::Error) -> Self {
        Self::Output { source }.logged()
    }

    pub(crate) fn path_too_long(path: PathBuf, capacity: usize) -> Self {
        Self::PathTooLong {
            path_len: path.as_os_str().len(),
            path,
            capacity,
        }
        .logged()
    }

    pub(crate) fn close(path: &Path, source: io::Error) -> Self {
        Self::Close {
            path: path.to_path_buf(),
            source,
        }
        .logged()
    }

    /// Returns the path involved in the failure, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Open { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Close { path, .. }
            | Self::PathTooLong { path, .. } => Some(path),
            Self::Output { .. } => None,
        }
    }

    /// Emits the error on the diagnostics channel at the point of detection.
    fn logged(self) -> Self {
        tracing::error!("{}", self);
        self
    }
}
