//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait hands out scoped handles for the three ways this
//! crate touches `/proc`: unbuffered descriptor reads, buffered line reads and
//! directory enumeration. Every handle releases its resource when dropped and
//! also offers an explicit `close` that reports the OS error, so callers can
//! close deliberately on the success path and still never leak on early
//! returns.
//!
//! ```text
//!                ┌─────────────┐
//!                │  FileSystem │ (trait)
//!                └──────┬──────┘
//!            ┌──────────┴──────────┐
//!     ┌──────▼──────┐       ┌──────▼──────┐
//!     │   RealFs    │       │   MockFs    │
//!     │ (POSIX)     │       │ (Testing)   │
//!     └─────────────┘       └─────────────┘
//! ```

use std::ffi::OsString;
use std::io::{self, BufRead, Read};
use std::path::Path;

pub mod mock;
#[cfg(unix)]
mod real;

pub use mock::MockFs;
#[cfg(unix)]
pub use real::{RawStdout, RealFs};

/// A file opened for unbuffered reads.
///
/// Each `read` call maps to a single read on the underlying descriptor.
pub trait RawFile: Read {
    /// Releases the descriptor, reporting any error from the close call.
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// A file opened through a buffered, line-oriented reader.
pub trait LineFile: BufRead {
    /// Releases the underlying file, reporting any error from the close call.
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// An open directory yielding entry names in filesystem order.
pub trait DirStream: Iterator<Item = io::Result<OsString>> {
    /// Releases the directory handle, reporting any error from the close call.
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// Abstraction for filesystem operations.
///
/// This trait allows the readers to work against the real `/proc` or against
/// an in-memory implementation for testing purposes.
pub trait FileSystem {
    /// Opens a file read-only for unbuffered reads.
    fn open_raw(&self, path: &Path) -> io::Result<Box<dyn RawFile + '_>>;

    /// Opens a file read-only behind a buffered reader.
    fn open_buffered(&self, path: &Path) -> io::Result<Box<dyn LineFile + '_>>;

    /// Opens a directory for enumeration.
    fn open_dir(&self, path: &Path) -> io::Result<Box<dyn DirStream + '_>>;
}
