//! procpeek - inspect processes and system information through `/proc`.
//!
//! This library provides the pieces used by the `procpeek` binary:
//! - `fs` — filesystem abstraction with real (Linux) and mock implementations
//! - `reader` — raw and buffered file dumpers and their helpers
//! - `report` — process listing, per-process info, system info, method comparison
//! - `error` — error type shared by all of the above

pub mod error;
pub mod fs;
pub mod reader;
pub mod report;

pub use error::{ReaderError, Result};
