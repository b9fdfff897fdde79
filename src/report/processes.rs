//! Listing of process directories under `/proc`.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{ReaderError, Result};
use crate::fs::FileSystem;
use crate::reader::is_number;

/// Prints one row per numeric entry of `root` and returns how many there were.
///
/// Entries are reported in the order the filesystem yields them. Anything
/// that is not a process id (`self`, `net`, `cpuinfo`, ...) is skipped.
pub fn list_process_directories<F, W>(fs: &F, root: &Path, out: &mut W) -> Result<usize>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    let mut dir = fs
        .open_dir(root)
        .map_err(|e| ReaderError::open(root, e))?;

    writeln!(out, "Process directories in {}:", root.display()).map_err(ReaderError::output)?;
    writeln!(out, "{:<8} {:<20}", "PID", "Type").map_err(ReaderError::output)?;
    writeln!(out, "{:<8} {:<20}", "---", "----").map_err(ReaderError::output)?;

    let mut count = 0usize;
    let mut skipped = 0usize;
    for entry in dir.by_ref() {
        let name = entry.map_err(|e| ReaderError::read(root, e))?;
        match name.to_str() {
            Some(pid) if is_number(pid) => {
                writeln!(out, "{:<8} {:<20}", pid, "process").map_err(ReaderError::output)?;
                count += 1;
            }
            _ => skipped += 1,
        }
    }

    dir.close().map_err(|e| ReaderError::close(root, e))?;
    debug!(root = %root.display(), count, skipped, "listed process directories");

    writeln!(out, "\nTotal process directories found: {}", count).map_err(ReaderError::output)?;
    Ok(count)
}
