//! System-wide CPU and memory summary.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{ReaderError, Result};
use crate::fs::FileSystem;
use crate::reader::{read_line_bounded, write_all_retrying};

/// Maximum number of lines shown per file.
pub const MAX_LINES: usize = 10;

/// Line capacity used for the summary; longer lines are shown in pieces.
pub const SYSINFO_LINE_CAPACITY: usize = 1024;

/// Shows the first [`MAX_LINES`] lines of `<root>/cpuinfo` and `<root>/meminfo`.
///
/// The first failure aborts the report; memory information is not attempted
/// if the CPU section fails.
pub fn report_system_info<F, W>(fs: &F, root: &Path, out: &mut W) -> Result<()>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    for (file, title) in [("cpuinfo", "CPU Information"), ("meminfo", "Memory Information")] {
        writeln!(out, "\n--- {} (first {} lines) ---", title, MAX_LINES)
            .map_err(ReaderError::output)?;
        print_head(fs, &root.join(file), MAX_LINES, out)?;
    }
    Ok(())
}

/// Copies at most `max_lines` lines of `path` to `out`, terminators included.
fn print_head<F, W>(fs: &F, path: &Path, max_lines: usize, out: &mut W) -> Result<usize>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    let mut file = fs
        .open_buffered(path)
        .map_err(|e| ReaderError::open(path, e))?;

    let mut line = Vec::with_capacity(SYSINFO_LINE_CAPACITY);
    let mut shown = 0;
    while shown < max_lines {
        let n = read_line_bounded(&mut *file, &mut line, SYSINFO_LINE_CAPACITY)
            .map_err(|e| ReaderError::read(path, e))?;
        if n == 0 {
            break;
        }
        write_all_retrying(out, &line).map_err(|e| ReaderError::write(path, e))?;
        shown += 1;
    }

    file.close().map_err(|e| ReaderError::close(path, e))?;
    debug!(path = %path.display(), lines = shown, "printed file head");
    Ok(shown)
}
