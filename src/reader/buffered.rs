//! Line-by-line copy through a buffered reader.

use std::io::Write;
use std::path::Path;

use tracing::trace;

use super::{LINE_CAPACITY, read_line_bounded, write_all_retrying};
use crate::error::{ReaderError, Result};
use crate::fs::FileSystem;

/// Copies `path` to `out` one line at a time.
///
/// Lines are written verbatim, terminator included. No byte rewriting is
/// done, so this is not meant for NUL-separated files.
pub fn dump_buffered<F, W>(fs: &F, path: &Path, out: &mut W) -> Result<()>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    let mut file = fs
        .open_buffered(path)
        .map_err(|e| ReaderError::open(path, e))?;

    let mut line = Vec::with_capacity(LINE_CAPACITY);
    let mut lines = 0usize;
    while read_line_bounded(&mut *file, &mut line, LINE_CAPACITY)
        .map_err(|e| ReaderError::read(path, e))?
        > 0
    {
        write_all_retrying(out, &line).map_err(|e| ReaderError::write(path, e))?;
        lines += 1;
    }
    out.flush().map_err(|e| ReaderError::write(path, e))?;

    file.close().map_err(|e| ReaderError::close(path, e))?;
    trace!(path = %path.display(), lines, "buffered dump complete");
    Ok(())
}
