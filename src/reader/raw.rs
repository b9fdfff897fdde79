//! Chunked copy through an unbuffered file descriptor.

use std::io::{self, Read, Write};
use std::path::Path;

use tracing::trace;

use super::{CHUNK_SIZE, write_all_retrying};
use crate::error::{ReaderError, Result};
use crate::fs::FileSystem;

/// Copies `path` to `out` in [`CHUNK_SIZE`] reads, one write-all per chunk.
///
/// Every NUL byte is written as a space. `/proc/[pid]/cmdline` separates
/// arguments with NULs, and a separator can land in any chunk, so the
/// rewrite applies to every chunk read.
///
/// The descriptor is released on every path. A failing close after an
/// otherwise clean copy is reported as [`ReaderError::Close`]; output already
/// written stays written.
pub fn dump_raw<F, W>(fs: &F, path: &Path, out: &mut W) -> Result<()>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    let mut file = fs
        .open_raw(path)
        .map_err(|e| ReaderError::open(path, e))?;

    let mut chunk = [0u8; CHUNK_SIZE];
    let mut total = 0usize;
    loop {
        let n = match file.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReaderError::read(path, e)),
        };

        replace_nuls_with_spaces(&mut chunk[..n]);
        write_all_retrying(out, &chunk[..n]).map_err(|e| ReaderError::write(path, e))?;
        total += n;
    }

    file.close().map_err(|e| ReaderError::close(path, e))?;
    trace!(path = %path.display(), bytes = total, "raw dump complete");
    Ok(())
}

fn replace_nuls_with_spaces(buf: &mut [u8]) {
    for b in buf.iter_mut().filter(|b| **b == 0) {
        *b = b' ';
    }
}
