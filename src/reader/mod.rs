//! Low-level helpers shared by the file dumpers and reports.
//!
//! Two ways of copying a file to an output sink live here:
//! - [`dump_raw`] reads fixed-size chunks from an unbuffered descriptor
//! - [`dump_buffered`] reads line by line through a buffered reader
//!
//! For ordinary text files both produce byte-identical output.

mod buffered;
mod raw;

pub use buffered::dump_buffered;
pub use raw::dump_raw;

use std::io::{self, BufRead, Write};

/// Size of a single read from an unbuffered descriptor.
pub const CHUNK_SIZE: usize = 4096;

/// Line capacity used when copying a whole file line by line.
pub const LINE_CAPACITY: usize = 4096;

/// Returns `true` if `token` is non-empty and made only of ASCII decimal digits.
///
/// Accepts either a `&str` or an `Option<&str>`; `None` is never a number.
///
/// ```
/// use procpeek::reader::is_number;
///
/// assert!(is_number("123"));
/// assert!(!is_number("12a"));
/// assert!(!is_number(""));
/// assert!(!is_number(None::<&str>));
/// ```
pub fn is_number<'a>(token: impl Into<Option<&'a str>>) -> bool {
    token
        .into()
        .is_some_and(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
}

/// Writes the whole of `buf`, retrying the unwritten tail after short writes.
///
/// A write that accepts zero bytes is reported as `WriteZero`.
pub fn write_all_retrying<W: Write + ?Sized>(out: &mut W, mut buf: &[u8]) -> io::Result<()> {
    while !buf.is_empty() {
        match out.write(buf) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "output accepted zero bytes",
                ));
            }
            Ok(n) => buf = &buf[n..],
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Reads one line into `buf`, keeping at most `capacity - 1` bytes.
///
/// Stops after a newline (which is kept), at end of file, or when the
/// capacity is reached; in the last case the rest of the line is returned by
/// the next call. Returns the number of bytes read, `0` at end of file.
pub fn read_line_bounded<R: BufRead + ?Sized>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    capacity: usize,
) -> io::Result<usize> {
    buf.clear();
    let limit = capacity.saturating_sub(1);

    while buf.len() < limit {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }

        let take = available.len().min(limit - buf.len());
        let chunk = &available[..take];
        if let Some(newline) = chunk.iter().position(|&b| b == b'\n') {
            buf.extend_from_slice(&chunk[..=newline]);
            reader.consume(newline + 1);
            break;
        }
        buf.extend_from_slice(chunk);
        reader.consume(take);
    }

    Ok(buf.len())
}
