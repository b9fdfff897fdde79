//! Real filesystem implementation backed by POSIX calls.
//!
//! Raw files go straight through open(2)/read(2)/close(2). Buffered files use
//! `std::fs::File` behind a `BufReader`, which is what the comparison between
//! the two reading methods is about. Directories use opendir(3)/readdir(3) so
//! that a failing closedir(3) can be reported.

use std::ffi::{CStr, CString, OsStr, OsString};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::os::fd::{AsRawFd, FromRawFd, IntoRawFd, OwnedFd};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr::NonNull;

use super::{DirStream, FileSystem, LineFile, RawFile};

/// Real filesystem implementation.
///
/// Use this in production to read from the actual `/proc` filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn open_raw(&self, path: &Path) -> io::Result<Box<dyn RawFile + '_>> {
        let c_path = c_path(path)?;
        // SAFETY: `c_path` is a valid NUL-terminated string for the duration of the call.
        let fd = unsafe { libc::open(c_path.as_ptr(), libc::O_RDONLY | libc::O_CLOEXEC) };
        if fd == -1 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: open(2) succeeded, so `fd` is a fresh descriptor nobody else owns.
        let fd = unsafe { OwnedFd::from_raw_fd(fd) };
        Ok(Box::new(FdFile { fd }))
    }

    fn open_buffered(&self, path: &Path) -> io::Result<Box<dyn LineFile + '_>> {
        let file = File::open(path)?;
        Ok(Box::new(BufferedFile {
            reader: BufReader::new(file),
        }))
    }

    fn open_dir(&self, path: &Path) -> io::Result<Box<dyn DirStream + '_>> {
        let c_path = c_path(path)?;
        // SAFETY: `c_path` is a valid NUL-terminated string for the duration of the call.
        let dir = unsafe { libc::opendir(c_path.as_ptr()) };
        match NonNull::new(dir) {
            Some(dir) => Ok(Box::new(Dir {
                dir: Some(dir),
                done: false,
            })),
            None => Err(io::Error::last_os_error()),
        }
    }
}

fn c_path(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "path contains an interior NUL byte",
        )
    })
}

/// Closes `fd` and reports the result of close(2), which dropping an `OwnedFd` discards.
fn close_fd(fd: OwnedFd) -> io::Result<()> {
    let raw = fd.into_raw_fd();
    // SAFETY: `raw` was released from an `OwnedFd`; it is closed exactly once here.
    if unsafe { libc::close(raw) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

struct FdFile {
    fd: OwnedFd,
}

impl Read for FdFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // SAFETY: `buf` is valid for writes of `buf.len()` bytes.
        let n = unsafe { libc::read(self.fd.as_raw_fd(), buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(n as usize)
    }
}

impl RawFile for FdFile {
    fn close(self: Box<Self>) -> io::Result<()> {
        close_fd(self.fd)
    }
}

struct BufferedFile {
    reader: BufReader<File>,
}

impl Read for BufferedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for BufferedFile {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

impl LineFile for BufferedFile {
    fn close(self: Box<Self>) -> io::Result<()> {
        close_fd(OwnedFd::from(self.reader.into_inner()))
    }
}

struct Dir {
    dir: Option<NonNull<libc::DIR>>,
    done: bool,
}

impl Iterator for Dir {
    type Item = io::Result<OsString>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let dir = self.dir?;

        // readdir(3) reports errors only through errno, so clear it first.
        clear_errno();
        // SAFETY: `dir` came from a successful opendir(3) and is not closed yet.
        let entry = unsafe { libc::readdir(dir.as_ptr()) };
        if entry.is_null() {
            self.done = true;
            let err = io::Error::last_os_error();
            return match err.raw_os_error() {
                Some(0) | None => None,
                Some(_) => Some(Err(err)),
            };
        }

        // SAFETY: d_name is NUL-terminated and stays valid until the next readdir call.
        let name = unsafe { CStr::from_ptr((*entry).d_name.as_ptr()) };
        Some(Ok(OsStr::from_bytes(name.to_bytes()).to_os_string()))
    }
}

fn clear_errno() {
    // SAFETY: the errno accessor always returns a valid pointer to this thread's errno.
    unsafe { *errno_location() = 0 };
}

#[cfg(any(
    target_os = "linux",
    target_os = "emscripten",
    target_os = "fuchsia",
    target_os = "redox",
    target_os = "hurd"
))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__errno_location() }
}

#[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__errno() }
}

#[cfg(any(target_vendor = "apple", target_os = "freebsd", target_os = "dragonfly"))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__error() }
}

#[cfg(any(target_os = "illumos", target_os = "solaris"))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::___errno() }
}

impl DirStream for Dir {
    fn close(mut self: Box<Self>) -> io::Result<()> {
        if let Some(dir) = self.dir.take() {
            // SAFETY: `dir` is open and is taken out of `self`, so it is closed only once.
            if unsafe { libc::closedir(dir.as_ptr()) } == -1 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }
}

impl Drop for Dir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            // SAFETY: see `close`.
            unsafe { libc::closedir(dir.as_ptr()) };
        }
    }
}

/// Standard output written with write(2) directly, without any buffering.
///
/// A single `write` may transfer fewer bytes than requested; callers that
/// need the whole buffer delivered loop over the remainder.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawStdout;

impl RawStdout {
    pub fn new() -> Self {
        Self
    }
}

impl Write for RawStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // SAFETY: `buf` is valid for reads of `buf.len()` bytes.
        let n = unsafe { libc::write(libc::STDOUT_FILENO, buf.as_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(n as usize)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
