//! In-memory mock filesystem for testing readers without real `/proc`.
//!
//! `MockFs` simulates a filesystem in memory, counts every handle it hands out
//! and every handle released, and can be told to fail opens, reads or closes
//! on specific paths.

use crate::fs::{DirStream, FileSystem, LineFile, RawFile};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::ffi::OsString;
use std::io::{self, BufRead, Cursor, Read};
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
///
/// Stores files and directories in memory, allowing tests to simulate
/// various `/proc` filesystem states without needing actual Linux access.
#[derive(Debug, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: BTreeMap<PathBuf, Vec<u8>>,
    /// Set of directories (for open_dir support).
    directories: BTreeSet<PathBuf>,
    failing_opens: HashSet<PathBuf>,
    /// Path -> offset (bytes, or entries for directories) at which reads fail.
    failing_reads: HashMap<PathBuf, usize>,
    failing_closes: HashSet<PathBuf>,
    opened: Cell<usize>,
    closed: Cell<usize>,
    attempts: RefCell<Vec<PathBuf>>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path, content.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.directories.insert(path);
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }

    /// Adds a process with its `status` and `cmdline` files under `/proc/[pid]/`.
    ///
    /// `cmdline` should separate arguments with NUL bytes, as the kernel does.
    pub fn add_process(&mut self, pid: u32, status: &str, cmdline: &[u8]) {
        let base = PathBuf::from(format!("/proc/{}", pid));
        self.add_dir(&base);
        self.add_file(base.join("status"), status);
        self.add_file(base.join("cmdline"), cmdline);
    }

    /// Makes every open of `path` fail with `PermissionDenied`.
    pub fn fail_open(&mut self, path: impl AsRef<Path>) {
        self.failing_opens.insert(path.as_ref().to_path_buf());
    }

    /// Makes reads of `path` fail once `offset` bytes have been delivered.
    ///
    /// An `offset` at or past the end of the file fails the read that would
    /// otherwise report end of file.
    ///
    /// For a directory, `offset` counts entries instead of bytes.
    pub fn fail_read_after(&mut self, path: impl AsRef<Path>, offset: usize) {
        self.failing_reads.insert(path.as_ref().to_path_buf(), offset);
    }

    /// Makes the explicit close of `path` report an error.
    ///
    /// The handle is still released, as with close(2).
    pub fn fail_close(&mut self, path: impl AsRef<Path>) {
        self.failing_closes.insert(path.as_ref().to_path_buf());
    }

    /// Number of handles successfully opened so far.
    pub fn open_count(&self) -> usize {
        self.opened.get()
    }

    /// Number of handles released so far, explicitly or by drop.
    pub fn close_count(&self) -> usize {
        self.closed.get()
    }

    /// Every path an open was attempted on, in order, including failed ones.
    pub fn attempted_opens(&self) -> Vec<PathBuf> {
        self.attempts.borrow().clone()
    }

    /// Loads a mock filesystem from a directory tree, mounting it at `mount`.
    ///
    /// This is useful for comparing mock and real runs over the same fixture.
    pub fn from_dir(dir: &Path, mount: impl AsRef<Path>) -> io::Result<Self> {
        let mut fs = Self::new();
        load_directory_recursive(&mut fs, dir, mount.as_ref())?;
        Ok(fs)
    }

    fn begin_open(&self, path: &Path) -> io::Result<()> {
        self.attempts.borrow_mut().push(path.to_path_buf());
        if self.failing_opens.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {:?}", path),
            ));
        }
        Ok(())
    }

    fn open_file(&self, path: &Path) -> io::Result<MockFile<'_>> {
        self.begin_open(path)?;
        if self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {:?}", path),
            ));
        }
        let data = self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })?;

        self.opened.set(self.opened.get() + 1);
        Ok(MockFile {
            handle: Handle::new(self, path),
            data: Cursor::new(data),
        })
    }

    fn children(&self, path: &Path) -> Vec<OsString> {
        let mut names = BTreeSet::new();
        let file_paths = self.files.keys();
        let dir_paths = self.directories.iter().filter(|d| d.as_path() != path);
        for child in file_paths.chain(dir_paths) {
            if child.parent().is_some_and(|parent| parent == path) {
                if let Some(name) = child.file_name() {
                    names.insert(name.to_os_string());
                }
            }
        }
        names.into_iter().collect()
    }
}

fn load_directory_recursive(
    fs: &mut MockFs,
    real_path: &Path,
    virtual_path: &Path,
) -> io::Result<()> {
    fs.add_dir(virtual_path);

    for entry in std::fs::read_dir(real_path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let real_child = entry.path();
        let virtual_child = virtual_path.join(entry.file_name());

        if file_type.is_dir() {
            load_directory_recursive(fs, &real_child, &virtual_child)?;
        } else if file_type.is_file() {
            fs.add_file(&virtual_child, std::fs::read(&real_child)?);
        }
    }
    Ok(())
}

impl FileSystem for MockFs {
    fn open_raw(&self, path: &Path) -> io::Result<Box<dyn RawFile + '_>> {
        Ok(Box::new(self.open_file(path)?))
    }

    fn open_buffered(&self, path: &Path) -> io::Result<Box<dyn LineFile + '_>> {
        Ok(Box::new(self.open_file(path)?))
    }

    fn open_dir(&self, path: &Path) -> io::Result<Box<dyn DirStream + '_>> {
        self.begin_open(path)?;
        if !self.directories.contains(path) {
            let kind = if self.files.contains_key(path) {
                io::ErrorKind::NotADirectory
            } else {
                io::ErrorKind::NotFound
            };
            return Err(io::Error::new(
                kind,
                format!("directory not found: {:?}", path),
            ));
        }

        self.opened.set(self.opened.get() + 1);
        Ok(Box::new(MockDir {
            handle: Handle::new(self, path),
            names: self.children(path).into_iter(),
            yielded: 0,
        }))
    }
}

/// Bookkeeping shared by mock files and directories.
struct Handle<'a> {
    fs: &'a MockFs,
    path: PathBuf,
    fail_read_at: Option<usize>,
    released: bool,
}

impl<'a> Handle<'a> {
    fn new(fs: &'a MockFs, path: &Path) -> Self {
        Self {
            fs,
            path: path.to_path_buf(),
            fail_read_at: fs.failing_reads.get(path).copied(),
            released: false,
        }
    }

    fn read_failure(&self) -> io::Error {
        io::Error::other(format!("injected read failure: {:?}", self.path))
    }

    fn release(&mut self) -> io::Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.fs.closed.set(self.fs.closed.get() + 1);
        if self.fs.failing_closes.contains(&self.path) {
            return Err(io::Error::other(format!(
                "injected close failure: {:?}",
                self.path
            )));
        }
        Ok(())
    }
}

impl Drop for Handle<'_> {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

struct MockFile<'a> {
    handle: Handle<'a>,
    data: Cursor<Vec<u8>>,
}

impl BufRead for MockFile<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        let pos = self.data.position() as usize;
        let len = self.data.get_ref().len();
        let end = match self.handle.fail_read_at {
            Some(at) if pos >= at => return Err(self.handle.read_failure()),
            Some(at) => at.min(len),
            None => len,
        };
        Ok(&self.data.get_ref()[pos.min(end)..end])
    }

    fn consume(&mut self, amt: usize) {
        self.data.consume(amt)
    }
}

impl Read for MockFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl RawFile for MockFile<'_> {
    fn close(mut self: Box<Self>) -> io::Result<()> {
        self.handle.release()
    }
}

impl LineFile for MockFile<'_> {
    fn close(mut self: Box<Self>) -> io::Result<()> {
        self.handle.release()
    }
}

struct MockDir<'a> {
    handle: Handle<'a>,
    names: std::vec::IntoIter<OsString>,
    yielded: usize,
}

impl Iterator for MockDir<'_> {
    type Item = io::Result<OsString>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.handle.fail_read_at == Some(self.yielded) {
            self.handle.fail_read_at = None;
            return Some(Err(self.handle.read_failure()));
        }
        let name = self.names.next()?;
        self.yielded += 1;
        Some(Ok(name))
    }
}

impl DirStream for MockDir<'_> {
    fn close(mut self: Box<Self>) -> io::Result<()> {
        self.handle.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(fs: &MockFs, path: &str) -> Vec<String> {
        let mut dir = fs.open_dir(Path::new(path)).unwrap();
        let names = dir
            .by_ref()
            .map(|n| n.unwrap().into_string().unwrap())
            .collect();
        dir.close().unwrap();
        names
    }

    #[test]
    fn test_mock_fs_add_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemTotal: 16384 kB\n");

        let mut file = fs.open_raw(Path::new("/proc/meminfo")).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        file.close().unwrap();

        assert_eq!(content, "MemTotal: 16384 kB\n");
        assert_eq!(names(&fs, "/"), vec!["proc"]);
    }

    #[test]
    fn test_mock_fs_open_dir() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/1/status", "status content");
        fs.add_file("/proc/1/cmdline", "init");
        fs.add_file("/proc/2/status", "status content 2");
        fs.add_dir("/proc/self");

        assert_eq!(names(&fs, "/proc"), vec!["1", "2", "self"]);
        assert_eq!(names(&fs, "/proc/1"), vec!["cmdline", "status"]);
    }

    #[test]
    fn test_mock_fs_add_process() {
        let mut fs = MockFs::new();
        fs.add_process(42, "Name:\tbash\n", b"bash\0-l\0");

        let mut file = fs.open_raw(Path::new("/proc/42/cmdline")).unwrap();
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"bash\0-l\0");
    }

    #[test]
    fn test_mock_fs_missing_paths() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/version", "Linux\n");

        let err = fs.open_raw(Path::new("/proc/nope")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let err = fs.open_buffered(Path::new("/proc")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::IsADirectory);

        let err = fs.open_dir(Path::new("/proc/version")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotADirectory);

        assert_eq!(fs.open_count(), 0);
        assert_eq!(fs.attempted_opens().len(), 3);
    }

    #[test]
    fn test_handles_counted_on_close_and_drop() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/version", "Linux\n");
        let path = Path::new("/proc/version");

        let file = fs.open_raw(path).unwrap();
        file.close().unwrap();
        assert_eq!((fs.open_count(), fs.close_count()), (1, 1));

        {
            let _file = fs.open_buffered(path).unwrap();
            let _dir = fs.open_dir(Path::new("/proc")).unwrap();
            assert_eq!((fs.open_count(), fs.close_count()), (3, 1));
        }
        assert_eq!((fs.open_count(), fs.close_count()), (3, 3));
    }

    #[test]
    fn test_injected_failures() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/version", "Linux version 6.1\n");
        fs.add_file("/proc/cpuinfo", "processor\t: 0\n");
        fs.add_file("/proc/meminfo", "MemTotal: 1 kB\n");
        fs.fail_open("/proc/cpuinfo");
        fs.fail_read_after("/proc/version", 5);
        fs.fail_close("/proc/meminfo");

        let err = fs.open_raw(Path::new("/proc/cpuinfo")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);

        let mut file = fs.open_raw(Path::new("/proc/version")).unwrap();
        let mut buf = [0u8; 64];
        assert_eq!(file.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf[..5], b"Linux");
        assert!(file.read(&mut buf).is_err());
        file.close().unwrap();

        let file = fs.open_raw(Path::new("/proc/meminfo")).unwrap();
        assert!(file.close().is_err());
        assert_eq!(fs.open_count(), fs.close_count());
    }

    #[test]
    fn test_injected_read_failure_at_eof() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/3/cmdline", "");
        fs.add_file("/proc/version", "Linux\n");
        fs.fail_read_after("/proc/3/cmdline", 0);
        fs.fail_read_after("/proc/version", 6);

        let mut buf = [0u8; 16];
        let mut file = fs.open_raw(Path::new("/proc/3/cmdline")).unwrap();
        assert!(file.read(&mut buf).is_err());

        let mut file = fs.open_buffered(Path::new("/proc/version")).unwrap();
        let mut line = String::new();
        assert_eq!(file.read_line(&mut line).unwrap(), 6);
        assert!(file.read_line(&mut line).is_err());
    }

    #[test]
    fn test_injected_dir_read_failure() {
        let mut fs = MockFs::new();
        fs.add_dir("/proc/1");
        fs.add_dir("/proc/2");
        fs.fail_read_after("/proc", 1);

        let mut dir = fs.open_dir(Path::new("/proc")).unwrap();
        assert_eq!(dir.next().unwrap().unwrap(), "1");
        assert!(dir.next().unwrap().is_err());
        drop(dir);
        assert_eq!(fs.close_count(), 1);
    }
}
