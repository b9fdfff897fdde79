//! Human-readable reports over the `/proc` filesystem.
//!
//! Each report writes to an injected output sink and reads through an
//! injected [`FileSystem`](crate::fs::FileSystem), so the same code runs
//! against the real `/proc` and against [`MockFs`](crate::fs::MockFs).

mod compare;
mod process_info;
mod processes;
mod system;

pub use compare::compare_file_methods;
pub use process_info::report_process_info;
pub use processes::list_process_directories;
pub use system::{MAX_LINES, SYSINFO_LINE_CAPACITY, report_system_info};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{ReaderError, Result};

/// Default mount point of the process-information filesystem.
pub const DEFAULT_PROC_PATH: &str = "/proc";

/// Capacity of a path buffer, terminator included.
///
/// A formatted path must be strictly shorter than this.
pub const PATH_CAPACITY: usize = 256;

/// Builds `<root>/<pid>/<file>`, failing before any I/O if it does not fit.
pub fn proc_file_path(root: &Path, pid: &str, file: &str) -> Result<PathBuf> {
    let mut path = OsString::with_capacity(PATH_CAPACITY);
    path.push(root.as_os_str());
    path.push("/");
    path.push(pid);
    path.push("/");
    path.push(file);

    let path = PathBuf::from(path);
    if path.as_os_str().len() >= PATH_CAPACITY {
        return Err(ReaderError::path_too_long(path, PATH_CAPACITY));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proc_file_path() {
        let path = proc_file_path(Path::new("/proc"), "42", "status").unwrap();
        assert_eq!(path, Path::new("/proc/42/status"));
    }

    #[test]
    fn test_proc_file_path_capacity_boundary() {
        // "/proc/" + pid + "/status" is 13 bytes plus the pid
        let fits = "9".repeat(PATH_CAPACITY - 14);
        let path = proc_file_path(Path::new("/proc"), &fits, "status").unwrap();
        assert_eq!(path.as_os_str().len(), PATH_CAPACITY - 1);

        let too_long = "9".repeat(PATH_CAPACITY - 13);
        let err = proc_file_path(Path::new("/proc"), &too_long, "status").unwrap_err();
        assert!(matches!(
            err,
            ReaderError::PathTooLong {
                path_len: PATH_CAPACITY,
                capacity: PATH_CAPACITY,
                ..
            }
        ));
        let expected = format!("/proc/{}/status", too_long);
        assert_eq!(err.path(), Some(Path::new(&expected)));
        assert!(err.to_string().contains(&expected));
    }
}
