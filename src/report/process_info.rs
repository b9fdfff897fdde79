//! Per-process report: `status` followed by `cmdline`.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::proc_file_path;
use crate::error::{ReaderError, Result};
use crate::fs::FileSystem;
use crate::reader::dump_raw;

/// Dumps `<root>/<pid>/status` and then `<root>/<pid>/cmdline` to `out`.
///
/// `pid` is not validated; a bogus id surfaces as [`ReaderError::Open`].
/// Each path is length-checked immediately before its own dump, so an
/// oversized `cmdline` path fails only after `status` has been printed. The
/// command line is not attempted if the status file fails.
pub fn report_process_info<F, W>(fs: &F, root: &Path, pid: &str, out: &mut W) -> Result<()>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    writeln!(out, "\n--- Process Information for PID {} ---", pid).map_err(ReaderError::output)?;

    let status = proc_file_path(root, pid, "status")?;
    dump_file(fs, &status, out)?;

    let cmdline = proc_file_path(root, pid, "cmdline")?;
    writeln!(out, "\n--- Command Line ---").map_err(ReaderError::output)?;
    dump_file(fs, &cmdline, out)?;

    writeln!(out).map_err(ReaderError::output)?;
    Ok(())
}

fn dump_file<F, W>(fs: &F, path: &Path, out: &mut W) -> Result<()>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    dump_raw(fs, path, out).inspect_err(|_| {
        debug!(path = %path.display(), "process report stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFs;
    use crate::report::PATH_CAPACITY;

    #[test]
    fn test_reports_status_and_cmdline() {
        let fs = MockFs::typical_system();
        let mut out = Vec::new();

        report_process_info(&fs, Path::new("/proc"), "42", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\n--- Process Information for PID 42 ---\nName:\tbash\n"));
        assert!(text.ends_with("Threads:\t1\n\n--- Command Line ---\n-bash --login \n"));
        assert!(!text.contains('\0'));
        assert_eq!(
            fs.attempted_opens(),
            vec![
                Path::new("/proc/42/status").to_path_buf(),
                Path::new("/proc/42/cmdline").to_path_buf(),
            ]
        );
        assert_eq!((fs.open_count(), fs.close_count()), (2, 2));
    }

    #[test]
    fn test_missing_process_stops_after_status() {
        let fs = MockFs::typical_system();
        let mut out = Vec::new();

        let err = report_process_info(&fs, Path::new("/proc"), "31337", &mut out).unwrap_err();

        assert!(matches!(err, ReaderError::Open { .. }));
        assert_eq!(err.path(), Some(Path::new("/proc/31337/status")));
        assert_eq!(fs.attempted_opens().len(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Command Line"));
    }

    #[test]
    fn test_unreadable_cmdline() {
        let mut fs = MockFs::typical_system();
        fs.fail_open("/proc/1/cmdline");
        let mut out = Vec::new();

        let err = report_process_info(&fs, Path::new("/proc"), "1", &mut out).unwrap_err();

        assert_eq!(err.path(), Some(Path::new("/proc/1/cmdline")));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Name:\tsystemd\n"));
        assert!(text.ends_with("--- Command Line ---\n"));
        assert_eq!(fs.open_count(), fs.close_count());
    }

    #[test]
    fn test_path_too_long_before_any_open() {
        let fs = MockFs::typical_system();
        let pid = "1".repeat(PATH_CAPACITY);
        let mut out = Vec::new();

        let err = report_process_info(&fs, Path::new("/proc"), &pid, &mut out).unwrap_err();

        assert!(matches!(err, ReaderError::PathTooLong { .. }));
        let expected = format!("/proc/{}/status", pid);
        assert_eq!(err.path(), Some(Path::new(&expected)));
        assert!(fs.attempted_opens().is_empty());
    }

    #[test]
    fn test_cmdline_path_too_long_after_status() {
        // Long enough for "status" to fit but not "cmdline".
        let root = format!("/{}", "p".repeat(PATH_CAPACITY - 11));
        let proc_dir = Path::new(&root).join("7");
        let mut fs = MockFs::new();
        fs.add_file(proc_dir.join("status"), "Name:\tx\n");
        let mut out = Vec::new();

        let err = report_process_info(&fs, Path::new(&root), "7", &mut out).unwrap_err();

        assert!(matches!(err, ReaderError::PathTooLong { .. }));
        assert_eq!(err.path(), Some(proc_dir.join("cmdline").as_path()));
        assert_eq!(fs.attempted_opens(), vec![proc_dir.join("status")]);
        assert!(out.ends_with(b"Name:\tx\n"));
    }
}
