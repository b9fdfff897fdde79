//! Side-by-side demonstration of the two file reading methods.

use std::fmt;
use std::io::Write;
use std::path::Path;

use tracing::{debug, warn};

use crate::fs::FileSystem;
use crate::reader::{dump_buffered, dump_raw};

/// Dumps `<root>/version` with [`dump_raw`] and then with [`dump_buffered`].
///
/// This is a demonstration: failures of either method are reported on the
/// diagnostics channel where they occur, once each, and the remaining steps
/// still run.
pub fn compare_file_methods<F, W>(fs: &F, root: &Path, out: &mut W)
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    let path = root.join("version");

    say(out, format_args!("Comparing file reading methods for: {}\n\n", path.display()));

    say(out, format_args!("=== Method 1: Using System Calls ===\n"));
    if dump_raw(fs, &path, out).is_err() {
        debug!("system call method failed, continuing");
    }

    say(out, format_args!("\n=== Method 2: Using Library Functions ===\n"));
    if dump_buffered(fs, &path, out).is_err() {
        debug!("library method failed, continuing");
    }

    say(out, format_args!("\nNOTE: Run this program with strace to see the difference!\n"));
    say(
        out,
        format_args!(
            "Example: strace -e trace=openat,read,write,close {} compare\n",
            env!("CARGO_PKG_NAME")
        ),
    );
}

fn say<W: Write + ?Sized>(out: &mut W, args: fmt::Arguments<'_>) {
    if let Err(e) = out.write_fmt(args) {
        warn!(error = %e, "failed to write output");
    }
}
