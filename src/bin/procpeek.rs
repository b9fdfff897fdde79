//! procpeek - show process and system information from /proc.
//!
//! Usage:
//!   procpeek list                      # list process directories
//!   procpeek info 1                    # status and command line of PID 1
//!   procpeek sysinfo                   # first lines of cpuinfo and meminfo
//!   procpeek compare                   # raw vs buffered read of /proc/version
//!   procpeek --proc-path ./snap list   # read a copied /proc tree instead

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

use procpeek::fs::FileSystem;
#[cfg(unix)]
use procpeek::fs::{RawStdout, RealFs};
use procpeek::report::{self, DEFAULT_PROC_PATH};

/// Process and system information from /proc.
#[derive(Parser)]
#[command(name = "procpeek", about = "Process and system information from /proc", version)]
struct Args {
    /// Path to /proc filesystem.
    #[arg(long, global = true, default_value = DEFAULT_PROC_PATH)]
    proc_path: PathBuf,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace).
    /// Default is warn level, which still shows every failure.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List process directories.
    List,
    /// Show the status and command line of a process.
    Info {
        /// Process id; not validated, a bad id fails when its files are opened.
        #[arg(value_name = "PID")]
        pid: String,
    },
    /// Show the first lines of cpuinfo and meminfo.
    Sysinfo,
    /// Read <proc>/version with raw system calls, then with buffered library calls.
    Compare,
}

/// Initializes the tracing subscriber on stderr with the appropriate log level.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("procpeek={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg_attr(not(unix), allow(dead_code))]
fn run<F, W>(command: &Command, fs: &F, root: &Path, out: &mut W) -> procpeek::Result<()>
where
    F: FileSystem,
    W: Write,
{
    match command {
        Command::List => {
            let count = report::list_process_directories(fs, root, out)?;
            debug!(count, "process listing complete");
        }
        Command::Info { pid } => report::report_process_info(fs, root, pid, out)?,
        Command::Sysinfo => report::report_system_info(fs, root, out)?,
        Command::Compare => report::compare_file_methods(fs, root, out),
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);
    debug!(proc_path = %args.proc_path.display(), "procpeek {} starting", env!("CARGO_PKG_VERSION"));

    #[cfg(unix)]
    if let Err(e) = run(&args.command, &RealFs::new(), &args.proc_path, &mut RawStdout::new()) {
        // Already reported where it happened; only the exit status is left.
        debug!(error = %e, "command failed");
        std::process::exit(1);
    }

    #[cfg(not(unix))]
    {
        tracing::error!(
            proc_path = %args.proc_path.display(),
            "reading the process filesystem needs a POSIX system"
        );
        std::process::exit(1);
    }
}
