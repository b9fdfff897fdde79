//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` filesystem states
//! for testing the readers and reports.

use super::filesystem::MockFs;

impl MockFs {
    /// Creates a typical system with a few processes.
    ///
    /// Includes: init (PID 1), a bash shell (PID 42), the non-process
    /// entries `self` and `net`, and the system-wide cpuinfo, meminfo and
    /// version files.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/proc/version",
            "Linux version 6.8.0-45-generic (buildd@lcy02-amd64-115) \
             (x86_64-linux-gnu-gcc-13 (Ubuntu 13.2.0-23ubuntu4) 13.2.0) \
             #45-Ubuntu SMP PREEMPT_DYNAMIC Fri Aug 30 12:02:04 UTC 2024\n",
        );
        fs.add_file(
            "/proc/cpuinfo",
            "\
processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 142
model name\t: Intel(R) Core(TM) i7-8565U CPU @ 1.80GHz
stepping\t: 11
microcode\t: 0xf4
cpu MHz\t\t: 1992.000
cache size\t: 8192 KB
physical id\t: 0
siblings\t: 8
core id\t\t: 0
cpu cores\t: 4
",
        );
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
Active:          4096000 kB
Inactive:        2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
Dirty:              1024 kB
Writeback:             0 kB
Slab:             512000 kB
SReclaimable:     256000 kB
",
        );

        // init process
        fs.add_process(
            1,
            "\
Name:\tsystemd
Umask:\t0000
State:\tS (sleeping)
Tgid:\t1
Pid:\t1
PPid:\t0
Uid:\t0\t0\t0\t0
Gid:\t0\t0\t0\t0
VmRSS:\t   12345 kB
Threads:\t1
",
            b"/sbin/init\0splash\0",
        );

        // bash shell
        fs.add_process(
            42,
            "\
Name:\tbash
Umask:\t0022
State:\tS (sleeping)
Tgid:\t42
Pid:\t42
PPid:\t1
Uid:\t1000\t1000\t1000\t1000
Gid:\t1000\t1000\t1000\t1000
VmRSS:\t    5120 kB
Threads:\t1
",
            b"-bash\0--login\0",
        );

        fs.add_dir("/proc/self");
        fs.add_dir("/proc/net");

        fs
    }
}
