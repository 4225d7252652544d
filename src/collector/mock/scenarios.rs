//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` filesystem states
//! for testing various system conditions.

use super::filesystem::MockFs;

impl MockFs {
    /// Creates a typical system with a few processes.
    ///
    /// Includes: init (PID 1), a bash shell and a multi-threaded postgres.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        // /etc/passwd for user name resolution
        fs.add_file(
            "/etc/passwd",
            "\
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
postgres:x:115:120:PostgreSQL administrator:/var/lib/postgresql:/bin/bash
nobody:x:65534:65534:nobody:/nonexistent:/usr/sbin/nologin
user:x:1000:1000:User:/home/user:/bin/bash
service-account-name:x:1100:1100::/srv:/usr/sbin/nologin
",
        );

        // System-wide files
        fs.add_file("/proc/sys/kernel/hostname", "testhost\n");
        fs.add_file("/proc/sys/kernel/osrelease", "6.8.0-45-generic\n");
        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_file(
            "/proc/cpuinfo",
            "\
processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 158
model name\t: Intel(R) Core(TM) i7-8700K CPU @ 3.70GHz
stepping\t: 10
microcode\t: 0xde
cpu MHz\t\t: 3700.000

processor\t: 1
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 158
model name\t: Intel(R) Core(TM) i7-8700K CPU @ 3.70GHz
stepping\t: 10
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
Active(anon):    3000000 kB
Inactive(anon):   500000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );

        fs.add_process(
            1,
            "1 (systemd) S 0 1 1 0 -1 4194560 50000 1000000 100 500 1000 500 2000 1000 20 0 1 0 1 170000000 3000 18446744073709551615 1 1 0 0 0 0 671173123 4096 1260 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n",
            0,
            &[1],
        );
        fs.add_process(
            1000,
            "1000 (bash) S 999 1000 1000 34816 1000 4194304 5000 50000 10 20 100 50 200 100 20 0 1 0 100000 25000000 2000 18446744073709551615 0 0 0 0 0 0 65536 3670020 1266777851 0 0 0 17 2 0 0 5 0 0 0 0 0 0 0 0 0 0\n",
            1000,
            &[1000],
        );
        fs.add_process(
            1001,
            "1001 (postgres) R 1 1001 1001 0 -1 4194304 20000 0 50 0 5000 2000 0 0 20 0 4 0 200000 500000000 25000 18446744073709551615 0 0 0 0 0 0 0 4194304 0 0 0 0 17 1 0 0 0 0 0 0 0 0 0 0 0 0 0\n",
            115,
            &[1001, 1002, 1003, 1004],
        );

        fs
    }

    /// Creates a system with a zombie process.
    ///
    /// A zombie has released its threads, so it has no task directory.
    pub fn with_zombie_process() -> Self {
        let mut fs = Self::typical_system();

        fs.add_process(
            4000,
            "4000 (defunct) Z 1000 4000 1000 0 -1 4194308 0 0 0 0 0 0 0 0 20 0 1 0 400000 0 0 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 -1 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n",
            1100,
            &[],
        );

        fs
    }

    /// Creates a system whose `stat` for one process is cut short.
    pub fn with_malformed_process() -> Self {
        let mut fs = Self::typical_system();
        fs.add_process(6000, "6000 (trunc", 1000, &[6000]);
        fs
    }

    /// Creates a procfs root mixing process directories with entries that
    /// only look like them.
    ///
    /// Directories `1`, `2`, `abc`, `3.5`, `7` and a regular file `99`.
    pub fn with_odd_entries() -> Self {
        let mut fs = Self::new();
        for name in ["1", "2", "abc", "3.5", "7"] {
            fs.add_dir(format!("/proc/{}", name));
        }
        fs.add_file("/proc/99", "");
        fs
    }
}
