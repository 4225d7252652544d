//! End-to-end report over a procfs tree laid out on disk.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::time::Duration;

use procinspect::collector::{Collector, InspectError, RealFs};
use procinspect::sections::Sections;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Builds a small procfs tree and a passwd file naming the current user.
fn build_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let proc = dir.path().join("proc");
    let uid = fs::metadata(dir.path()).unwrap().uid();

    write(
        dir.path(),
        "passwd",
        &format!("tester:x:{uid}:{uid}:Tester:/home/tester:/bin/sh\n"),
    );

    write(&proc, "sys/kernel/hostname", "tree-host\n");
    write(&proc, "sys/kernel/osrelease", "6.1.0-test\n");
    write(&proc, "uptime", "93784.12 100.00\n");
    write(&proc, "loadavg", "1.00 0.50 0.25 2/80 99\n");
    write(
        &proc,
        "cpuinfo",
        "processor\t: 0\nmodel name\t: Test CPU 9000\nstepping\t: 1\n",
    );
    write(
        &proc,
        "meminfo",
        "MemTotal:        2097152 kB\nMemFree:         1048576 kB\nActive:           524288 kB\n",
    );
    write(
        &proc,
        "stat",
        "cpu  100 0 100 800 0 0 0 0 0 0\ncpu0 100 0 100 800 0 0 0 0 0 0\n\
         intr 42 1 2\nctxt 77\nprocesses 9\n",
    );

    write(&proc, "1/stat", "1 (init) S 0 1 1\n");
    fs::create_dir_all(proc.join("1/task/1")).unwrap();
    write(&proc, "20/stat", "20 (kworker/0:1) I 2 0 0\n");
    fs::create_dir_all(proc.join("20/task/20")).unwrap();
    fs::create_dir_all(proc.join("20/task/21")).unwrap();
    fs::create_dir_all(proc.join("self")).unwrap();

    dir
}

fn collector(dir: &TempDir) -> Collector<RealFs> {
    Collector::new(RealFs::new(), dir.path().join("proc"))
        .with_passwd_path(dir.path().join("passwd"))
        .with_sample_interval(Duration::ZERO)
}

#[test]
fn test_full_report_from_disk() {
    let dir = build_tree();
    let mut out = Vec::new();
    collector(&dir).run(Sections::all(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Hostname: tree-host\n"));
    assert!(text.contains("Kernel Version: 6.1.0-test\n"));
    assert!(text.contains("Uptime: 1 days, 2 hours, 3 minutes, 4 seconds\n"));
    assert!(text.contains("CPU Model: Test CPU 9000\n"));
    assert!(text.contains("Processing Units: 1\n"));
    assert!(text.contains("Load Average (1/5/15 min): 1.00 0.50 0.25\n"));
    assert!(text.contains("Memory Usage: [#####---------------] 25.0% (0.5 GB / 2.0 GB)\n"));
    assert!(text.contains("Tasks running: 2\n"));
    assert!(text.contains("\tInterrupts: 42\n"));
    assert!(text.contains("\tContext Switches: 77\n"));
    assert!(text.contains("\tForks: 9\n"));
    assert!(text.contains(
        "    1 |     sleeping |                      init |          tester | 1 \n"
    ));
    assert!(text.contains(
        "   20 |         idle |               kworker/0:1 |          tester | 2 \n"
    ));
}

#[test]
fn test_missing_source_aborts_with_path() {
    let dir = build_tree();
    fs::remove_file(dir.path().join("proc/meminfo")).unwrap();

    let sections = Sections {
        hardware: true,
        ..Sections::default()
    };
    let mut out = Vec::new();
    let err = collector(&dir).run(sections, &mut out).unwrap_err();

    assert!(matches!(err, InspectError::Io { .. }));
    assert!(err.to_string().contains("meminfo"));
}

#[test]
fn test_sections_written_before_failure_are_kept() {
    let dir = build_tree();
    fs::remove_file(dir.path().join("proc/cpuinfo")).unwrap();

    let mut out = Vec::new();
    let result = collector(&dir).run(Sections::all(), &mut out);

    assert!(result.is_err());
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("System Information\n"));
    assert!(!text.contains("Hardware Information"));
}
