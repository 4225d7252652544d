//! System collector for host, hardware and kernel counter sections.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::collector::error::{InspectError, Result};
use crate::collector::loader::{RawBuffer, load};
use crate::collector::procfs::parser::{
    parse_core_count, parse_cpu_model, parse_cpu_times, parse_first_line, parse_loadavg,
    parse_meminfo, parse_stat_counters, parse_uptime_secs,
};
use crate::collector::traits::{FileSystem, is_pid_dir};
use crate::models::{CpuTimes, HardwareSnapshot, SystemSnapshot, TaskSummary, Uptime};

/// Delay between the two `/proc/stat` samples used for CPU utilization.
pub const CPU_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Collects system-wide metrics from the procfs root.
pub struct SystemCollector<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    sample_interval: Duration,
}

impl<F: FileSystem> SystemCollector<F> {
    /// Creates a new system collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            sample_interval: CPU_SAMPLE_INTERVAL,
        }
    }

    /// Overrides the delay between the two CPU samples.
    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    fn read(&self, relative: &str) -> Result<RawBuffer> {
        load(&self.fs, &self.proc_path.join(relative))
    }

    /// Collects hostname, kernel release and uptime.
    pub fn collect_system(&self) -> Result<SystemSnapshot> {
        let hostname = parse_first_line(self.read("sys/kernel/hostname")?.as_str());
        let kernel_version = parse_first_line(self.read("sys/kernel/osrelease")?.as_str());
        let uptime = parse_uptime_secs(self.read("uptime")?.as_str()).map(Uptime::from_secs);

        if uptime.is_none() {
            warn!("could not parse uptime");
        }

        Ok(SystemSnapshot {
            hostname,
            kernel_version,
            uptime,
        })
    }

    /// Collects CPU model, core count, load, CPU utilization and memory.
    ///
    /// Blocks for the sample interval while measuring CPU utilization.
    pub fn collect_hardware(&self) -> Result<HardwareSnapshot> {
        let cpu_model = parse_cpu_model(self.read("cpuinfo")?.as_str());
        let processing_units = parse_core_count(self.read("stat")?.as_str());
        let load_average = parse_loadavg(self.read("loadavg")?.as_str());
        let memory = parse_meminfo(self.read("meminfo")?.as_str());
        let cpu_usage = self.measure_cpu_usage()?;

        debug!(
            ?cpu_model,
            processing_units,
            load = ?load_average.values(),
            cpu_usage,
            "collected hardware information"
        );

        Ok(HardwareSnapshot {
            cpu_model,
            processing_units,
            load_average,
            cpu_usage,
            memory,
        })
    }

    /// Reads the aggregate CPU counters once.
    ///
    /// A `stat` file without a leading `cpu` line yields all-zero counters.
    pub fn sample_cpu_times(&self) -> Result<CpuTimes> {
        let times = parse_cpu_times(self.read("stat")?.as_str());
        if times.is_none() {
            warn!("no aggregate cpu line in stat");
        }
        Ok(times.unwrap_or_default())
    }

    /// Samples the CPU counters twice, one interval apart, and returns the
    /// utilization in between as a percentage.
    pub fn measure_cpu_usage(&self) -> Result<f64> {
        let before = self.sample_cpu_times()?;
        thread::sleep(self.sample_interval);
        let after = self.sample_cpu_times()?;
        Ok(after.usage_since(&before))
    }

    /// Counts processes and reads the kernel activity counters.
    pub fn collect_task_summary(&self) -> Result<TaskSummary> {
        let running = self.count_processes()?;
        let counters = parse_stat_counters(self.read("stat")?.as_str());

        Ok(TaskSummary {
            running,
            interrupts: counters.interrupts,
            context_switches: counters.context_switches,
            forks: counters.forks,
        })
    }

    /// Counts digit-named directories in the procfs root.
    pub fn count_processes(&self) -> Result<usize> {
        count_pid_dirs(&self.fs, &self.proc_path)
    }
}

/// Counts digit-named subdirectories of `dir`.
pub(crate) fn count_pid_dirs<F: FileSystem>(fs: &F, dir: &Path) -> Result<usize> {
    let entries = fs.read_dir(dir).map_err(|e| InspectError::io(dir, e))?;
    Ok(entries.iter().filter(|entry| is_pid_dir(entry)).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    fn collector(fs: &MockFs) -> SystemCollector<&MockFs> {
        SystemCollector::new(fs, "/proc").with_sample_interval(Duration::ZERO)
    }

    #[test]
    fn test_collect_system() {
        let fs = MockFs::typical_system();
        let system = collector(&fs).collect_system().unwrap();

        assert_eq!(system.hostname.as_deref(), Some("testhost"));
        assert_eq!(system.kernel_version.as_deref(), Some("6.8.0-45-generic"));
        // 12345.67 seconds
        assert_eq!(
            system.uptime,
            Some(Uptime {
                years: 0,
                days: 0,
                hours: 3,
                minutes: 25,
                seconds: 45,
            })
        );
    }

    #[test]
    fn test_collect_system_missing_hostname_is_fatal() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/sys/kernel/osrelease", "6.1\n");
        fs.add_file("/proc/uptime", "1 1\n");

        let err = collector(&fs).collect_system().unwrap_err();
        assert!(err.to_string().contains("/proc/sys/kernel/hostname"));
    }

    #[test]
    fn test_collect_hardware() {
        let fs = MockFs::typical_system();
        let hw = collector(&fs).collect_hardware().unwrap();

        assert_eq!(
            hw.cpu_model.as_deref(),
            Some("Intel(R) Core(TM) i7-8700K CPU @ 3.70GHz")
        );
        assert_eq!(hw.processing_units, 4);
        assert_eq!(hw.load_average.fields, vec!["0.15", "0.10", "0.05"]);
        // Same stat content for both samples.
        assert_eq!(hw.cpu_usage, 0.0);
        assert_eq!(hw.memory.percentage(), Some(25.0));
    }

    #[test]
    fn test_sample_cpu_times_without_cpu_line() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/stat", "ctxt 5\n");
        assert_eq!(
            collector(&fs).sample_cpu_times().unwrap(),
            CpuTimes::default()
        );
    }

    #[test]
    fn test_collect_task_summary() {
        let fs = MockFs::typical_system();
        let summary = collector(&fs).collect_task_summary().unwrap();

        assert_eq!(summary.running, 3);
        assert_eq!(summary.interrupts, Some(1_000_000));
        assert_eq!(summary.context_switches, Some(500_000));
        assert_eq!(summary.forks, Some(10_000));
    }

    #[test]
    fn test_count_processes_only_digit_directories() {
        let fs = MockFs::with_odd_entries();
        assert_eq!(collector(&fs).count_processes().unwrap(), 3);
    }

    #[test]
    fn test_count_processes_missing_root_is_fatal() {
        let fs = MockFs::new();
        let err = collector(&fs).count_processes().unwrap_err();
        assert!(matches!(err, InspectError::Io { .. }));
    }
}
