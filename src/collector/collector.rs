//! Main collector that combines the system and process collectors.
//!
//! The `Collector` runs the selected report sections in order, gathering
//! each one from the procfs root and handing it to the renderer.

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::collector::error::{InspectError, Result};
use crate::collector::procfs::{
    CPU_SAMPLE_INTERVAL, DEFAULT_PASSWD_PATH, ProcessCollector, SystemCollector,
};
use crate::collector::traits::FileSystem;
use crate::report;
use crate::sections::Sections;

/// Produces the inspection report for one procfs root.
pub struct Collector<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    passwd_path: PathBuf,
    sample_interval: Duration,
}

impl<F: FileSystem> Collector<F> {
    /// Creates a collector reading from `proc_path` through `fs`.
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            passwd_path: PathBuf::from(DEFAULT_PASSWD_PATH),
            sample_interval: CPU_SAMPLE_INTERVAL,
        }
    }

    /// Uses a different user-account database for owner names.
    pub fn with_passwd_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.passwd_path = path.into();
        self
    }

    /// Overrides the delay between the two CPU samples.
    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Returns a system collector borrowing this collector's filesystem.
    pub fn system_collector(&self) -> SystemCollector<&F> {
        SystemCollector::new(&self.fs, &self.proc_path).with_sample_interval(self.sample_interval)
    }

    /// Returns a process collector with user names loaded.
    pub fn process_collector(&self) -> ProcessCollector<&F> {
        let mut collector = ProcessCollector::new(&self.fs, &self.proc_path);
        collector.load_users(&self.passwd_path);
        collector
    }

    /// Collects and writes every selected section to `out`.
    ///
    /// Sections run strictly one after another. The first unreadable source
    /// aborts the run; sections already written stay written.
    pub fn run<W: Write>(&self, sections: Sections, out: &mut W) -> Result<()> {
        let start = Instant::now();

        if sections.system {
            let system = self.system_collector().collect_system()?;
            report::write_system(out, &system).map_err(InspectError::Write)?;
            debug!(elapsed = ?start.elapsed(), "system section done");
        }

        if sections.hardware {
            let hardware = self.system_collector().collect_hardware()?;
            report::write_hardware(out, &hardware).map_err(InspectError::Write)?;
            debug!(elapsed = ?start.elapsed(), "hardware section done");
        }

        if sections.task_summary {
            let summary = self.system_collector().collect_task_summary()?;
            report::write_task_summary(out, &summary).map_err(InspectError::Write)?;
            debug!(elapsed = ?start.elapsed(), "task summary section done");
        }

        if sections.task_list {
            let tasks = self.process_collector().collect_all()?;
            report::write_task_list(out, &tasks).map_err(InspectError::Write)?;
            debug!(elapsed = ?start.elapsed(), "task list section done");
        }

        out.flush().map_err(InspectError::Write)
    }
}
