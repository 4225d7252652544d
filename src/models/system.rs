//! System-wide metrics collected from the procfs root.
//!
//! These structures hold the values shown in the System, Hardware and Task
//! Information sections of the report. Values that could not be extracted
//! are `None` and render as "not available".

/// Seconds in a 365-day year.
pub const SECS_PER_YEAR: u64 = 31_536_000;
/// Seconds in a day.
pub const SECS_PER_DAY: u64 = 86_400;
/// Seconds in an hour.
pub const SECS_PER_HOUR: u64 = 3_600;
/// Seconds in a minute.
pub const SECS_PER_MINUTE: u64 = 60;

/// KiB in one GiB.
pub const KIB_PER_GIB: f64 = 1_048_576.0;

/// Host identity and time since boot.
///
/// Source: `sys/kernel/hostname`, `sys/kernel/osrelease`, `uptime`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemSnapshot {
    pub hostname: Option<String>,
    pub kernel_version: Option<String>,
    pub uptime: Option<Uptime>,
}

/// Uptime decomposed into calendar-ish units.
///
/// Each unit is the remainder left after taking out all larger units, so
/// `hours < 24`, `minutes < 60` and so on; `years` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Uptime {
    pub years: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Uptime {
    /// Decomposes elapsed seconds by successive division and remainder.
    pub fn from_secs(secs: u64) -> Self {
        let years = secs / SECS_PER_YEAR;
        let secs = secs % SECS_PER_YEAR;
        let days = secs / SECS_PER_DAY;
        let secs = secs % SECS_PER_DAY;
        let hours = secs / SECS_PER_HOUR;
        let secs = secs % SECS_PER_HOUR;
        let minutes = secs / SECS_PER_MINUTE;
        let seconds = secs % SECS_PER_MINUTE;

        Self {
            years,
            days,
            hours,
            minutes,
            seconds,
        }
    }
}

/// Aggregate CPU time counters from the first line of `/proc/stat`.
///
/// All values are in jiffies and only meaningful as deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CpuTimes {
    /// Builds counters from the ten fields in `/proc/stat` column order.
    /// Missing trailing fields count as zero.
    pub fn from_fields(fields: &[u64]) -> Self {
        let get = |idx: usize| fields.get(idx).copied().unwrap_or(0);
        Self {
            user: get(0),
            nice: get(1),
            system: get(2),
            idle: get(3),
            iowait: get(4),
            irq: get(5),
            softirq: get(6),
            steal: get(7),
            guest: get(8),
            guest_nice: get(9),
        }
    }

    /// Sum of all ten counters.
    pub fn total(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
            + self.guest
            + self.guest_nice
    }

    /// CPU utilization between two samples, as a percentage in `[0, 100]`.
    ///
    /// `100 * (1 - Δidle / Δtotal)`; zero when no time elapsed between the
    /// samples or the counters went backwards.
    pub fn usage_since(&self, earlier: &CpuTimes) -> f64 {
        let total = self.total().saturating_sub(earlier.total());
        if total == 0 {
            return 0.0;
        }
        let idle = self.idle.saturating_sub(earlier.idle);
        let usage = (1.0 - idle as f64 / total as f64) * 100.0;
        usage.clamp(0.0, 100.0)
    }
}

/// Load averages from `/proc/loadavg`.
///
/// Kept as the verbatim text of the 1, 5 and 15 minute fields so the report
/// shows exactly what the kernel printed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadAverage {
    pub fields: Vec<String>,
}

impl LoadAverage {
    /// Parses the fields as numbers, `None` if any of the three is missing or
    /// not a number.
    pub fn values(&self) -> Option<[f64; 3]> {
        if self.fields.len() != 3 {
            return None;
        }
        let mut values = [0.0; 3];
        for (value, field) in values.iter_mut().zip(&self.fields) {
            *value = field.parse().ok()?;
        }
        Some(values)
    }
}

/// Memory usage from `/proc/meminfo`.
///
/// Source: `MemTotal` and `Active` (KiB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryUsage {
    pub total_kib: Option<u64>,
    pub active_kib: Option<u64>,
}

impl MemoryUsage {
    /// Active memory as a percentage of total, `None` without a non-zero total.
    pub fn percentage(&self) -> Option<f64> {
        match self.total_kib {
            Some(total) if total > 0 => {
                Some(self.active_kib.unwrap_or(0) as f64 / total as f64 * 100.0)
            }
            _ => None,
        }
    }

    /// Total memory in GiB.
    pub fn total_gib(&self) -> Option<f64> {
        self.total_kib.map(|kib| kib as f64 / KIB_PER_GIB)
    }

    /// Active memory in GiB.
    pub fn active_gib(&self) -> Option<f64> {
        self.active_kib.map(|kib| kib as f64 / KIB_PER_GIB)
    }
}

/// Everything shown in the Hardware Information section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HardwareSnapshot {
    /// Words of the first `model name` entry in `/proc/cpuinfo`.
    pub cpu_model: Option<String>,
    /// Per-core `cpuN` lines in `/proc/stat`.
    pub processing_units: usize,
    pub load_average: LoadAverage,
    /// Utilization over the sampling interval, percent.
    pub cpu_usage: f64,
    pub memory: MemoryUsage,
}

/// Process count and kernel activity counters since boot.
///
/// Source: procfs root listing and `/proc/stat`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    /// Digit-named directories in the procfs root.
    pub running: usize,
    pub interrupts: Option<u64>,
    pub context_switches: Option<u64>,
    pub forks: Option<u64>,
}
