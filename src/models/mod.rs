//! Snapshot models produced by the collectors and consumed by the report.
//!
//! Everything here is plain data built fresh for each run; nothing is
//! cached or persisted between invocations.

mod process;
mod system;

pub use process::{TaskEntry, TaskRow, TaskState};
pub use system::{
    CpuTimes, HardwareSnapshot, LoadAverage, MemoryUsage, SystemSnapshot, TaskSummary, Uptime,
};
