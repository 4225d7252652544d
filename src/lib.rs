//! procinspect - point-in-time Linux system inspector library.
//!
//! Reads the procfs tree once and renders a plain-text report with up to
//! four sections:
//! - system: hostname, kernel release, uptime
//! - hardware: CPU model, processing units, load, CPU and memory usage
//! - task summary: process count and kernel counters since boot
//! - task list: one row per process with state, name, owner and threads

pub mod collector;
pub mod fmt;
pub mod models;
pub mod report;
pub mod sections;
