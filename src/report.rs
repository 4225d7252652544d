//! Plain-text report sections.
//!
//! Each `write_*` function renders one fixed-layout section to any
//! [`io::Write`]. Values that could not be extracted print as `n/a`.

use std::io::{self, Write};

use crate::fmt::{NOT_AVAILABLE, format_uptime, or_na, usage_bar};
use crate::models::{HardwareSnapshot, MemoryUsage, SystemSnapshot, TaskEntry, TaskSummary};

/// Writes the System Information section.
pub fn write_system<W: Write>(out: &mut W, system: &SystemSnapshot) -> io::Result<()> {
    let uptime = system
        .uptime
        .as_ref()
        .map(format_uptime)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    writeln!(out, "System Information")?;
    writeln!(out, "------------------")?;
    writeln!(out, "Hostname: {}", or_na(system.hostname.as_deref()))?;
    writeln!(out, "Kernel Version: {}", or_na(system.kernel_version.as_deref()))?;
    writeln!(out, "Uptime: {}", uptime)?;
    writeln!(out)
}

/// Writes the Hardware Information section.
pub fn write_hardware<W: Write>(out: &mut W, hw: &HardwareSnapshot) -> io::Result<()> {
    let load = if hw.load_average.fields.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        hw.load_average.fields.join(" ")
    };

    writeln!(out, "Hardware Information")?;
    writeln!(out, "--------------------")?;
    writeln!(out, "CPU Model: {}", or_na(hw.cpu_model.as_deref()))?;
    writeln!(out, "Processing Units: {}", hw.processing_units)?;
    writeln!(out, "Load Average (1/5/15 min): {}", load)?;
    writeln!(out, "CPU Usage: {}", usage_line(hw.cpu_usage))?;
    writeln!(out, "Memory Usage: {}", memory_line(&hw.memory))?;
    writeln!(out)
}

fn usage_line(percentage: f64) -> String {
    format!("[{}] {:.1}%", usage_bar(percentage), percentage)
}

fn memory_line(memory: &MemoryUsage) -> String {
    match (memory.percentage(), memory.total_gib()) {
        (Some(percentage), Some(total)) => format!(
            "{} ({:.1} GB / {:.1} GB)",
            usage_line(percentage),
            memory.active_gib().unwrap_or(0.0),
            total
        ),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Writes the Task Information section.
pub fn write_task_summary<W: Write>(out: &mut W, summary: &TaskSummary) -> io::Result<()> {
    writeln!(out, "Task Information")?;
    writeln!(out, "----------------")?;
    writeln!(out, "Tasks running: {}", summary.running)?;
    writeln!(out, "Since boot:")?;
    writeln!(out, "\tInterrupts: {}", or_na(summary.interrupts))?;
    writeln!(out, "\tContext Switches: {}", or_na(summary.context_switches))?;
    writeln!(out, "\tForks: {}", or_na(summary.forks))?;
    writeln!(out)
}

/// Writes the task table header.
pub fn write_task_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{:>5} | {:>12} | {:>25} | {:>15} | {} ",
        "PID", "State", "Task Name", "User", "Tasks"
    )?;
    writeln!(
        out,
        "------+--------------+---------------------------+-----------------+-------"
    )
}

/// Writes one task table row.
pub fn write_task_entry<W: Write>(out: &mut W, entry: &TaskEntry) -> io::Result<()> {
    match entry {
        TaskEntry::Process(row) => writeln!(
            out,
            "{:>5} | {:>12} | {:>25} | {:>15} | {} ",
            row.pid, row.state, row.name, row.user, row.threads
        ),
        TaskEntry::Skipped { pid, reason } => writeln!(out, "{:>5} | skipped: {}", pid, reason),
    }
}

/// Writes the task table: header and one row per entry.
pub fn write_task_list<W: Write>(out: &mut W, entries: &[TaskEntry]) -> io::Result<()> {
    write_task_header(out)?;
    for entry in entries {
        write_task_entry(out, entry)?;
    }
    Ok(())
}
