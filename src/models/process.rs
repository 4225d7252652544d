//! Per-process rows of the task list.

use std::fmt;

/// Scheduler state of a process, from the state code in `/proc/<pid>/stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    Sleeping,
    Running,
    Idle,
    Dead,
    Zombie,
    TracingStop,
    DiskSleep,
    /// Any code outside the set above, or a missing code.
    Unknown,
}

impl TaskState {
    /// Maps a state token to a state. Only exact one-letter codes are known.
    pub fn from_code(code: &str) -> Self {
        match code {
            "S" => Self::Sleeping,
            "R" => Self::Running,
            "I" => Self::Idle,
            "X" => Self::Dead,
            "Z" => Self::Zombie,
            "T" => Self::TracingStop,
            "D" => Self::DiskSleep,
            _ => Self::Unknown,
        }
    }

    /// Label used in the task list.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sleeping => "sleeping",
            Self::Running => "running",
            Self::Idle => "idle",
            Self::Dead => "dead",
            Self::Zombie => "zombie",
            Self::TracingStop => "tracing stop",
            Self::DiskSleep => "disk sleep",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width/alignment flags apply to the label.
        f.pad(self.label())
    }
}

/// One process in the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub pid: u32,
    pub state: TaskState,
    /// Process name, at most 25 bytes.
    pub name: String,
    /// Owning user name, at most 15 bytes.
    pub user: String,
    /// Threads listed under `/proc/<pid>/task`.
    pub threads: usize,
}

/// Outcome of scanning one process directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEntry {
    Process(TaskRow),
    /// The process directory was there but its `stat` file could not be
    /// interpreted.
    Skipped { pid: u32, reason: String },
}

impl TaskEntry {
    /// Process id of the entry.
    pub fn pid(&self) -> u32 {
        match self {
            Self::Process(row) => row.pid,
            Self::Skipped { pid, .. } => *pid,
        }
    }
}
