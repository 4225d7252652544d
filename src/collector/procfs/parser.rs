//! Parsers for procfs files.
//!
//! These are pure functions over file contents, built on [`Tokens`] with a
//! delimiter set chosen per file. None of them fail: a field that is missing
//! or malformed comes back as `None` (or zero for counts), and the report
//! shows it as not available.

use std::collections::HashMap;

use crate::collector::tokenizer::{
    COUNTER_DELIMS, CPUINFO_DELIMS, LOADAVG_DELIMS, PID_STAT_DELIMS, STAT_DELIMS, Tokens,
    leading_u64,
};
use crate::fmt::truncate_bytes;
use crate::models::{CpuTimes, LoadAverage, MemoryUsage, TaskState};

/// Longest process name kept in the task list, in bytes.
pub const MAX_TASK_NAME_LEN: usize = 25;

/// Longest user name kept in the task list, in bytes.
pub const MAX_USER_NAME_LEN: usize = 15;

/// Returns the first line of a one-line file such as `sys/kernel/hostname`.
pub fn parse_first_line(content: &str) -> Option<String> {
    Tokens::new(content, "\n").next().map(str::to_string)
}

/// Parses whole seconds since boot from `/proc/uptime`.
///
/// Format: `12345.67 98765.43`; the fractional part is dropped.
pub fn parse_uptime_secs(content: &str) -> Option<u64> {
    Tokens::new(content, " \t\n").next().and_then(leading_u64)
}

/// Extracts the CPU model from `/proc/cpuinfo`.
///
/// The model is every word after the `name` of the first `model name` label,
/// up to a `stepping` label or the end of that line, whichever comes first.
pub fn parse_cpu_model(content: &str) -> Option<String> {
    let words: Vec<&str> = content
        .lines()
        .find_map(|line| {
            let mut tokens = Tokens::new(line, CPUINFO_DELIMS);
            tokens.by_ref().find(|&token| token == "name")?;
            Some(tokens.take_while(|&token| token != "stepping").collect())
        })
        .unwrap_or_default();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Counts per-core lines in `/proc/stat`.
///
/// Every token starting with `cpu` is counted; the aggregate `cpu` line is
/// then taken back out.
pub fn parse_core_count(content: &str) -> usize {
    Tokens::new(content, STAT_DELIMS)
        .filter(|token| token.starts_with("cpu"))
        .count()
        .saturating_sub(1)
}

/// Takes the 1, 5 and 15 minute load averages from `/proc/loadavg` verbatim.
pub fn parse_loadavg(content: &str) -> LoadAverage {
    LoadAverage {
        fields: Tokens::new(content, LOADAVG_DELIMS)
            .take(3)
            .map(|token| token.trim_end_matches('\n').to_string())
            .filter(|field| !field.is_empty())
            .collect(),
    }
}

/// Parses the aggregate CPU counters from the first line of `/proc/stat`.
///
/// Returns `None` unless the file starts with a `cpu` label.
pub fn parse_cpu_times(content: &str) -> Option<CpuTimes> {
    let mut tokens = Tokens::new(content, STAT_DELIMS);
    if tokens.next()? != "cpu" {
        return None;
    }
    let fields: Vec<u64> = tokens
        .take(10)
        .map(|token| leading_u64(token).unwrap_or(0))
        .collect();
    Some(CpuTimes::from_fields(&fields))
}

/// Parses `MemTotal` and `Active` from `/proc/meminfo`.
pub fn parse_meminfo(content: &str) -> MemoryUsage {
    let mut usage = MemoryUsage::default();
    let mut tokens = Tokens::new(content, STAT_DELIMS);

    while let Some(token) = tokens.next() {
        match token {
            "MemTotal" => usage.total_kib = tokens.next().and_then(leading_u64),
            "Active" => usage.active_kib = tokens.next().and_then(leading_u64),
            _ => {}
        }
    }

    usage
}

/// Kernel activity counters from `/proc/stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatCounters {
    pub interrupts: Option<u64>,
    pub context_switches: Option<u64>,
    pub forks: Option<u64>,
}

/// Parses the `intr`, `ctxt` and `processes` counters from `/proc/stat`.
pub fn parse_stat_counters(content: &str) -> StatCounters {
    let mut counters = StatCounters::default();
    let mut tokens = Tokens::new(content, COUNTER_DELIMS);

    while let Some(token) = tokens.next() {
        let slot = match token {
            "intr" => &mut counters.interrupts,
            "ctxt" => &mut counters.context_switches,
            "processes" => &mut counters.forks,
            _ => continue,
        };
        *slot = tokens.next().and_then(leading_u64);
    }

    counters
}

/// Name and state read from `/proc/<pid>/stat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PidStat {
    /// Process name, truncated to [`MAX_TASK_NAME_LEN`] bytes.
    pub name: String,
    pub state: TaskState,
}

/// Parses `/proc/<pid>/stat`.
///
/// Format: `pid (comm) state ppid ...`. The comm may itself contain spaces
/// or parentheses, so it runs from the first `(` to the last `)`; the state
/// is the first token after that. Returns `None` when the pid, name or
/// state is missing.
pub fn parse_pid_stat(content: &str) -> Option<PidStat> {
    let open = content.find('(')?;
    let close = content.rfind(')').filter(|&close| close > open)?;

    Tokens::new(&content[..open], PID_STAT_DELIMS).next()?;
    let name = &content[open + 1..close];
    let state = Tokens::new(&content[close + 1..], PID_STAT_DELIMS).next()?;

    Some(PidStat {
        name: truncate_bytes(name, MAX_TASK_NAME_LEN).to_string(),
        state: TaskState::from_code(state.trim_end()),
    })
}

/// Parses `/etc/passwd` content and returns a map of UID -> username.
///
/// Format: username:password:uid:gid:gecos:home:shell
pub fn parse_passwd(content: &str) -> HashMap<u32, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        // Skip comments and empty lines
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() >= 3
            && let Ok(uid) = parts[2].parse::<u32>()
        {
            // First entry wins, like getpwuid.
            map.entry(uid).or_insert_with(|| parts[0].to_string());
        }
    }
    map
}

/// Resolver for UID -> username mapping.
#[derive(Debug, Clone, Default)]
pub struct UserResolver {
    uid_to_name: HashMap<u32, String>,
}

impl UserResolver {
    /// Creates a new empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a resolver from `/etc/passwd` content.
    pub fn from_passwd(content: &str) -> Self {
        Self {
            uid_to_name: parse_passwd(content),
        }
    }

    /// Resolves a UID to a user name, `None` if no account has that UID.
    pub fn resolve(&self, uid: u32) -> Option<&str> {
        self.uid_to_name.get(&uid).map(String::as_str)
    }
}
