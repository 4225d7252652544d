//! Process collector for the task list, built from `/proc/[pid]/`.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::collector::error::{InspectError, Result};
use crate::collector::loader::load;
use crate::collector::procfs::parser::{MAX_USER_NAME_LEN, UserResolver, parse_pid_stat};
use crate::collector::procfs::system::count_pid_dirs;
use crate::collector::traits::{DirEntry, FileSystem, is_pid_dir};
use crate::fmt::truncate_bytes;
use crate::models::{TaskEntry, TaskRow};

/// Default location of the user-account database.
pub const DEFAULT_PASSWD_PATH: &str = "/etc/passwd";

/// User name shown when an owner id has no account.
pub const UNKNOWN_USER: &str = "unknown";

/// Collects one [`TaskEntry`] per process directory.
pub struct ProcessCollector<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    users: UserResolver,
}

impl<F: FileSystem> ProcessCollector<F> {
    /// Creates a new process collector with an empty user table.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            users: UserResolver::new(),
        }
    }

    /// Loads user names from a passwd-format file.
    ///
    /// An unreadable file is not fatal: every owner then shows as unknown.
    pub fn load_users(&mut self, passwd_path: &Path) {
        match load(&self.fs, passwd_path) {
            Ok(content) => self.users = UserResolver::from_passwd(content.as_str()),
            Err(e) => warn!("user names unavailable: {}", e),
        }
    }

    /// Scans the procfs root and describes every process found, in
    /// directory order.
    ///
    /// Processes that exit during the scan are left out. A `stat` file that
    /// can be read but not interpreted produces a [`TaskEntry::Skipped`].
    pub fn collect_all(&self) -> Result<Vec<TaskEntry>> {
        let entries = self
            .fs
            .read_dir(&self.proc_path)
            .map_err(|e| InspectError::io(&self.proc_path, e))?;

        let mut tasks = Vec::new();
        for entry in entries.iter().filter(|entry| is_pid_dir(entry)) {
            if let Some(task) = self.collect_entry(entry) {
                tasks.push(task);
            }
        }
        debug!(count = tasks.len(), "collected task list");
        Ok(tasks)
    }

    fn collect_entry(&self, entry: &DirEntry) -> Option<TaskEntry> {
        let pid: u32 = match entry.name().and_then(|name| name.parse().ok()) {
            Some(pid) => pid,
            None => {
                debug!(path = %entry.path.display(), "pid out of range, skipping");
                return None;
            }
        };
        match self.collect_process(pid, &entry.path) {
            Ok(task) => Some(task),
            Err(e) => {
                debug!(pid, "process gone during scan: {}", e);
                None
            }
        }
    }

    /// Collects the row for one process directory.
    ///
    /// Returns an error only if the process vanished (its `stat` file or the
    /// directory itself could no longer be read).
    pub fn collect_process(&self, pid: u32, dir: &Path) -> Result<TaskEntry> {
        let stat = load(&self.fs, &dir.join("stat"))?;
        let Some(stat) = parse_pid_stat(stat.as_str()) else {
            return Ok(TaskEntry::Skipped {
                pid,
                reason: "malformed stat".to_string(),
            });
        };

        let uid = self
            .fs
            .owner_uid(dir)
            .map_err(|e| InspectError::io(dir, e))?;

        Ok(TaskEntry::Process(TaskRow {
            pid,
            state: stat.state,
            name: stat.name,
            user: self.user_name(uid),
            threads: self.count_threads(dir),
        }))
    }

    /// Resolves an owner id to a user name of at most 15 bytes.
    pub fn user_name(&self, uid: u32) -> String {
        match self.users.resolve(uid) {
            Some(name) => truncate_bytes(name, MAX_USER_NAME_LEN).to_string(),
            None => UNKNOWN_USER.to_string(),
        }
    }

    /// Counts threads under `<dir>/task`; zero if the directory is missing
    /// (zombies) or unreadable. Both cases are logged at debug level.
    pub fn count_threads(&self, dir: &Path) -> usize {
        count_pid_dirs(&self.fs, &dir.join("task")).unwrap_or_else(|e| {
            debug!("no thread count: {}", e);
            0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::models::TaskState;

    fn collector(fs: &MockFs) -> ProcessCollector<&MockFs> {
        let mut c = ProcessCollector::new(fs, "/proc");
        c.load_users(Path::new(DEFAULT_PASSWD_PATH));
        c
    }

    fn sorted(mut tasks: Vec<TaskEntry>) -> Vec<TaskEntry> {
        tasks.sort_by_key(TaskEntry::pid);
        tasks
    }

    #[test]
    fn test_collect_all_typical_system() {
        let fs = MockFs::typical_system();
        let tasks = sorted(collector(&fs).collect_all().unwrap());

        assert_eq!(
            tasks,
            vec![
                TaskEntry::Process(TaskRow {
                    pid: 1,
                    state: TaskState::Sleeping,
                    name: "systemd".to_string(),
                    user: "root".to_string(),
                    threads: 1,
                }),
                TaskEntry::Process(TaskRow {
                    pid: 1000,
                    state: TaskState::Sleeping,
                    name: "bash".to_string(),
                    user: "user".to_string(),
                    threads: 1,
                }),
                TaskEntry::Process(TaskRow {
                    pid: 1001,
                    state: TaskState::Running,
                    name: "postgres".to_string(),
                    user: "postgres".to_string(),
                    threads: 4,
                }),
            ]
        );
    }

    #[test]
    fn test_collect_all_contains_every_pid_dir() {
        let fs = MockFs::with_zombie_process();
        let pids: Vec<u32> = sorted(collector(&fs).collect_all().unwrap())
            .iter()
            .map(TaskEntry::pid)
            .collect();
        assert_eq!(pids, vec![1, 1000, 1001, 4000]);
    }

    #[test]
    fn test_zombie_without_task_dir_has_zero_threads() {
        let fs = MockFs::with_zombie_process();
        let c = collector(&fs);
        let task = c.collect_process(4000, Path::new("/proc/4000")).unwrap();

        match task {
            TaskEntry::Process(row) => {
                assert_eq!(row.state, TaskState::Zombie);
                assert_eq!(row.threads, 0);
                assert_eq!(row.name, "defunct");
            }
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_uid_and_long_user_name() {
        let fs = MockFs::with_zombie_process();
        let c = collector(&fs);
        assert_eq!(c.user_name(424242), UNKNOWN_USER);
        assert_eq!(c.user_name(1100), "service-account");
        assert_eq!(c.user_name(1100).len(), MAX_USER_NAME_LEN);
    }

    #[test]
    fn test_missing_passwd_shows_unknown_users() {
        let mut fs = MockFs::new();
        fs.add_process(7, "7 (init) S 0 0", 0, &[7]);

        let mut c = ProcessCollector::new(&fs, "/proc");
        c.load_users(Path::new("/etc/passwd"));
        match c.collect_process(7, Path::new("/proc/7")).unwrap() {
            TaskEntry::Process(row) => assert_eq!(row.user, UNKNOWN_USER),
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_stat_is_marked_not_fatal() {
        let fs = MockFs::with_malformed_process();
        let tasks = sorted(collector(&fs).collect_all().unwrap());

        assert_eq!(tasks.len(), 4);
        assert_eq!(
            tasks[3],
            TaskEntry::Skipped {
                pid: 6000,
                reason: "malformed stat".to_string(),
            }
        );
    }

    #[test]
    fn test_vanished_process_is_left_out() {
        let mut fs = MockFs::typical_system();
        // Directory listed but its files are already gone.
        fs.add_dir("/proc/7777");

        let pids: Vec<u32> = sorted(collector(&fs).collect_all().unwrap())
            .iter()
            .map(TaskEntry::pid)
            .collect();
        assert_eq!(pids, vec![1, 1000, 1001]);
    }

    #[test]
    fn test_thread_count_ignores_non_digit_entries() {
        let mut fs = MockFs::new();
        fs.add_process(10, "10 (worker) R 1", 0, &[10, 11, 12]);
        fs.add_dir("/proc/10/task/notathread");
        fs.add_file("/proc/10/task/13", "");

        let c = ProcessCollector::new(&fs, "/proc");
        assert_eq!(c.count_threads(Path::new("/proc/10")), 3);
    }

    #[test]
    fn test_unlistable_task_dir_counts_zero_threads() {
        let mut fs = MockFs::new();
        fs.add_process(11, "11 (daemon) S 1", 0, &[]);
        // Present, but not a listable directory.
        fs.add_file("/proc/11/task", "");

        let c = ProcessCollector::new(&fs, "/proc");
        assert_eq!(c.count_threads(Path::new("/proc/11")), 0);
        match c.collect_process(11, Path::new("/proc/11")).unwrap() {
            TaskEntry::Process(row) => assert_eq!(row.threads, 0),
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_missing_proc_root_is_fatal() {
        let fs = MockFs::new();
        let err = ProcessCollector::new(&fs, "/proc").collect_all().unwrap_err();
        assert!(err.to_string().contains("/proc"));
    }
}
