//! In-memory mock filesystem for testing collectors without real `/proc`.
//!
//! This module provides `MockFs` which simulates a filesystem in memory,
//! allowing tests to run on macOS and in CI environments without Linux.

use crate::collector::traits::{DirEntry, FileSystem};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
///
/// Stores files, directories and owners in memory, allowing tests to
/// simulate various `/proc` filesystem states without needing actual Linux
/// access. Paths without an explicit owner belong to uid 0.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Set of directories (for read_dir support).
    directories: HashSet<PathBuf>,
    /// Owner uid per path.
    owners: HashMap<PathBuf, u32>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path, content.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.directories.insert(path);
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }

    /// Sets the owner uid of a path.
    pub fn set_owner(&mut self, path: impl AsRef<Path>, uid: u32) {
        self.owners.insert(path.as_ref().to_path_buf(), uid);
    }

    /// Adds a process with its `/proc/[pid]/stat` file, owner and threads.
    ///
    /// # Arguments
    /// * `pid` - Process ID
    /// * `stat` - Content of `/proc/[pid]/stat`
    /// * `uid` - Owner of `/proc/[pid]`
    /// * `threads` - Thread ids under `/proc/[pid]/task`; empty means no task directory
    pub fn add_process(&mut self, pid: u32, stat: &str, uid: u32, threads: &[u32]) {
        let base = PathBuf::from(format!("/proc/{}", pid));
        self.add_dir(&base);
        self.set_owner(&base, uid);
        self.add_file(base.join("stat"), stat);
        for tid in threads {
            self.add_dir(base.join("task").join(tid.to_string()));
        }
    }
}

impl FileSystem for MockFs {
    fn read_bounded(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>> {
        let content = self.files.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })?;
        let mut bytes = content.as_bytes().to_vec();
        bytes.truncate(limit);
        Ok(bytes)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        if !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let mut entries = Vec::new();

        // Find all files and directories that are direct children
        for file_path in self.files.keys() {
            if file_path.parent().is_some_and(|parent| parent == path) {
                entries.push(DirEntry {
                    path: file_path.clone(),
                    is_dir: false,
                });
            }
        }

        for dir_path in &self.directories {
            if dir_path.parent().is_some_and(|parent| parent == path) && dir_path != path {
                entries.push(DirEntry {
                    path: dir_path.clone(),
                    is_dir: true,
                });
            }
        }

        Ok(entries)
    }

    fn owner_uid(&self, path: &Path) -> io::Result<u32> {
        if !self.files.contains_key(path) && !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("path not found: {:?}", path),
            ));
        }
        Ok(self.owners.get(path).copied().unwrap_or(0))
    }
}
