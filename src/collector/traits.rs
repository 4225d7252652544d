//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait allows the collectors to work with both the real
//! procfs tree on Linux and the in-memory [`MockFs`](crate::collector::MockFs)
//! used by tests.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Full path of the entry (directory path joined with the entry name).
    pub path: PathBuf,
    /// Whether the entry itself is a directory. Symlinks are not followed.
    pub is_dir: bool,
}

impl DirEntry {
    /// Returns the final path component as UTF-8, if it is valid UTF-8.
    pub fn name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Returns `true` for directory entries named entirely by decimal digits.
///
/// This is how both processes (`/proc/<pid>`) and threads
/// (`/proc/<pid>/task/<tid>`) show up in procfs.
pub fn is_pid_dir(entry: &DirEntry) -> bool {
    entry.is_dir
        && entry
            .name()
            .is_some_and(|name| !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
}

/// Abstraction for filesystem operations.
///
/// Collectors only ever read, so the trait has no write side.
pub trait FileSystem {
    /// Reads at most `limit` bytes from the start of a file.
    ///
    /// A file shorter than `limit` is returned whole; a longer one is cut at
    /// `limit` bytes without error.
    fn read_bounded(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>>;

    /// Lists entries in a directory, in whatever order the directory yields them.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Returns the numeric owner id of a file or directory.
    fn owner_uid(&self, path: &Path) -> io::Result<u32>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn read_bounded(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>> {
        (**self).read_bounded(path, limit)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }

    fn owner_uid(&self, path: &Path) -> io::Result<u32> {
        (**self).owner_uid(path)
    }
}

/// Real filesystem implementation that delegates to `std::fs`.
///
/// Use this in production to read from the actual `/proc` filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_bounded(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>> {
        let file = File::open(path)?;
        let mut buf = Vec::with_capacity(limit.min(8192));
        file.take(limit as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            // An entry can vanish between readdir and the type query.
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            entries.push(DirEntry {
                path: entry.path(),
                is_dir,
            });
        }
        Ok(entries)
    }

    #[cfg(unix)]
    fn owner_uid(&self, path: &Path) -> io::Result<u32> {
        use std::os::unix::fs::MetadataExt;
        Ok(std::fs::metadata(path)?.uid())
    }

    #[cfg(not(unix))]
    fn owner_uid(&self, _path: &Path) -> io::Result<u32> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "file ownership is not available on this platform",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn entry(path: &str, is_dir: bool) -> DirEntry {
        DirEntry {
            path: PathBuf::from(path),
            is_dir,
        }
    }

    #[test]
    fn test_is_pid_dir() {
        assert!(is_pid_dir(&entry("/proc/1", true)));
        assert!(is_pid_dir(&entry("/proc/4242", true)));
        assert!(!is_pid_dir(&entry("/proc/1", false)));
        assert!(!is_pid_dir(&entry("/proc/abc", true)));
        assert!(!is_pid_dir(&entry("/proc/3.5", true)));
        assert!(!is_pid_dir(&entry("/proc/12a", true)));
        assert!(!is_pid_dir(&entry("/", true)));
    }

    #[test]
    fn test_real_fs_read_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stat");
        fs::write(&path, "cpu  1 2 3 4\n").unwrap();

        let fs = RealFs::new();
        assert_eq!(fs.read_bounded(&path, 100).unwrap(), b"cpu  1 2 3 4\n");
        assert_eq!(fs.read_bounded(&path, 3).unwrap(), b"cpu");
    }

    #[test]
    fn test_real_fs_read_missing() {
        let fs = RealFs::new();
        let err = fs
            .read_bounded(Path::new("/nonexistent/path/12345"), 10)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_real_fs_read_dir_reports_types() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("17")).unwrap();
        fs::write(dir.path().join("loadavg"), "0.1 0.2 0.3").unwrap();

        let fs = RealFs::new();
        let mut entries = fs.read_dir(dir.path()).unwrap();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name(), Some("17"));
        assert!(entries[0].is_dir);
        assert_eq!(entries[1].name(), Some("loadavg"));
        assert!(!entries[1].is_dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_real_fs_owner_uid_matches_metadata() {
        use std::os::unix::fs::MetadataExt;

        let dir = tempfile::tempdir().unwrap();
        let expected = fs::metadata(dir.path()).unwrap().uid();
        assert_eq!(RealFs::new().owner_uid(dir.path()).unwrap(), expected);
    }
}
