//! Bounded file loading.
//!
//! Every procfs read goes through [`load`], which reads at most
//! [`MAX_FILE_SIZE`] bytes into an owned [`RawBuffer`] and turns any
//! open/read failure into an [`InspectError`] naming the path.

use std::path::Path;

use tracing::trace;

use crate::collector::error::{InspectError, Result};
use crate::collector::tokenizer::Tokens;
use crate::collector::traits::FileSystem;

/// Upper bound on how much of a single file is read.
pub const MAX_FILE_SIZE: usize = 100_000;

/// Verbatim contents of one source file, at most [`MAX_FILE_SIZE`] bytes.
///
/// Invalid UTF-8 (or a multi-byte character cut by the size bound) is
/// replaced with U+FFFD; procfs text is ASCII in practice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBuffer {
    text: String,
}

impl RawBuffer {
    /// Wraps raw bytes, truncating to [`MAX_FILE_SIZE`].
    pub fn from_bytes(mut bytes: Vec<u8>) -> Self {
        bytes.truncate(MAX_FILE_SIZE);
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };
        Self { text }
    }

    /// Returns the buffer contents.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Tokenizes the buffer on the given delimiter set.
    pub fn tokens<'a>(&'a self, delims: &'a str) -> Tokens<'a> {
        Tokens::new(&self.text, delims)
    }
}

/// Reads a file through `fs`, bounded to [`MAX_FILE_SIZE`] bytes.
pub fn load<F: FileSystem>(fs: &F, path: &Path) -> Result<RawBuffer> {
    let bytes = fs
        .read_bounded(path, MAX_FILE_SIZE)
        .map_err(|e| InspectError::io(path, e))?;
    trace!(path = %path.display(), bytes = bytes.len(), "loaded file");
    Ok(RawBuffer::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    #[test]
    fn test_load_reads_whole_small_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");

        let buf = load(&fs, Path::new("/proc/loadavg")).unwrap();
        assert_eq!(buf.as_str(), "0.15 0.10 0.05 1/150 1234\n");
        assert_eq!(buf.tokens(" ").next(), Some("0.15"));
    }

    #[test]
    fn test_load_truncates_large_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/big", "x".repeat(MAX_FILE_SIZE + 500));

        let buf = load(&fs, Path::new("/proc/big")).unwrap();
        assert_eq!(buf.as_str().len(), MAX_FILE_SIZE);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let fs = MockFs::new();
        let err = load(&fs, Path::new("/proc/uptime")).unwrap_err();
        assert!(err.to_string().contains("/proc/uptime"));
        assert!(matches!(err, InspectError::Io { .. }));
    }

    #[test]
    fn test_raw_buffer_replaces_invalid_utf8() {
        let buf = RawBuffer::from_bytes(vec![b'o', b'k', 0xff, b'!']);
        assert_eq!(buf.as_str(), "ok\u{fffd}!");
    }
}
