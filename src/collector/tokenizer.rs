//! Delimiter-driven tokenizer over procfs text.
//!
//! Kernel-authored files mix spaces, colons, tabs, newlines and parentheses
//! as separators, and each file wants a different set of them. [`Tokens`]
//! walks a buffer lazily, yielding borrowed slices between runs of the
//! caller's delimiters, so a collector can stop as soon as it has what it
//! needs without splitting the whole file.

use std::iter::FusedIterator;

/// Delimiters for `/proc/stat` and `/proc/meminfo`.
pub const STAT_DELIMS: &str = " :\n\0,?!";

/// Delimiters for the labelled counters (`intr`, `ctxt`, `processes`) in `/proc/stat`.
pub const COUNTER_DELIMS: &str = " \n\0,?!";

/// Delimiters for `/proc/cpuinfo`.
pub const CPUINFO_DELIMS: &str = " ,?!:\t\n";

/// Delimiters for `/proc/loadavg`.
pub const LOADAVG_DELIMS: &str = " \0";

/// Delimiters for `/proc/<pid>/stat`.
pub const PID_STAT_DELIMS: &str = " ()";

/// Lazy iterator over the delimiter-bounded tokens of a string.
///
/// Leading delimiters are skipped, so consecutive delimiters never produce
/// empty tokens. Once the input is exhausted every further call returns
/// `None`. Restarting requires building a new `Tokens`.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: Option<&'a str>,
    delims: &'a [u8],
}

impl<'a> Tokens<'a> {
    /// Creates a tokenizer over `input` splitting on any byte of `delims`.
    ///
    /// Delimiters must be ASCII; that keeps every split on a UTF-8 boundary.
    pub fn new(input: &'a str, delims: &'a str) -> Self {
        debug_assert!(delims.is_ascii(), "delimiters must be ASCII");
        Self {
            rest: Some(input),
            delims: delims.as_bytes(),
        }
    }

    fn is_delim(&self, b: u8) -> bool {
        self.delims.contains(&b)
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        let bytes = rest.as_bytes();

        let start = bytes
            .iter()
            .position(|&b| !self.is_delim(b))
            .unwrap_or(bytes.len());
        let len = bytes[start..]
            .iter()
            .position(|&b| self.is_delim(b))
            .unwrap_or(bytes.len() - start);

        if len == 0 {
            self.rest = None;
            return None;
        }

        let end = start + len;
        // Step over the single delimiter that ended the token.
        self.rest = if end < bytes.len() {
            Some(&rest[end + 1..])
        } else {
            None
        };
        Some(&rest[start..end])
    }
}

impl FusedIterator for Tokens<'_> {}

/// Reads the leading decimal digits of a token as an integer, the way
/// `strtol` does: `"12345.67"` reads as `12345`, `"7kB"` as `7`.
///
/// Returns `None` when the token does not start with a digit or overflows.
pub fn leading_u64(token: &str) -> Option<u64> {
    let digits = token
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(token.len());
    if digits == 0 {
        return None;
    }
    token[..digits].parse().ok()
}
