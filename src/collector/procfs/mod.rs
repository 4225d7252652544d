//! Collectors for the procfs tree.
//!
//! This module provides parsers and collectors for reading system and process
//! information from the `/proc` virtual filesystem.

pub mod parser;
pub mod process;
pub mod system;

pub use parser::UserResolver;
pub use process::{DEFAULT_PASSWD_PATH, ProcessCollector};
pub use system::{CPU_SAMPLE_INTERVAL, SystemCollector};
