//! Point-in-time collection from a Linux procfs tree.
//!
//! Every source is read once through the [`FileSystem`] trait, bounded to
//! [`loader::MAX_FILE_SIZE`] bytes, and split with the [`tokenizer`].
//! Paths are always joined onto the configured procfs root, so a copy of
//! `/proc` on disk or a [`MockFs`] can stand in for the live one.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Collector                           │
//! │  ┌─────────────────────┐   ┌─────────────────────────────┐  │
//! │  │  ProcessCollector   │   │     SystemCollector         │  │
//! │  │  - /proc/[pid]/stat │   │  - /proc/sys/kernel/*       │  │
//! │  │  - /proc/[pid]/task │   │  - /proc/cpuinfo, stat      │  │
//! │  │  - UserResolver     │   │  - /proc/loadavg, meminfo   │  │
//! │  └──────────┬──────────┘   └──────────────┬──────────────┘  │
//! │             └──────────────┬──────────────┘                 │
//! │                     ┌──────▼──────┐                         │
//! │                     │   loader    │ ── tokenizer            │
//! │                     └──────┬──────┘                         │
//! │                     ┌──────▼──────┐                         │
//! │                     │  FileSystem │ (trait)                 │
//! │                     └──────┬──────┘                         │
//! └────────────────────────────┼────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!       ┌──────▼──────┐ ┌──────▼──────┐ ┌──────▼──────┐
//!       │   RealFs    │ │   MockFs    │ │  Scenarios  │
//!       │ (Linux)     │ │ (Testing)   │ │ (Fixtures)  │
//!       └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use procinspect::collector::{Collector, MockFs};
//! use procinspect::sections::Sections;
//!
//! let collector = Collector::new(MockFs::typical_system(), "/proc")
//!     .with_sample_interval(Duration::ZERO);
//! let mut out = Vec::new();
//! collector.run(Sections::all(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("Hostname: testhost"));
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod error;
pub mod loader;
pub mod mock;
pub mod procfs;
pub mod tokenizer;
pub mod traits;

pub use collector::Collector;
pub use error::{InspectError, Result};
pub use mock::MockFs;
pub use procfs::{ProcessCollector, SystemCollector, UserResolver};
pub use traits::{DirEntry, FileSystem, RealFs};
