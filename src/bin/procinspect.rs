//! procinspect - print a snapshot of the running system from procfs.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use procinspect::collector::{Collector, RealFs};
use procinspect::sections::Sections;

/// Point-in-time system inspector.
#[derive(Parser)]
#[command(
    name = "procinspect",
    about = "Print system, hardware and task information from procfs",
    version
)]
struct Args {
    /// Print every section (the default when no section is selected).
    #[arg(short, long)]
    all: bool,

    /// Print the task list.
    #[arg(short = 'l', long)]
    task_list: bool,

    /// Print hardware information.
    #[arg(short = 'r', long)]
    hardware: bool,

    /// Print system information.
    #[arg(short, long)]
    system: bool,

    /// Print the task summary.
    #[arg(short, long)]
    task_summary: bool,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(short, long, default_value = "/proc", env = "PROCINSPECT_PROC")]
    proc_path: PathBuf,

    /// Path to the user-account database used for owner names.
    #[arg(long, default_value = "/etc/passwd")]
    passwd_path: PathBuf,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is warn level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn sections(&self) -> Sections {
        if self.all {
            return Sections::all();
        }
        Sections {
            system: self.system,
            hardware: self.hardware,
            task_summary: self.task_summary,
            task_list: self.task_list,
        }
        .or_all()
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_exit_code(&e));
        }
    };

    init_logging(args.verbose, args.quiet);

    let sections = args.sections();
    debug!(
        proc_path = %args.proc_path.display(),
        passwd_path = %args.passwd_path.display(),
        sections = ?sections.names(),
        "starting"
    );

    let collector =
        Collector::new(RealFs::new(), &args.proc_path).with_passwd_path(&args.passwd_path);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = collector.run(sections, &mut out) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Exit status for a failed argument parse: `--help` and `--version` are
/// not failures, everything else is a usage error.
fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

/// Initializes the logging subsystem on stderr.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
