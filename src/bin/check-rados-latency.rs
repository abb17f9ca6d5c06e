//! Check the write latency of a Ceph pool
//!
//! Runs a short single-threaded `rados bench` write against the pool and
//! compares the worst latency it saw to the thresholds.

#[macro_use]
extern crate log;

use structopt::clap::{self, ErrorKind};
use structopt::StructOpt;

use rados_plugins::bench::BenchCommand;
use rados_plugins::check::{Report, Thresholds, PARSE_FAILURE};
use rados_plugins::config::Config;
use rados_plugins::latency::LatencySample;
use rados_plugins::{preflight, Status};

/// Check the write latency of a Ceph pool.
///
/// Writes 64KiB objects to the pool from a single thread for 10 seconds using
/// `rados bench`, and alerts on the maximum latency observed. Must run as
/// root, with `rados` on the PATH.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "check-rados-latency (part of rados-plugins)",
    raw(setting = "structopt::clap::AppSettings::ColoredHelp"),
    after_help = "Examples:

    Warn above 350ms and go critical above 750ms of write latency on 'rbd':

        check-rados-latency -p rbd -W 350 -C 750

    Output looks like:

        OK: max latency 35ms, average 11ms, stddev 4ms, min 6ms | 'average_latency'=11ms ..."
)]
struct Args {
    #[structopt(
        short = "p",
        long = "pool",
        help = "The pool to benchmark",
        raw(empty_values = "false")
    )]
    pool: String,
    #[structopt(
        short = "W",
        long = "warning",
        name = "WARNING_MS",
        help = "Warn if max latency is above this many milliseconds"
    )]
    warning: Option<i64>,
    #[structopt(
        short = "C",
        long = "critical",
        name = "CRITICAL_MS",
        help = "Go critical if max latency is above this many milliseconds"
    )]
    critical: Option<i64>,
}

impl Args {
    fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.warning, self.critical)
    }
}

/// The status to exit with for an argv error, `None` for `--help`/`--version`
fn usage_status(err: &clap::Error) -> Option<Status> {
    match err.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => None,
        _ => Some(Status::Unknown),
    }
}

/// Parse argv, exiting UNKNOWN on anything unexpected
fn parse_args() -> Args {
    match Args::from_iter_safe(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => match usage_status(&e) {
            Some(status) => {
                eprintln!("{}", e.message);
                status.exit();
            }
            None => e.exit(),
        },
    }
}

/// Turn raw benchmark output into a report, or `None` if it can't be parsed
fn evaluate(output: &str, thresholds: Thresholds) -> Option<Report> {
    match LatencySample::parse(output) {
        Ok(sample) => Some(Report::new(sample, thresholds)),
        Err(e) => {
            info!("{}", e);
            debug!("benchmark output was: {:?}", output);
            None
        }
    }
}

/// The line to print and the status to exit with for some benchmark output
fn outcome(output: &str, thresholds: Thresholds) -> (String, Status) {
    match evaluate(output, thresholds) {
        Some(report) => (report.to_string(), report.status),
        None => (PARSE_FAILURE.to_owned(), Status::Critical),
    }
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    env_logger::init();
    let config = Config::default();
    let args = parse_args();

    if let Err(e) = preflight::run(&config) {
        eprintln!("UNKNOWN: {}", e);
        Status::Unknown.exit();
    }

    if let (Some(warn), Some(crit)) = (args.warning, args.critical) {
        if warn >= crit {
            warn!(
                "warning threshold {}ms is not below critical threshold {}ms",
                warn, crit
            );
        }
    }

    // a benchmark that never ran leaves nothing to parse, which is reported below
    let output = BenchCommand::new(&config, &args.pool)
        .run()
        .unwrap_or_else(|e| {
            error!("{}", e);
            String::new()
        });

    let (line, status) = outcome(&output, args.thresholds());
    println!("{}", line);
    status.exit();
}
