//! Fixed parameters of a latency probe
//!
//! Everything here is decided once at startup and never changes while the
//! check runs.

use std::time::Duration;

/// The benchmark shape and the environment it needs
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The executable that runs the benchmark
    pub bench_program: String,
    /// How long `rados bench` writes for
    pub bench_seconds: u32,
    /// Concurrent writes in flight
    pub threads: u32,
    /// Size of each object written, in bytes
    pub object_size: u32,
    /// Hard limit on the benchmark process, after which it is killed
    pub timeout: Duration,
    /// Executables that must be resolvable on `$PATH` before starting
    pub required_tools: Vec<String>,
    /// Refuse to run unless the effective uid is 0
    ///
    /// The rados client reads the admin keyring, which is normally only
    /// readable by root.
    pub require_root: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            bench_program: "rados".into(),
            bench_seconds: 10,
            threads: 1,
            object_size: 64 * 1024,
            timeout: Duration::from_secs(30),
            required_tools: vec!["rados".into()],
            require_root: true,
        }
    }
}
