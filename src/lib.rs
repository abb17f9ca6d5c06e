//! Rados Plugins: monitoring checks for Ceph RADOS clusters
//!
//! Each check lives in `src/bin/check-*.rs` and speaks the Sensu/Nagios
//! plugin protocol: one line of output and an exit code taken from
//! [`Status`](enum.Status.html). See the [scripts](scripts/index.html) module
//! for the help text of every check.
//!
//! The library half contains the pieces a check is built from:
//!
//! * [`config`](config/index.html): the fixed benchmark parameters
//! * [`preflight`](preflight/index.html): privilege and tool checks
//! * [`bench`](bench/index.html): running `rados bench` under a deadline
//! * [`latency`](latency/index.html): pulling latency figures out of its output
//! * [`check`](check/index.html): thresholds and the final report

#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

use std::fmt;
use std::process;

pub mod bench;
pub mod check;
pub mod config;
pub mod latency;
pub mod preflight;
pub mod scripts;

/// All possible exit statuses for a monitoring plugin
///
/// Ordered by severity, so `max` of two statuses is the one to report.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    #![cfg_attr(test, allow(dead_code))]
    /// Exit the process with the code the plugin convention assigns to `self`
    pub fn exit(self) -> ! {
        process::exit(self.code())
    }

    /// The numeric exit code: 0, 1, 2 or 3
    pub fn code(self) -> i32 {
        use self::Status::*;
        match self {
            Ok => 0,
            Warning => 1,
            Critical => 2,
            Unknown => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Status::*;
        let msg = match *self {
            Ok => "OK",
            Warning => "WARNING",
            Critical => "CRITICAL",
            Unknown => "UNKNOWN",
        };
        write!(f, "{}", msg)
    }
}

#[cfg(test)]
mod test {
    use super::Status;

    #[test]
    fn exit_codes_follow_plugin_convention() {
        assert_eq!(Status::Ok.code(), 0);
        assert_eq!(Status::Warning.code(), 1);
        assert_eq!(Status::Critical.code(), 2);
        assert_eq!(Status::Unknown.code(), 3);
    }

    #[test]
    fn worse_statuses_sort_higher() {
        assert_eq!(::std::cmp::max(Status::Warning, Status::Critical), Status::Critical);
        assert!(Status::Ok < Status::Warning);
    }
}
