//! Decide how bad a latency sample is, and say so
//!
//! Only the max latency is compared against thresholds. Every figure is
//! reported in the perfdata so that graphs can show the rest.

use std::fmt;

use crate::latency::{LatencySample, Stat};
use crate::Status;

/// Printed instead of a report when the benchmark output had no usable result
pub const PARSE_FAILURE: &'static str = "CRITICAL: unable to parse result";

/// Warning and critical limits for max latency, in milliseconds
///
/// Either may be absent, in which case that level is never reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub warning: Option<i64>,
    pub critical: Option<i64>,
}

impl Thresholds {
    pub fn new(warning: Option<i64>, critical: Option<i64>) -> Thresholds {
        Thresholds { warning, critical }
    }

    /// The status of a max latency: critical beats warning beats ok
    pub fn evaluate(&self, max_ms: u64) -> Status {
        let max_ms = max_ms as i128;
        if self.critical.map_or(false, |crit| max_ms > i128::from(crit)) {
            Status::Critical
        } else if self.warning.map_or(false, |warn| max_ms > i128::from(warn)) {
            Status::Warning
        } else {
            Status::Ok
        }
    }

    /// The threshold that produced `status`, if any
    fn crossed(&self, status: Status) -> Option<i64> {
        match status {
            Status::Critical => self.critical,
            Status::Warning => self.warning,
            _ => None,
        }
    }
}

/// The outcome of a check: one line of output and a status to exit with
#[derive(Debug, PartialEq)]
pub struct Report {
    pub status: Status,
    pub sample: LatencySample,
    pub thresholds: Thresholds,
}

impl Report {
    pub fn new(sample: LatencySample, thresholds: Thresholds) -> Report {
        Report {
            status: thresholds.evaluate(sample.max()),
            sample,
            thresholds,
        }
    }

    /// `'label'=Nms` for every stat, space separated
    pub fn perfdata(&self) -> String {
        Stat::ALL
            .iter()
            .map(|&stat| format!("'{}'={}ms", stat.label(), self.sample.get(stat)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: max latency {}ms", self.status, self.sample.max())?;
        if let Some(limit) = self.thresholds.crossed(self.status) {
            write!(f, " (> {}ms)", limit)?;
        }
        write!(
            f,
            ", average {}ms, stddev {}ms, min {}ms | {}",
            self.sample.get(Stat::Average),
            self.sample.get(Stat::StdDev),
            self.sample.get(Stat::Min),
            self.perfdata()
        )
    }
}

#[cfg(test)]
mod test {
    use super::{Report, Thresholds};
    use crate::latency::LatencySample;
    use crate::Status;

    fn sample_with_max(max: u64) -> LatencySample {
        LatencySample::new(10, 2, max, 5)
    }

    #[test]
    fn warning_between_thresholds() {
        let report = Report::new(sample_with_max(400), Thresholds::new(Some(350), Some(750)));
        assert_eq!(report.status, Status::Warning);
        assert_eq!(report.status.code(), 1);
    }

    #[test]
    fn critical_above_critical() {
        let report = Report::new(sample_with_max(800), Thresholds::new(Some(350), Some(750)));
        assert_eq!(report.status, Status::Critical);
        assert_eq!(report.status.code(), 2);
    }

    #[test]
    fn ok_below_both() {
        let report = Report::new(sample_with_max(100), Thresholds::new(Some(350), Some(750)));
        assert_eq!(report.status, Status::Ok);
        assert_eq!(report.status.code(), 0);
    }

    #[test]
    fn thresholds_are_exclusive() {
        let thresholds = Thresholds::new(Some(350), Some(750));
        assert_eq!(thresholds.evaluate(350), Status::Ok);
        assert_eq!(thresholds.evaluate(750), Status::Warning);
    }

    #[test]
    fn no_thresholds_is_always_ok() {
        let thresholds = Thresholds::default();
        for &max in &[0, 100, 10_000, u64::max_value()] {
            assert_eq!(thresholds.evaluate(max), Status::Ok);
        }
    }

    #[test]
    fn single_threshold() {
        assert_eq!(Thresholds::new(None, Some(50)).evaluate(51), Status::Critical);
        assert_eq!(Thresholds::new(Some(50), None).evaluate(51), Status::Warning);
        assert_eq!(Thresholds::new(Some(-1), None).evaluate(0), Status::Warning);
    }

    #[test]
    fn inverted_thresholds_prefer_critical() {
        let thresholds = Thresholds::new(Some(750), Some(350));
        assert_eq!(thresholds.evaluate(400), Status::Critical);
    }

    #[test]
    fn ok_report_line() {
        let report = Report::new(
            LatencySample::new(11, 4, 35, 6),
            Thresholds::new(Some(350), Some(750)),
        );
        assert_eq!(
            report.to_string(),
            "OK: max latency 35ms, average 11ms, stddev 4ms, min 6ms | \
             'average_latency'=11ms 'stddev_latency'=4ms 'max_latency'=35ms 'min_latency'=6ms"
        );
    }

    #[test]
    fn breached_report_names_the_threshold() {
        let report = Report::new(
            LatencySample::new(300, 120, 800, 90),
            Thresholds::new(Some(350), Some(750)),
        );
        assert_eq!(
            report.to_string(),
            "CRITICAL: max latency 800ms (> 750ms), average 300ms, stddev 120ms, min 90ms | \
             'average_latency'=300ms 'stddev_latency'=120ms 'max_latency'=800ms 'min_latency'=90ms"
        );
    }
}
