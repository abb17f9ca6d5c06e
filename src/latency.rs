//! Latency figures reported by `rados bench`
//!
//! At the end of a run `rados bench` prints a summary that includes:
//!
//! ```plain
//! Average Latency(s):     0.0107
//! Stddev Latency(s):      0.00434
//! Max latency(s):         0.0347
//! Min latency(s):         0.00576
//! ```
//!
//! The label in the first column is not relied upon, only the order: the four
//! `latency(s):` lines always come as average, standard deviation, maximum,
//! minimum. This has held since at least Ceph Luminous; if a release changes
//! it, `Stat` is the place to change.

use std::fmt;
use std::result::Result as StdResult;
use std::str::FromStr;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

lazy_static! {
    // second column is the label, third is the value in seconds
    static ref LATENCY_LINE: Regex =
        Regex::new(r"(?i)^\s*\S+\s+latency\(s\):(?:\s+(\S+))?").unwrap();
}

/// The statistics `rados bench` reports, in the order it prints them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Average,
    StdDev,
    Max,
    Min,
}

impl Stat {
    pub const ALL: [Stat; 4] = [Stat::Average, Stat::StdDev, Stat::Max, Stat::Min];

    /// Position of this stat among the `latency(s):` lines
    pub fn index(self) -> usize {
        match self {
            Stat::Average => 0,
            Stat::StdDev => 1,
            Stat::Max => 2,
            Stat::Min => 3,
        }
    }

    /// The perfdata label
    pub fn label(self) -> &'static str {
        match self {
            Stat::Average => "average_latency",
            Stat::StdDev => "stddev_latency",
            Stat::Max => "max_latency",
            Stat::Min => "min_latency",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// Not even the max latency was found
    NoMax { found: usize },
    /// Some figures exist but not the full set of four
    WrongCount { found: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> StdResult<(), fmt::Error> {
        use self::ParseError::*;
        match *self {
            NoMax { found } => write!(f, "no max latency in benchmark output ({} figures)", found),
            WrongCount { found } => write!(
                f,
                "expected {} latency figures, found {}",
                Stat::ALL.len(),
                found
            ),
        }
    }
}

/// One benchmark's latency figures, in whole milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySample {
    values: [u64; 4],
}

impl LatencySample {
    pub fn new(average: u64, stddev: u64, max: u64, min: u64) -> LatencySample {
        LatencySample {
            values: [average, stddev, max, min],
        }
    }

    /// Assign positional figures to stats
    pub fn from_values(values: &[u64]) -> StdResult<LatencySample, ParseError> {
        let found = values.len();
        if found <= Stat::Max.index() {
            return Err(ParseError::NoMax { found });
        }
        if found != Stat::ALL.len() {
            return Err(ParseError::WrongCount { found });
        }
        Ok(LatencySample::new(values[0], values[1], values[2], values[3]))
    }

    /// Extract and assign figures from raw `rados bench` output
    pub fn parse(output: &str) -> StdResult<LatencySample, ParseError> {
        LatencySample::from_values(&extract(output))
    }

    pub fn get(&self, stat: Stat) -> u64 {
        self.values[stat.index()]
    }

    pub fn max(&self) -> u64 {
        self.get(Stat::Max)
    }
}

/// Every `latency(s):` figure in `output`, converted to rounded milliseconds,
/// in the order they appear
pub fn extract(output: &str) -> Vec<u64> {
    output
        .lines()
        .filter_map(|line| LATENCY_LINE.captures(line).map(|caps| (line, caps)))
        .filter_map(|(line, caps)| {
            let ms = caps.get(1).and_then(|m| seconds_to_millis(m.as_str()));
            if ms.is_none() {
                debug!("skipping unparseable latency line: {:?}", line);
            }
            ms
        })
        .collect()
}

/// Convert a decimal number of seconds into milliseconds, rounding half up
///
/// Returns `None` for anything that isn't a non-negative number.
pub fn seconds_to_millis(seconds: &str) -> Option<u64> {
    let secs = Decimal::from_str(seconds)
        .or_else(|_| Decimal::from_scientific(seconds))
        .ok()?;
    if secs.is_sign_negative() && !secs.is_zero() {
        return None;
    }
    (secs * Decimal::from(1000))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}
