//! Documentation about the various scripts contained herein
//!
//! - [check-rados-latency](#check-rados-latency)
//!
//! # check-rados-latency
//!
//! Linux-only. Needs root and the `rados` command line client.
//!
//! ```plain
//! $ check-rados-latency --help
//! check-rados-latency (part of rados-plugins) 0.1.0
//! Brandon W Maister <quodlibetor@gmail.com>
//! Check the write latency of a Ceph pool.
//!
//! Writes 64KiB objects to the pool from a single thread for 10 seconds using `rados bench`, and alerts on the maximum
//! latency observed. Must run as root, with `rados` on the PATH.
//!
//! USAGE:
//!     check-rados-latency [OPTIONS] --pool <pool>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! OPTIONS:
//!     -C, --critical <CRITICAL_MS>    Go critical if max latency is above this many milliseconds
//!     -p, --pool <pool>               The pool to benchmark
//!     -W, --warning <WARNING_MS>      Warn if max latency is above this many milliseconds
//!
//! Examples:
//!
//!     Warn above 350ms and go critical above 750ms of write latency on 'rbd':
//!
//!         check-rados-latency -p rbd -W 350 -C 750
//!
//!     Output looks like:
//!
//!         OK: max latency 35ms, average 11ms, stddev 4ms, min 6ms | 'average_latency'=11ms ...
//! ```
