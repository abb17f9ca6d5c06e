//! Run `rados bench` and collect what it prints
//!
//! The benchmark gets a hard deadline. Its stdout is drained on a separate
//! thread so that the main thread can give up waiting, kill the child, and
//! still reap it.

use std::fmt;
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::result::Result as StdResult;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::thread::{self, sleep};
use std::time::{Duration, Instant};

use crate::config::Config;

#[derive(Debug, From)]
pub enum BenchError {
    /// Couldn't start the benchmark or read from it
    Io(io::Error),
    /// The benchmark ran past its deadline and was killed
    #[from(ignore)]
    Timeout(Duration),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> StdResult<(), fmt::Error> {
        use self::BenchError::*;
        match *self {
            Io(ref e) => write!(f, "unable to run benchmark: {}", e),
            Timeout(d) => write!(f, "benchmark killed after {}s", d.as_secs()),
        }
    }
}

pub type Result<T> = StdResult<T, BenchError>;

/// A write benchmark against a single pool
#[derive(Debug)]
pub struct BenchCommand<'a> {
    config: &'a Config,
    pool: String,
}

impl<'a> BenchCommand<'a> {
    pub fn new(config: &'a Config, pool: &str) -> BenchCommand<'a> {
        BenchCommand {
            config,
            pool: pool.to_owned(),
        }
    }

    /// Arguments to `rados`: `bench -p POOL SECONDS write -t THREADS -b SIZE`
    pub fn args(&self) -> Vec<String> {
        vec![
            "bench".into(),
            "-p".into(),
            self.pool.clone(),
            self.config.bench_seconds.to_string(),
            "write".into(),
            "-t".into(),
            self.config.threads.to_string(),
            "-b".into(),
            self.config.object_size.to_string(),
        ]
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.bench_program);
        cmd.args(self.args());
        cmd
    }

    /// Run the benchmark to completion (or the deadline) and return its stdout
    pub fn run(&self) -> Result<String> {
        info!(
            "running {} {}",
            self.config.bench_program,
            self.args().join(" ")
        );
        run_with_timeout(self.command(), self.config.timeout)
    }
}

/// Spawn `cmd` with stdout captured and stderr discarded, waiting at most
/// `timeout` for it to finish
///
/// A non-zero exit is not an error here: whatever the child printed is still
/// returned, and it is up to the caller to decide if it is useful.
pub fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<String> {
    let deadline = Instant::now() + timeout;
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let mut stdout = match child.stdout.take() {
        Some(stdout) => stdout,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(io::Error::new(io::ErrorKind::Other, "child has no stdout").into());
        }
    };
    let (tx, rx) = channel();
    let reader = thread::spawn(move || {
        let mut output = String::new();
        let result = stdout.read_to_string(&mut output).map(|_| output);
        // the receiver is gone if we already timed out
        let _ = tx.send(result);
    });

    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(output) => {
            // closing stdout doesn't mean the benchmark is done
            let status = match wait_until(&mut child, deadline)? {
                Some(status) => status,
                None => return Err(BenchError::Timeout(timeout)),
            };
            let _ = reader.join();
            if !status.success() {
                warn!("benchmark exited with {}", status);
            }
            Ok(output?)
        }
        Err(RecvTimeoutError::Timeout) => {
            kill_and_reap(&mut child)?;
            Err(BenchError::Timeout(timeout))
        }
        Err(RecvTimeoutError::Disconnected) => {
            kill_and_reap(&mut child)?;
            Err(io::Error::new(io::ErrorKind::Other, "stdout reader died").into())
        }
    }
}

/// Wait for `child` to exit, killing it if it is still running at `deadline`
///
/// Returns `None` if it had to be killed.
fn wait_until(child: &mut Child, deadline: Instant) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            kill_and_reap(child)?;
            return Ok(None);
        }
        sleep(::std::cmp::min(deadline - now, Duration::from_millis(10)));
    }
}

fn kill_and_reap(child: &mut Child) -> io::Result<()> {
    // kill fails if the child exited on its own in the meantime, wait still
    // reaps it either way
    if let Err(e) = child.kill() {
        debug!("unable to kill benchmark: {}", e);
    }
    child.wait().map(|_| ())
}
