//! Run configuration and result types

use crate::journal::LogRecord;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("parallelism levels must be positive, got {processes} processes / {threads:?} threads")]
    ZeroParallelism {
        processes: usize,
        threads: Option<usize>,
    },

    #[error("process and thread lists differ in length ({processes} vs {threads})")]
    MismatchedLengths { processes: usize, threads: usize },
}

/// One external-program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    processes: usize,
    threads: Option<usize>,
    grid_size: String,
    updates: String,
}

impl RunConfiguration {
    pub fn new(
        processes: usize,
        threads: Option<usize>,
        grid_size: &str,
        updates: &str,
    ) -> Result<Self, SweepError> {
        if processes == 0 || threads == Some(0) {
            return Err(SweepError::ZeroParallelism { processes, threads });
        }
        Ok(Self {
            processes,
            threads,
            grid_size: grid_size.to_string(),
            updates: updates.to_string(),
        })
    }

    pub fn processes(&self) -> usize {
        self.processes
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    pub fn grid_size(&self) -> &str {
        &self.grid_size
    }

    pub fn updates(&self) -> &str {
        &self.updates
    }

    /// Human-readable description for console output
    pub fn describe(&self) -> String {
        match self.threads {
            Some(threads) => format!(
                "{} MPI processes and {} OpenMP threads",
                self.processes, threads
            ),
            None => format!("{} ranks", self.processes),
        }
    }
}

/// Captured output of one launch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal or never started
    pub exit_code: Option<i32>,
}

/// Outcome of one configuration, written once to the log
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub config: RunConfiguration,
    pub elapsed: Duration,
    pub stdout: String,
    pub exit_code: Option<i32>,
    pub errors: Option<String>,
}

impl RunResult {
    pub fn new(config: RunConfiguration, elapsed: Duration, output: LaunchOutput) -> Self {
        let errors = if output.stderr.is_empty() {
            None
        } else {
            Some(output.stderr)
        };
        Self {
            config,
            elapsed,
            stdout: output.stdout,
            exit_code: output.exit_code,
            errors,
        }
    }

    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// The log record for this run, shaped by whether threads were swept
    pub fn record(&self) -> LogRecord {
        let seconds = self.seconds();
        match self.config.threads() {
            Some(threads) => LogRecord::Tradeoff {
                processes: self.config.processes(),
                threads,
                seconds,
            },
            None => LogRecord::Ranks {
                ranks: self.config.processes(),
                seconds,
            },
        }
    }
}
