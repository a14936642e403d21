//! Line formats of the timing log

use std::fmt;

/// One success line of a timing log
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogRecord {
    /// `Ranks: <int>, Time: <float> seconds`
    Ranks { ranks: usize, seconds: f64 },
    /// `MPI Processes: <int>, OpenMP Threads: <int>, Time: <float> seconds`
    Tradeoff {
        processes: usize,
        threads: usize,
        seconds: f64,
    },
}

impl LogRecord {
    pub fn seconds(&self) -> f64 {
        match *self {
            LogRecord::Ranks { seconds, .. } | LogRecord::Tradeoff { seconds, .. } => seconds,
        }
    }

    /// Header line introducing the stderr captured for this record's run
    pub fn error_header(&self) -> String {
        match *self {
            LogRecord::Ranks { ranks, .. } => format!("Errors for {} ranks:", ranks),
            LogRecord::Tradeoff {
                processes, threads, ..
            } => format!(
                "Errors with {} MPI processes and {} OpenMP threads:",
                processes, threads
            ),
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LogRecord::Ranks { ranks, seconds } => {
                write!(f, "Ranks: {}, Time: {} seconds", ranks, seconds)
            }
            LogRecord::Tradeoff {
                processes,
                threads,
                seconds,
            } => write!(
                f,
                "MPI Processes: {}, OpenMP Threads: {}, Time: {} seconds",
                processes, threads, seconds
            ),
        }
    }
}
