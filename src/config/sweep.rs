use crate::sweep::{RunConfiguration, SweepError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::LaunchConfig;

/// Rank sweep: one run per worker count, no thread variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub ranks: Vec<usize>,
    pub log_path: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            ranks: (1..=50).collect(),
            log_path: PathBuf::from("execution_times.txt"),
        }
    }
}

impl SweepConfig {
    /// Build the ordered run list for this sweep
    pub fn configurations(&self, launch: &LaunchConfig) -> Result<Vec<RunConfiguration>, SweepError> {
        self.ranks
            .iter()
            .map(|&ranks| {
                RunConfiguration::new(ranks, None, &launch.grid_size, &launch.updates)
            })
            .collect()
    }
}

/// Tradeoff sweep: complementary (processes, threads) pairs over a fixed core budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffConfig {
    pub processes: Vec<usize>,
    pub threads: Vec<usize>,
    /// Cores available on the node; pairs not multiplying to this are warned about
    pub total_cores: Option<usize>,
    pub log_path: PathBuf,
}

impl Default for TradeoffConfig {
    fn default() -> Self {
        Self {
            processes: vec![1, 2, 4, 19, 38, 76],
            threads: vec![76, 38, 19, 4, 2, 1],
            total_cores: Some(76),
            log_path: PathBuf::from("mpi_openmp_tradeoff_execution_times.txt"),
        }
    }
}

impl TradeoffConfig {
    /// Pair up processes and threads in order.
    ///
    /// Fails before anything is launched if the two lists differ in length.
    pub fn configurations(&self, launch: &LaunchConfig) -> Result<Vec<RunConfiguration>, SweepError> {
        if self.processes.len() != self.threads.len() {
            return Err(SweepError::MismatchedLengths {
                processes: self.processes.len(),
                threads: self.threads.len(),
            });
        }

        let mut configs = Vec::with_capacity(self.processes.len());
        for (&processes, &threads) in self.processes.iter().zip(&self.threads) {
            if let Some(cores) = self.total_cores {
                // Overflow counts as a mismatch
                if processes.checked_mul(threads) != Some(cores) {
                    tracing::warn!(
                        processes,
                        threads,
                        total_cores = cores,
                        "configuration does not use the full core budget"
                    );
                }
            }
            configs.push(RunConfiguration::new(
                processes,
                Some(threads),
                &launch.grid_size,
                &launch.updates,
            )?);
        }
        Ok(configs)
    }
}
