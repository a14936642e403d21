//! Amdahl's Law predictions for a measured series
//!
//! With a fraction `p` of the work parallelizable, `n` workers give a speedup
//!
//! ```text
//! S(n) = 1 / ((1 - p) + p / n)
//! ```
//!
//! and the predicted run time is the single-worker baseline divided by `S(n)`.

use crate::journal::Series;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalingError {
    #[error("parallel fraction must be in (0, 1), got {0}")]
    InvalidParallelFraction(f64),

    #[error("series is empty")]
    EmptySeries,

    #[error("series has no single-worker (n = 1) baseline")]
    MissingBaseline,

    #[error("worker count must be positive")]
    ZeroWorkers,
}

/// Fraction of the work that scales with added workers, strictly inside (0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ParallelFraction(f64);

impl ParallelFraction {
    pub fn new(p: f64) -> Result<Self, ScalingError> {
        if p > 0.0 && p < 1.0 {
            Ok(Self(p))
        } else {
            Err(ScalingError::InvalidParallelFraction(p))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ParallelFraction {
    type Error = ScalingError;

    fn try_from(p: f64) -> Result<Self, Self::Error> {
        Self::new(p)
    }
}

impl From<ParallelFraction> for f64 {
    fn from(p: ParallelFraction) -> Self {
        p.0
    }
}

/// Where the single-worker reference time comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselinePolicy {
    /// The first sample whose parameter is 1; absent is an error
    #[default]
    SingleWorker,
    /// The first sample in the series, whatever its parameter
    FirstSample,
}

/// Predicted speedup for `n` workers.
///
/// `n = 1` yields exactly 1. Callers must pass `n >= 1`.
pub fn amdahl_speedup(n: usize, p: f64) -> f64 {
    if n == 1 {
        return 1.0;
    }
    1.0 / ((1.0 - p) + p / n as f64)
}

pub fn predicted_time(baseline_seconds: f64, n: usize, p: ParallelFraction) -> f64 {
    baseline_seconds / amdahl_speedup(n, p.value())
}

/// Reference time used to scale predictions
pub fn baseline_time(series: &Series, policy: BaselinePolicy) -> Result<f64, ScalingError> {
    let points = series.points();
    if points.is_empty() {
        return Err(ScalingError::EmptySeries);
    }
    match policy {
        BaselinePolicy::SingleWorker => points
            .iter()
            .find(|&&(n, _)| n == 1)
            .map(|&(_, t)| t)
            .ok_or(ScalingError::MissingBaseline),
        BaselinePolicy::FirstSample => Ok(points[0].1),
    }
}

/// Predicted time for every parameter of `series`, in series order
pub fn theoretical_curve(
    series: &Series,
    p: ParallelFraction,
    policy: BaselinePolicy,
) -> Result<Vec<(usize, f64)>, ScalingError> {
    let baseline = baseline_time(series, policy)?;
    series
        .parameters()
        .map(|n| {
            if n == 0 {
                Err(ScalingError::ZeroWorkers)
            } else {
                Ok((n, predicted_time(baseline, n, p)))
            }
        })
        .collect()
}
