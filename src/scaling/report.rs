//! Observed vs predicted scaling table

use super::amdahl::{baseline_time, predicted_time, BaselinePolicy, ParallelFraction, ScalingError};
use crate::journal::Series;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One row of a scaling report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingPoint {
    pub parameter: usize,
    pub observed_seconds: f64,
    /// baseline / observed
    pub speedup: f64,
    /// speedup / parameter
    pub efficiency: f64,
    pub predicted_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingReport {
    pub label: String,
    pub parallel_fraction: f64,
    pub baseline_seconds: f64,
    pub created_at: String,
    pub points: Vec<ScalingPoint>,
}

impl ScalingReport {
    pub fn from_series(
        label: impl Into<String>,
        series: &Series,
        p: ParallelFraction,
        policy: BaselinePolicy,
    ) -> Result<Self, ScalingError> {
        let baseline = baseline_time(series, policy)?;
        let points = series
            .points()
            .iter()
            .map(|&(n, observed)| {
                if n == 0 {
                    return Err(ScalingError::ZeroWorkers);
                }
                let speedup = baseline / observed;
                Ok(ScalingPoint {
                    parameter: n,
                    observed_seconds: observed,
                    speedup,
                    efficiency: speedup / n as f64,
                    predicted_seconds: predicted_time(baseline, n, p),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            label: label.into(),
            parallel_fraction: p.value(),
            baseline_seconds: baseline,
            created_at: chrono::Utc::now().to_rfc3339(),
            points,
        })
    }

    /// Row with the highest observed speedup
    pub fn best(&self) -> Option<&ScalingPoint> {
        self.points
            .iter()
            .max_by(|a, b| a.speedup.total_cmp(&b.speedup))
    }

    /// Save report to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    pub fn print_summary(&self) {
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("Scaling Report: {}", self.label);
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("  Baseline:          {:.3} s", self.baseline_seconds);
        println!("  Parallel fraction: {}", self.parallel_fraction);
        println!();
        println!(
            "  {:>6}  {:>12}  {:>9}  {:>10}  {:>12}",
            "n", "observed (s)", "speedup", "efficiency", "amdahl (s)"
        );
        for point in &self.points {
            println!(
                "  {:>6}  {:>12.3}  {:>9.2}  {:>9.1}%  {:>12.3}",
                point.parameter,
                point.observed_seconds,
                point.speedup,
                point.efficiency * 100.0,
                point.predicted_seconds
            );
        }
        if let Some(best) = self.best() {
            println!();
            println!(
                "  Best observed: n={} ({:.2}x, {:.3} s)",
                best.parameter, best.speedup, best.observed_seconds
            );
        }
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_rows() {
        let series = Series::new(vec![(1, 100.0), (2, 50.0), (4, 40.0)]);
        let p = ParallelFraction::new(0.95).unwrap();
        let report =
            ScalingReport::from_series("5k", &series, p, BaselinePolicy::SingleWorker).unwrap();

        assert_eq!(report.baseline_seconds, 100.0);
        assert_eq!(report.points.len(), 3);
        assert_eq!(report.points[0].speedup, 1.0);
        assert_eq!(report.points[0].predicted_seconds, 100.0);
        assert_eq!(report.points[1].speedup, 2.0);
        assert_eq!(report.points[1].efficiency, 1.0);
        assert_eq!(report.points[2].efficiency, 0.625);
        assert_eq!(report.best().map(|b| b.parameter), Some(4));
    }

    #[test]
    fn test_report_requires_baseline() {
        let series = Series::new(vec![(2, 50.0)]);
        let p = ParallelFraction::new(0.9).unwrap();
        assert!(ScalingReport::from_series("x", &series, p, BaselinePolicy::SingleWorker).is_err());
        assert!(ScalingReport::from_series("x", &series, p, BaselinePolicy::FirstSample).is_ok());
    }
}
