pub mod amdahl;
pub mod report;

pub use amdahl::{
    amdahl_speedup, baseline_time, predicted_time, theoretical_curve, BaselinePolicy,
    ParallelFraction, ScalingError,
};
pub use report::{ScalingPoint, ScalingReport};
